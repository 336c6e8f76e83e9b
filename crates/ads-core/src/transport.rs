use std::fmt;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::TransportError;
use crate::record::Record;

/// Platform API generation a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Legacy creative format (`v1.1` endpoints).
    Legacy,
    /// Dynamic creative format with nested components (`v3.0` endpoints).
    Dynamic,
}

impl ApiVersion {
    /// Short tag stamped onto every asset the version produces.
    pub fn label(&self) -> &'static str {
        match self {
            ApiVersion::Legacy => "v2",
            ApiVersion::Dynamic => "v3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independently paginated resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Adcreatives,
    DynamicCreatives,
    Pages,
    WechatPages,
    XijingPages,
    Images,
    Videos,
}

impl Resource {
    /// Endpoint path relative to the version base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Adcreatives => "adcreatives/get",
            Resource::DynamicCreatives => "dynamic_creatives/get",
            Resource::Pages => "pages/get",
            Resource::WechatPages => "wechat_pages/get",
            Resource::XijingPages => "xijing_page_list/get",
            Resource::Images => "images/get",
            Resource::Videos => "videos/get",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Adcreatives => "adcreatives",
            Resource::DynamicCreatives => "dynamic_creatives",
            Resource::Pages => "pages",
            Resource::WechatPages => "wechat_pages",
            Resource::XijingPages => "xijing_pages",
            Resource::Images => "images",
            Resource::Videos => "videos",
        };
        f.write_str(name)
    }
}

/// Server-side predicate attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    In {
        field: &'static str,
        values: Vec<String>,
    },
    Equals {
        field: &'static str,
        value: String,
    },
}

impl Filter {
    pub fn field(&self) -> &'static str {
        match self {
            Filter::In { field, .. } | Filter::Equals { field, .. } => field,
        }
    }

    /// The `filtering` query parameter payload.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::In { field, values } => json!([{
                "field": field,
                "operator": "IN",
                "values": values,
            }]),
            Filter::Equals { field, value } => json!([{
                "field": field,
                "operator": "EQUALS",
                "values": [value],
            }]),
        }
    }
}

/// One paged request against a resource collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    pub version: ApiVersion,
    pub resource: Resource,
    pub page: u32,
    pub page_size: u32,
    pub filter: Option<Filter>,
    /// Attribute allow-list; empty means the endpoint default.
    pub fields: &'static [&'static str],
}

/// Records returned for one page plus the collection total the server reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    pub total: u64,
}

/// Black-box access to the ad platform.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, query: &ResourceQuery) -> Result<Page, TransportError>;
}
