//! reqwest-backed [`Transport`] for the GDT marketing API.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::TransportError;
use crate::record::Record;
use crate::transport::{ApiVersion, Filter, Page, Resource, ResourceQuery, Transport};

const NONCE_LEN: usize = 24;

pub struct HttpTransport {
    client: Client,
    settings: ApiSettings,
    account_id: i64,
    access_token: String,
    debug: bool,
}

impl HttpTransport {
    pub fn new(
        settings: ApiSettings,
        account_id: i64,
        access_token: impl Into<String>,
        debug: bool,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("ads-assets/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            settings,
            account_id,
            access_token: access_token.into(),
            debug,
        })
    }

    fn endpoint(&self, query: &ResourceQuery) -> String {
        let base = match query.version {
            ApiVersion::Legacy => &self.settings.legacy_base_url,
            ApiVersion::Dynamic => &self.settings.dynamic_base_url,
        };
        format!("{base}{}", query.resource.path())
    }

    fn params(&self, query: &ResourceQuery) -> Result<Vec<(&'static str, String)>, TransportError> {
        let mut params = vec![
            ("access_token", self.access_token.clone()),
            ("timestamp", Utc::now().timestamp().to_string()),
            ("nonce", nonce()),
            ("account_id", self.account_id.to_string()),
            ("page_size", query.page_size.to_string()),
        ];

        if query.resource == Resource::XijingPages {
            params.push(("page_index", query.page.to_string()));
            if let Some(Filter::Equals { value, .. }) = &query.filter {
                params.push(("page_type", value.clone()));
            }
        } else {
            params.push(("page", query.page.to_string()));
            if let Some(filter) = &query.filter {
                params.push(("filtering", serde_json::to_string(&filter.to_json())?));
            }
        }

        if !query.fields.is_empty() {
            params.push(("fields", serde_json::to_string(query.fields)?));
        }

        Ok(params)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, query: &ResourceQuery) -> Result<Page, TransportError> {
        let url = self.endpoint(query);
        let params = self.params(query)?;
        if self.debug {
            debug!(
                %url,
                page = query.page,
                filter = ?query.filter,
                "GDT request"
            );
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        if self.debug {
            debug!(%url, body = %body, "GDT response");
        }

        decode_page(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    message_cn: String,
    #[serde(default)]
    data: Option<EnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    list: Option<Vec<Value>>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default)]
    total_number: u64,
}

/// Decodes a response envelope. Missing `list` or `page_info` reads as an empty page.
pub(crate) fn decode_page(body: &str) -> Result<Page, TransportError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 0 {
        let message = if envelope.message.is_empty() {
            envelope.message_cn
        } else {
            envelope.message
        };
        return Err(TransportError::Api {
            code: envelope.code,
            message,
        });
    }

    let Some(EnvelopeData {
        list: Some(list),
        page_info: Some(page_info),
    }) = envelope.data
    else {
        return Ok(Page::default());
    };

    let records = list
        .into_iter()
        .map(|item| {
            Record::from_value(item)
                .ok_or_else(|| TransportError::decode("list entry is not an object"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        records,
        total: page_info.total_number,
    })
}

fn nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(ApiSettings::default(), 4242, "secret", false).unwrap()
    }

    fn query(version: ApiVersion, resource: Resource, filter: Option<Filter>) -> ResourceQuery {
        ResourceQuery {
            version,
            resource,
            page: 3,
            page_size: 100,
            filter,
            fields: &["image_id", "preview_url"],
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn endpoint_follows_version_base() {
        let transport = transport();
        assert_eq!(
            transport.endpoint(&query(ApiVersion::Legacy, Resource::Adcreatives, None)),
            "https://api.e.qq.com/v1.1/adcreatives/get"
        );
        assert_eq!(
            transport.endpoint(&query(ApiVersion::Dynamic, Resource::DynamicCreatives, None)),
            "https://api.e.qq.com/v3.0/dynamic_creatives/get"
        );
    }

    #[test]
    fn params_carry_paging_fields_and_filter() {
        let transport = transport();
        let filter = Filter::In {
            field: "image_id",
            values: vec!["a".into(), "b".into()],
        };
        let params = transport
            .params(&query(ApiVersion::Legacy, Resource::Images, Some(filter)))
            .unwrap();

        assert_eq!(param(&params, "account_id"), Some("4242"));
        assert_eq!(param(&params, "access_token"), Some("secret"));
        assert_eq!(param(&params, "page"), Some("3"));
        assert_eq!(param(&params, "page_size"), Some("100"));
        assert_eq!(param(&params, "fields"), Some(r#"["image_id","preview_url"]"#));
        assert_eq!(
            param(&params, "filtering"),
            Some(r#"[{"field":"image_id","operator":"IN","values":["a","b"]}]"#)
        );
        assert_eq!(param(&params, "nonce").map(str::len), Some(NONCE_LEN));
    }

    #[test]
    fn xijing_params_use_page_index_and_page_type() {
        let transport = transport();
        let filter = Filter::Equals {
            field: "page_type",
            value: "XJ_DEFAULT_H5".into(),
        };
        let params = transport
            .params(&query(ApiVersion::Dynamic, Resource::XijingPages, Some(filter)))
            .unwrap();

        assert_eq!(param(&params, "page_index"), Some("3"));
        assert_eq!(param(&params, "page_type"), Some("XJ_DEFAULT_H5"));
        assert_eq!(param(&params, "page"), None);
        assert_eq!(param(&params, "filtering"), None);
    }

    #[test]
    fn decode_reads_list_and_total() {
        let page = decode_page(
            r#"{"code":0,"message":"","data":{"list":[{"image_id":"1"},{"image_id":"2"}],
                "page_info":{"page":1,"page_size":100,"total_number":7,"total_page":1}}}"#,
        )
        .unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.total, 7);
        assert_eq!(page.records[1].get("image_id").str(), "2");
    }

    #[test]
    fn decode_treats_missing_list_as_empty() {
        let page = decode_page(r#"{"code":0,"data":{"page_info":{"total_number":3}}}"#).unwrap();
        assert_eq!(page, Page::default());

        let page = decode_page(r#"{"code":0,"data":{"list":[{"a":1}]}}"#).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn decode_surfaces_api_errors() {
        let err = decode_page(r#"{"code":11017,"message":"","message_cn":"账户不存在"}"#)
            .unwrap_err();
        match err {
            TransportError::Api { code, message } => {
                assert_eq!(code, 11017);
                assert_eq!(message, "账户不存在");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_object_entries() {
        let err = decode_page(r#"{"code":0,"data":{"list":[1],"page_info":{"total_number":1}}}"#)
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
