//! Attribute allow-lists and per-version field names.

pub const LEGACY_CREATIVE_FIELDS: &[&str] = &[
    "adcreative_id",
    "adcreative_name",
    "campaign_id",
    "promoted_object_type",
    "adcreative_template_id",
    "adcreative_elements",
    "created_time",
    "last_modified_time",
    "page_type",
    "page_spec",
    "is_deleted",
];

pub const LEGACY_PAGE_FIELDS: &[&str] = &[
    "page_id",
    "page_name",
    "page_type",
    "preview_url",
    "created_time",
    "last_modified_time",
];

pub const LEGACY_IMAGE_FIELDS: &[&str] = &[
    "image_id",
    "image_name",
    "width",
    "height",
    "signature",
    "preview_url",
    "created_time",
    "last_modified_time",
    "source_type",
    "status",
];

pub const LEGACY_VIDEO_FIELDS: &[&str] = &[
    "video_id",
    "video_name",
    "signature",
    "width",
    "height",
    "created_time",
    "last_modified_time",
    "source_type",
    "preview_url",
    "key_frame_image_url",
    "type",
    "status",
];

pub const DYNAMIC_CREATIVE_FIELDS: &[&str] = &[
    "dynamic_creative_id",
    "dynamic_creative_name",
    "dynamic_creative_type",
    "adgroup_id",
    "delivery_mode",
    "configured_status",
    "adgroup.campaign_type",
    "created_time",
    "last_modified_time",
    "creative_components",
    "is_deleted",
];

pub const WECHAT_PAGE_FIELDS: &[&str] = &[
    "page_id",
    "page_name",
    "adcreative_template_id",
    "marketing_goal",
    "marketing_sub_goal",
    "marketing_target_type",
    "marketing_carrier_type",
    "page_type",
    "marketing_carrier_id",
    "canvas_type",
    "page_status",
    "site_set",
    "marketing_scene",
    "source_type",
    "preview_url",
    "product_catalog_id",
    "product_source",
    "raw_adcreative_template_id",
    "buying_type",
    "product_mode",
];

/// The Xijing page list takes no field selection.
pub const XIJING_PAGE_FIELDS: &[&str] = &[];

pub const DYNAMIC_IMAGE_FIELDS: &[&str] = &[
    "image_id",
    "description",
    "type",
    "signature",
    "preview_url",
    "width",
    "height",
    "created_time",
    "last_modified_time",
    "source_type",
    "status",
];

pub const DYNAMIC_VIDEO_FIELDS: &[&str] = &[
    "video_id",
    "description",
    "type",
    "signature",
    "preview_url",
    "key_frame_image_url",
    "width",
    "height",
    "created_time",
    "last_modified_time",
    "source_type",
    "status",
];

pub const XIJING_PAGE_TYPES: [&str; 8] = [
    "XJ_DEFAULT_H5",
    "XJ_ANDROID_APP_H5",
    "XJ_IOS_APP_H5",
    "XJ_WEBSITE_H5",
    "XJ_ANDROID_APP_NATIVE",
    "XJ_IOS_APP_NATIVE",
    "XJ_WEBSITE_NATIVE",
    "XJ_FENGLING_LBS",
];

/// Where identity and media live on a fetched record.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub filter: &'static str,
    pub signature: Option<&'static str>,
    pub sub_type: Option<&'static str>,
    pub key_frame: Option<&'static str>,
}

pub const LEGACY_PAGE: FieldMap = FieldMap {
    id: "page_id",
    name: "page_name",
    url: "preview_url",
    filter: "page_id",
    signature: None,
    sub_type: Some("page_type"),
    key_frame: None,
};

pub const LEGACY_IMAGE: FieldMap = FieldMap {
    id: "image_id",
    name: "image_name",
    url: "preview_url",
    filter: "image_id",
    signature: Some("signature"),
    sub_type: None,
    key_frame: None,
};

pub const LEGACY_VIDEO: FieldMap = FieldMap {
    id: "video_id",
    name: "video_name",
    url: "preview_url",
    filter: "video_id",
    signature: Some("signature"),
    sub_type: Some("type"),
    key_frame: Some("key_frame_image_url"),
};

pub const DYNAMIC_PAGE: FieldMap = FieldMap {
    id: "page_id",
    name: "page_name",
    url: "preview_url",
    filter: "page_id",
    signature: None,
    sub_type: Some("page_type"),
    key_frame: None,
};

pub const DYNAMIC_IMAGE: FieldMap = FieldMap {
    id: "image_id",
    name: "description",
    url: "preview_url",
    filter: "image_id",
    signature: Some("signature"),
    sub_type: Some("type"),
    key_frame: None,
};

pub const DYNAMIC_VIDEO: FieldMap = FieldMap {
    id: "video_id",
    name: "description",
    url: "preview_url",
    filter: "media_id",
    signature: Some("signature"),
    sub_type: Some("type"),
    key_frame: Some("key_frame_image_url"),
};

/// Identity keys of a creative record.
#[derive(Debug, Clone, Copy)]
pub struct CreativeKeys {
    pub id: &'static str,
    pub name: &'static str,
}

pub const LEGACY_CREATIVE: CreativeKeys = CreativeKeys {
    id: "adcreative_id",
    name: "adcreative_name",
};

pub const DYNAMIC_CREATIVE: CreativeKeys = CreativeKeys {
    id: "dynamic_creative_id",
    name: "dynamic_creative_name",
};
