//! Harvesting from dynamic (v3) creatives.
//!
//! Dynamic creatives describe their material as typed components. Jump
//! components point at landing pages, media components at images and videos,
//! and description or floating-zone components carry the creative's copy,
//! which is emitted as text assets grouped by component.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::paginate::{Collection, Fetched, Paginator};
use crate::provider::{CreativeFilters, Harvest};
use crate::record::{Field, Record};
use crate::set::ReferenceSet;
use crate::transport::{ApiVersion, Filter, Page, Resource};

use super::fields::{
    DYNAMIC_CREATIVE, DYNAMIC_CREATIVE_FIELDS, DYNAMIC_IMAGE, DYNAMIC_IMAGE_FIELDS, DYNAMIC_PAGE,
    DYNAMIC_VIDEO, DYNAMIC_VIDEO_FIELDS, WECHAT_PAGE_FIELDS, XIJING_PAGE_FIELDS,
    XIJING_PAGE_TYPES,
};
use super::scope;
use super::sink::AssetSink;

const WECHAT_CANVAS: &str = "PAGE_TYPE_WECHAT_CANVAS";
const XIJING_PREFIX: &str = "PAGE_TYPE_XIJING";
const CHANNELS_PROFILE: &str = "PAGE_TYPE_WECHAT_CHANNELS_PROFILE";
const FLOATING_ZONE_TEXTS: [&str; 3] = [
    "value.floating_zone_button_text",
    "value.floating_zone_desc",
    "value.floating_zone_name",
];

pub(crate) fn creatives() -> Collection {
    Collection::new(
        ApiVersion::Dynamic,
        Resource::DynamicCreatives,
        DYNAMIC_CREATIVE_FIELDS,
    )
}

fn images() -> Collection {
    Collection::new(ApiVersion::Dynamic, Resource::Images, DYNAMIC_IMAGE_FIELDS)
}

fn videos() -> Collection {
    Collection::new(ApiVersion::Dynamic, Resource::Videos, DYNAMIC_VIDEO_FIELDS)
}

/// Landing-page collections a dynamic creative can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PageCollection {
    Wechat,
    Xijing,
}

impl PageCollection {
    pub(crate) fn for_page_type(page_type: &str) -> Option<Self> {
        if page_type == WECHAT_CANVAS {
            Some(Self::Wechat)
        } else if page_type.starts_with(XIJING_PREFIX) {
            Some(Self::Xijing)
        } else {
            None
        }
    }

    async fn fetch(self, paginator: &Paginator<'_>, page_ids: &[String]) -> Fetched {
        match self {
            Self::Wechat => {
                let wechat = Collection::new(
                    ApiVersion::Dynamic,
                    Resource::WechatPages,
                    WECHAT_PAGE_FIELDS,
                );
                paginator
                    .fetch_by_ids(&wechat, DYNAMIC_PAGE.filter, page_ids)
                    .await
            }
            Self::Xijing => {
                let mut fetched = Fetched::default();
                for page_type in XIJING_PAGE_TYPES {
                    let xijing = Collection::new(
                        ApiVersion::Dynamic,
                        Resource::XijingPages,
                        XIJING_PAGE_FIELDS,
                    )
                    .with_filter(Filter::Equals {
                        field: "page_type",
                        value: page_type.to_string(),
                    });
                    fetched.merge(paginator.fetch_all(&xijing).await);
                }
                fetched
            }
        }
    }
}

/// Walks the remaining creative pages and turns their references into assets.
pub(crate) async fn harvest(
    paginator: &Paginator<'_>,
    account_id: i64,
    first: Page,
    filters: &CreativeFilters,
    only_adcreatives: bool,
) -> Harvest {
    let mut sink = AssetSink::new(account_id, ApiVersion::Dynamic);
    let fetched = paginator.resume(&creatives(), first).await;
    let creatives = sink.absorb(fetched);
    let selected = filters.select(&creatives);
    info!(
        account_id,
        fetched = creatives.len(),
        selected = selected.len(),
        "scanning dynamic creatives"
    );

    let mut references = DynamicReferences::default();
    for creative in selected {
        references.scan(creative, &mut sink);
    }
    references.resolve(paginator, only_adcreatives, &mut sink).await;

    info!(account_id, assets = sink.len(), "dynamic harvest finished");
    sink.finish()
}

#[derive(Debug, Default)]
pub(crate) struct DynamicReferences {
    page_collections: ReferenceSet<PageCollection>,
    page_ids: ReferenceSet<String>,
    image_ids: ReferenceSet<String>,
    video_ids: ReferenceSet<String>,
    needs_profiles: bool,
    /// Texts per component id, both in first-seen order.
    texts: IndexMap<String, Vec<String>>,
}

impl DynamicReferences {
    pub(crate) fn scan(&mut self, creative: &Record, sink: &mut AssetSink) {
        let components = creative.get("creative_components");

        for jump in components.get("main_jump_info").objects() {
            self.scan_jump(creative, jump, sink);
        }
        for brand in components.get("brand").objects() {
            if brand.get("value.page_type").str() == CHANNELS_PROFILE {
                self.needs_profiles = true;
            }
        }
        for video in components.get("video").objects() {
            self.video_ids.add_id(video.get("value.video_id").text());
        }
        for image in components.get("image").objects() {
            self.image_ids.add_id(image.get("value.image_id").text());
        }
        for description in components.get("description").objects() {
            let text = description.get("value.content").text();
            self.add_text(description, text);
        }
        for zone in components.get("floating_zone").objects() {
            for path in FLOATING_ZONE_TEXTS {
                let text = zone.get(path).text();
                self.add_text(zone, text);
            }
            self.image_ids
                .add_id(zone.get("value.floating_zone_image_id").text());
        }
    }

    fn scan_jump(&mut self, creative: &Record, jump: Field<'_>, sink: &mut AssetSink) {
        let page_type = jump.get("value.page_type").text();
        let spec = jump.get("value.page_spec");

        let canvas_id = spec.get("wechat_canvas_spec.page_id").text();
        if !canvas_id.trim().is_empty() {
            self.page_ids.add_id(canvas_id);
            self.page_collections.add(PageCollection::Wechat);
        } else {
            let url = spec.get("h5_spec.page_url").text();
            if !url.is_empty()
                && !sink.push_creative_page(creative, DYNAMIC_CREATIVE, page_type.clone(), &url)
            {
                debug!(%url, "landing url already emitted; skipping jump component");
                return;
            }
        }

        if let Some(collection) = PageCollection::for_page_type(&page_type) {
            self.page_collections.add(collection);
        }
    }

    fn add_text(&mut self, component: Field<'_>, text: String) {
        if text.trim().is_empty() {
            return;
        }
        let component_id = component.get("component_id").text();
        if component_id.is_empty() {
            return;
        }

        let texts = self.texts.entry(component_id).or_default();
        if !texts.contains(&text) {
            texts.push(text);
        }
    }

    /// Fetches pages, then videos, then images, then emits text assets.
    pub(crate) async fn resolve(
        self,
        paginator: &Paginator<'_>,
        only_adcreatives: bool,
        sink: &mut AssetSink,
    ) {
        debug!(
            collections = ?self.page_collections.to_vec(),
            pages = self.page_ids.len(),
            images = self.image_ids.len(),
            videos = self.video_ids.len(),
            texts = self.texts.len(),
            needs_profiles = self.needs_profiles,
            "dynamic references collected"
        );

        let page_ids = scope(only_adcreatives, &self.page_ids);
        for collection in self.page_collections.iter() {
            let fetched = collection.fetch(paginator, &page_ids).await;
            for page in sink.absorb(fetched) {
                sink.push_page(&page, DYNAMIC_PAGE);
            }
        }

        if !self.video_ids.is_empty() {
            let ids = scope(only_adcreatives, &self.video_ids);
            let fetched = paginator.fetch_by_ids(&videos(), DYNAMIC_VIDEO.filter, &ids).await;
            for video in sink.absorb(fetched) {
                sink.push_video(&video, DYNAMIC_VIDEO);
            }
        }

        if !self.image_ids.is_empty() {
            let ids = scope(only_adcreatives, &self.image_ids);
            let fetched = paginator.fetch_by_ids(&images(), DYNAMIC_IMAGE.filter, &ids).await;
            for image in sink.absorb(fetched) {
                sink.push_image(&image, DYNAMIC_IMAGE);
            }
        }

        for (component_id, texts) in self.texts {
            sink.push_text(&component_id, texts);
        }
    }
}
