//! Harvesting from legacy (v2) ad creatives.

use tracing::{debug, info};

use crate::paginate::{Collection, Paginator};
use crate::provider::{CreativeFilters, Harvest};
use crate::record::Record;
use crate::set::ReferenceSet;
use crate::transport::{ApiVersion, Page, Resource};

use super::fields::{
    LEGACY_CREATIVE, LEGACY_CREATIVE_FIELDS, LEGACY_IMAGE, LEGACY_IMAGE_FIELDS, LEGACY_PAGE,
    LEGACY_PAGE_FIELDS, LEGACY_VIDEO, LEGACY_VIDEO_FIELDS,
};
use super::sink::AssetSink;
use super::scope;

/// Only landing pages of this type become assets.
const DEFAULT_PAGE_TYPE: &str = "PAGE_TYPE_DEFAULT";

const IMAGE_OPTION_GROUPS: [&str; 2] = ["image_component_options", "image3_component_options"];

pub(crate) fn creatives() -> Collection {
    Collection::new(ApiVersion::Legacy, Resource::Adcreatives, LEGACY_CREATIVE_FIELDS)
}

fn pages() -> Collection {
    Collection::new(ApiVersion::Legacy, Resource::Pages, LEGACY_PAGE_FIELDS)
}

fn images() -> Collection {
    Collection::new(ApiVersion::Legacy, Resource::Images, LEGACY_IMAGE_FIELDS)
}

fn videos() -> Collection {
    Collection::new(ApiVersion::Legacy, Resource::Videos, LEGACY_VIDEO_FIELDS)
}

/// Walks the remaining creative pages and turns their references into assets.
pub(crate) async fn harvest(
    paginator: &Paginator<'_>,
    account_id: i64,
    first: Page,
    filters: &CreativeFilters,
    only_adcreatives: bool,
) -> Harvest {
    let mut sink = AssetSink::new(account_id, ApiVersion::Legacy);
    let fetched = paginator.resume(&creatives(), first).await;
    let creatives = sink.absorb(fetched);
    let selected = filters.select(&creatives);
    info!(
        account_id,
        fetched = creatives.len(),
        selected = selected.len(),
        "scanning legacy creatives"
    );

    let mut references = LegacyReferences::default();
    for creative in selected {
        references.scan(creative, &mut sink);
    }
    references.resolve(paginator, only_adcreatives, &mut sink).await;

    info!(account_id, assets = sink.len(), "legacy harvest finished");
    sink.finish()
}

#[derive(Debug, Default)]
pub(crate) struct LegacyReferences {
    need_pages: bool,
    page_ids: ReferenceSet<String>,
    image_ids: ReferenceSet<String>,
    video_ids: ReferenceSet<String>,
}

impl LegacyReferences {
    /// Records what one creative references.
    ///
    /// A creative whose landing URL was already emitted is not scanned further.
    pub(crate) fn scan(&mut self, creative: &Record, sink: &mut AssetSink) {
        let spec = creative.get("page_spec");
        let url = spec.get("page_url").text();
        if !url.is_empty() {
            let sub_type = creative.get("page_type").text();
            if !sink.push_creative_page(creative, LEGACY_CREATIVE, sub_type, &url) {
                debug!(
                    creative = %creative.get(LEGACY_CREATIVE.id).text(),
                    %url,
                    "landing url already emitted; skipping creative"
                );
                return;
            }
        } else {
            self.need_pages = true;
            if let Some(page_id) = spec.get("page_id").int().filter(|id| *id > 0) {
                self.page_ids.add(page_id.to_string());
            }
        }

        let elements = creative.get("adcreative_elements");
        for option in elements.get("brand_component_options").objects() {
            self.image_ids
                .add_id(option.get("value.brand_img.image_id").text());
        }
        for group in IMAGE_OPTION_GROUPS {
            for option in elements.get(group).objects() {
                self.image_ids.add_id(option.get("value.image_id").text());
            }
        }
        for option in elements.get("video2_component_options").objects() {
            self.video_ids.add_id(option.get("value.video_id").text());
            self.image_ids
                .add_id(option.get("value.cover_image.image_id").text());
        }
    }

    /// Fetches pages, then images, then videos.
    pub(crate) async fn resolve(
        self,
        paginator: &Paginator<'_>,
        only_adcreatives: bool,
        sink: &mut AssetSink,
    ) {
        debug!(
            need_pages = self.need_pages,
            pages = self.page_ids.len(),
            images = self.image_ids.len(),
            videos = self.video_ids.len(),
            "legacy references collected"
        );

        if self.need_pages {
            let ids = scope(only_adcreatives, &self.page_ids);
            let fetched = paginator.fetch_by_ids(&pages(), LEGACY_PAGE.filter, &ids).await;
            for page in sink.absorb(fetched) {
                if page.get("page_type").str() == DEFAULT_PAGE_TYPE {
                    sink.push_page(&page, LEGACY_PAGE);
                }
            }
        }

        if !self.image_ids.is_empty() {
            let ids = scope(only_adcreatives, &self.image_ids);
            let fetched = paginator.fetch_by_ids(&images(), LEGACY_IMAGE.filter, &ids).await;
            for image in sink.absorb(fetched) {
                sink.push_image(&image, LEGACY_IMAGE);
            }
        }

        if !self.video_ids.is_empty() {
            let ids = scope(only_adcreatives, &self.video_ids);
            let fetched = paginator.fetch_by_ids(&videos(), LEGACY_VIDEO.filter, &ids).await;
            for video in sink.absorb(fetched) {
                sink.push_video(&video, LEGACY_VIDEO);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::asset::PageType;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn scan_collects_element_references() {
        let mut sink = AssetSink::new(1, ApiVersion::Legacy);
        let mut refs = LegacyReferences::default();
        refs.scan(
            &record(json!({
                "adcreative_id": 10,
                "page_spec": { "page_id": 77 },
                "adcreative_elements": {
                    "brand_component_options": [{ "value": { "brand_img": { "image_id": "brand-1" } } }],
                    "image_component_options": [{ "value": { "image_id": "img-1" } }],
                    "image3_component_options": [
                        { "value": { "image_id": "img-2" } },
                        { "value": { "image_id": "img-1" } }
                    ],
                    "video2_component_options": [
                        { "value": { "video_id": 555, "cover_image": { "image_id": "cover-1" } } }
                    ]
                }
            })),
            &mut sink,
        );

        assert!(refs.need_pages);
        assert_eq!(refs.page_ids.to_vec(), ["77"]);
        assert_eq!(refs.image_ids.to_vec(), ["brand-1", "img-1", "img-2", "cover-1"]);
        assert_eq!(refs.video_ids.to_vec(), ["555"]);
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn direct_landing_url_becomes_asset() {
        let mut sink = AssetSink::new(1, ApiVersion::Legacy);
        let mut refs = LegacyReferences::default();
        refs.scan(
            &record(json!({
                "adcreative_id": 10,
                "adcreative_name": "spring",
                "page_type": "PAGE_TYPE_DEFAULT",
                "page_spec": { "page_url": "https://landing/1" }
            })),
            &mut sink,
        );

        assert!(!refs.need_pages);
        let harvest = sink.finish();
        let asset = &harvest.assets[0];
        assert_eq!(asset.page_type, PageType::PageUrl);
        assert_eq!(asset.sub_type, "PAGE_TYPE_DEFAULT");
        assert_eq!(asset.asset_id, "10");
        assert_eq!(asset.primary_url(), "https://landing/1");
    }

    #[test]
    fn repeated_landing_url_skips_the_creative() {
        let mut sink = AssetSink::new(1, ApiVersion::Legacy);
        let mut refs = LegacyReferences::default();
        let first = record(json!({ "adcreative_id": 1, "page_spec": { "page_url": "https://same" } }));
        let second = record(json!({
            "adcreative_id": 2,
            "page_spec": { "page_url": "https://same" },
            "adcreative_elements": {
                "image_component_options": [{ "value": { "image_id": "img-9" } }]
            }
        }));
        refs.scan(&first, &mut sink);
        refs.scan(&second, &mut sink);

        assert_eq!(sink.len(), 1);
        assert!(refs.image_ids.is_empty());
    }

    #[test]
    fn missing_page_id_still_requests_pages() {
        let mut sink = AssetSink::new(1, ApiVersion::Legacy);
        let mut refs = LegacyReferences::default();
        refs.scan(&record(json!({ "page_spec": { "page_id": 0 } })), &mut sink);

        assert!(refs.need_pages);
        assert!(refs.page_ids.is_empty());
    }
}
