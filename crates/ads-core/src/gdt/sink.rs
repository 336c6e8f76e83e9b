//! Accumulates assets for one harvest, deduplicating page URLs.

use std::collections::HashSet;

use crate::asset::{Asset, PageType, SubAsset};
use crate::paginate::{FetchWarning, Fetched};
use crate::provider::Harvest;
use crate::record::Record;
use crate::transport::ApiVersion;

use super::fields::{CreativeKeys, FieldMap};

pub(crate) struct AssetSink {
    account_id: String,
    version: ApiVersion,
    seen_urls: HashSet<String>,
    assets: Vec<Asset>,
    warnings: Vec<FetchWarning>,
}

impl AssetSink {
    pub(crate) fn new(account_id: i64, version: ApiVersion) -> Self {
        Self {
            account_id: account_id.to_string(),
            version,
            seen_urls: HashSet::new(),
            assets: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn asset(&self, page_type: PageType) -> Asset {
        Asset {
            account_id: self.account_id.clone(),
            page_type,
            version: self.version.label().to_string(),
            ..Asset::default()
        }
    }

    /// Takes the records of a fetch and keeps its warnings.
    pub(crate) fn absorb(&mut self, fetched: Fetched) -> Vec<Record> {
        self.warnings.extend(fetched.warnings);
        fetched.records
    }

    /// Emits a page URL asset taken straight from a creative.
    ///
    /// Returns false when the URL was already emitted in this harvest.
    pub(crate) fn push_creative_page(
        &mut self,
        creative: &Record,
        keys: CreativeKeys,
        sub_type: String,
        url: &str,
    ) -> bool {
        if url.is_empty() || !self.seen_urls.insert(url.to_string()) {
            return false;
        }
        let asset = Asset {
            asset_id: creative.get(keys.id).text(),
            name: creative.get(keys.name).text(),
            sub_type,
            sub_assets: vec![SubAsset::page_url(url)],
            ..self.asset(PageType::PageUrl)
        };
        self.assets.push(asset);
        true
    }

    /// Emits a page URL asset for a resolved page record.
    ///
    /// Records without a preview URL, or whose URL was already emitted, are skipped.
    pub(crate) fn push_page(&mut self, page: &Record, map: FieldMap) -> bool {
        let url = page.get(map.url).text();
        if url.is_empty() || !self.seen_urls.insert(url.clone()) {
            return false;
        }
        let asset = Asset {
            asset_id: page.get(map.id).text(),
            name: page.get(map.name).text(),
            sub_type: optional(page, map.sub_type),
            sub_assets: vec![SubAsset::page_url(url)],
            ..self.asset(PageType::PageUrl)
        };
        self.assets.push(asset);
        true
    }

    pub(crate) fn push_image(&mut self, image: &Record, map: FieldMap) {
        let asset = Asset {
            asset_id: image.get(map.id).text(),
            name: image.get(map.name).text(),
            sub_type: optional(image, map.sub_type),
            signature: optional(image, map.signature),
            sub_assets: vec![SubAsset::image(image.get(map.url).text())],
            ..self.asset(PageType::Image)
        };
        self.assets.push(asset);
    }

    pub(crate) fn push_video(&mut self, video: &Record, map: FieldMap) {
        let mut sub_assets = Vec::with_capacity(2);
        let key_frame = optional(video, map.key_frame);
        if !key_frame.is_empty() {
            sub_assets.push(SubAsset::image(key_frame));
        }
        sub_assets.push(SubAsset::video(video.get(map.url).text()));

        let asset = Asset {
            asset_id: video.get(map.id).text(),
            name: video.get(map.name).text(),
            sub_type: optional(video, map.sub_type),
            signature: optional(video, map.signature),
            sub_assets,
            ..self.asset(PageType::Video)
        };
        self.assets.push(asset);
    }

    pub(crate) fn push_text(&mut self, component_id: &str, texts: Vec<String>) {
        let asset = Asset {
            asset_id: component_id.to_string(),
            texts,
            ..self.asset(PageType::Text)
        };
        self.assets.push(asset);
    }

    pub(crate) fn len(&self) -> usize {
        self.assets.len()
    }

    pub(crate) fn finish(self) -> Harvest {
        Harvest {
            version: Some(self.version),
            assets: self.assets,
            warnings: self.warnings,
        }
    }
}

fn optional(record: &Record, key: Option<&str>) -> String {
    key.map(|key| record.get(key).text()).unwrap_or_default()
}
