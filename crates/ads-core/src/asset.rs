use std::fmt;

use serde::Serialize;

/// Discriminates which kind of creative material an [`Asset`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PageType {
    #[default]
    Unknown,
    PageUrl,
    Video,
    Image,
    Text,
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PageType::Unknown => "Unknown",
            PageType::PageUrl => "PageUrl",
            PageType::Video => "Video",
            PageType::Image => "Image",
            PageType::Text => "Text",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SubAssetType {
    #[default]
    Unknown,
    Image,
    Video,
    PageUrl,
}

impl fmt::Display for SubAssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubAssetType::Unknown => "Unknown",
            SubAssetType::Image => "Image",
            SubAssetType::Video => "Video",
            SubAssetType::PageUrl => "PageUrl",
        };
        f.write_str(label)
    }
}

/// One concrete media or URL facet of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubAsset {
    #[serde(rename = "type")]
    pub kind: SubAssetType,
    pub url: String,
}

impl SubAsset {
    pub fn new(kind: SubAssetType, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn page_url(url: impl Into<String>) -> Self {
        Self::new(SubAssetType::PageUrl, url)
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(SubAssetType::Image, url)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::new(SubAssetType::Video, url)
    }
}

impl fmt::Display for SubAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.url)
    }
}

/// A normalized creative asset harvested from an ad platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Asset {
    pub account_id: String,
    pub account_name: String,
    pub asset_id: String,
    pub name: String,
    pub page_type: PageType,
    /// Provider-specific creative or template category.
    pub sub_type: String,
    /// Only populated for [`PageType::Text`] assets.
    pub texts: Vec<String>,
    pub sub_assets: Vec<SubAsset>,
    pub signature: String,
    /// API version that produced the asset ("v2" or "v3").
    pub version: String,
}

impl Asset {
    /// Returns the URL that best represents the asset.
    ///
    /// Video assets only answer with their playable URL; key-frame images never
    /// stand in for it. Every other kind answers with its first sub-asset.
    pub fn primary_url(&self) -> &str {
        if self.page_type == PageType::Video {
            return self
                .sub_assets
                .iter()
                .find(|sub| sub.kind == SubAssetType::Video)
                .map(|sub| sub.url.as_str())
                .unwrap_or("");
        }

        self.sub_assets
            .first()
            .map(|sub| sub.url.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(page_type: PageType, sub_assets: Vec<SubAsset>) -> Asset {
        Asset {
            page_type,
            sub_assets,
            ..Asset::default()
        }
    }

    #[test]
    fn video_primary_url_skips_key_frames() {
        let video = asset(
            PageType::Video,
            vec![
                SubAsset::image("https://cdn/frame.jpg"),
                SubAsset::image("https://cdn/frame2.jpg"),
                SubAsset::video("https://cdn/clip.mp4"),
            ],
        );
        assert_eq!(video.primary_url(), "https://cdn/clip.mp4");
    }

    #[test]
    fn video_without_playable_url_is_empty() {
        let video = asset(PageType::Video, vec![SubAsset::image("https://cdn/frame.jpg")]);
        assert_eq!(video.primary_url(), "");
    }

    #[test]
    fn other_kinds_use_first_sub_asset() {
        let image = asset(
            PageType::Image,
            vec![
                SubAsset::image("https://cdn/a.png"),
                SubAsset::video("https://cdn/b.mp4"),
            ],
        );
        assert_eq!(image.primary_url(), "https://cdn/a.png");

        let text = asset(PageType::Text, Vec::new());
        assert_eq!(text.primary_url(), "");
    }

    #[test]
    fn sub_asset_display_is_kind_and_url() {
        let sub = SubAsset::page_url("https://x/1");
        assert_eq!(sub.to_string(), "PageUrl:https://x/1");
    }
}
