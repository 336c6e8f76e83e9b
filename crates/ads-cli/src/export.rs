//! CSV export of harvested assets.
//!
//! One row per asset with multi-valued columns flattened: texts and
//! sub-assets are joined with `|`, sub-assets rendered as `Type:url`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ads_core::Asset;
use anyhow::{Context, Result};
use csv::Writer;

pub const HEADER: [&str; 10] = [
    "AccountID",
    "AccountName",
    "AssetID",
    "Name",
    "PageType",
    "SubType",
    "Texts",
    "SubAssets",
    "Signature",
    "Version",
];

const LIST_SEPARATOR: &str = "|";

/// CSV sink that writes the header once, on creation.
pub struct AssetCsv<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl AssetCsv<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Self::from_writer(file)
    }
}

impl<W: Write> AssetCsv<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = Writer::from_writer(inner);
        writer
            .write_record(HEADER)
            .context("Failed to write CSV header")?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, asset: &Asset) -> Result<()> {
        self.writer
            .write_record(row(asset))
            .with_context(|| format!("Failed to write CSV row for asset {}", asset.asset_id))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Failed to flush CSV output: {}", err.error()))
    }
}

pub fn row(asset: &Asset) -> [String; 10] {
    let sub_assets = asset
        .sub_assets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);

    [
        asset.account_id.clone(),
        asset.account_name.clone(),
        asset.asset_id.clone(),
        asset.name.clone(),
        asset.page_type.to_string(),
        asset.sub_type.clone(),
        asset.texts.join(LIST_SEPARATOR),
        sub_assets,
        asset.signature.clone(),
        asset.version.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use ads_core::{PageType, SubAsset};

    use super::*;

    fn video() -> Asset {
        Asset {
            account_id: "1001".into(),
            asset_id: "555".into(),
            name: "clip".into(),
            page_type: PageType::Video,
            sub_type: "MEDIA_TYPE_MP4".into(),
            sub_assets: vec![
                SubAsset::image("https://cdn/frame.jpg"),
                SubAsset::video("https://cdn/clip.mp4"),
            ],
            signature: "abc".into(),
            version: "v2".into(),
            ..Asset::default()
        }
    }

    #[test]
    fn row_flattens_lists() {
        let mut text = Asset {
            page_type: PageType::Text,
            texts: vec!["Buy now".into(), "Go".into()],
            ..Asset::default()
        };
        text.asset_id = "20".into();

        let cells = row(&text);
        assert_eq!(cells[4], "Text");
        assert_eq!(cells[6], "Buy now|Go");
        assert_eq!(cells[7], "");

        let cells = row(&video());
        assert_eq!(
            cells[7],
            "Image:https://cdn/frame.jpg|Video:https://cdn/clip.mp4"
        );
    }

    #[test]
    fn header_is_written_once() {
        let mut csv = AssetCsv::from_writer(Vec::new()).unwrap();
        csv.write(&video()).unwrap();
        csv.write(&video()).unwrap();
        assert_eq!(csv.rows(), 2);

        let output = String::from_utf8(csv.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "AccountID,AccountName,AssetID,Name,PageType,SubType,Texts,SubAssets,Signature,Version"
        );
        assert!(lines[1].starts_with("1001,,555,clip,Video,MEDIA_TYPE_MP4,"));
    }
}
