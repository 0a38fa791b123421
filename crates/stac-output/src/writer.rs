//! Output directory layout and document writers.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use stac_model::{Collection, Item};

use crate::error::OutputResult;

/// How generated documents are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON file: the collection with all items inlined under
    /// `features`.
    JsonFull,
    /// Collection JSON without items, plus `inline_items.csv` with one
    /// compact JSON item per line (one catalog record per line, ready for
    /// bulk ingestion).
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Csv
    }
}

/// Where and how to write the outputs of one collection build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLayout {
    /// Output directory. Created if missing.
    pub folder: PathBuf,

    /// Collection file name. A `.json` suffix is appended when missing.
    pub collection_file: String,

    pub format: OutputFormat,

    /// In `csv` mode, also write a pretty-printed `items/{id}.json` per
    /// item for inspection.
    pub write_json_items: bool,
}

impl OutputLayout {
    pub fn new(folder: impl Into<PathBuf>, collection_id: &str) -> Self {
        Self {
            folder: folder.into(),
            collection_file: format!("{collection_id}.json"),
            format: OutputFormat::default(),
            write_json_items: true,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_collection_file(mut self, name: impl Into<String>) -> Self {
        let mut name = name.into();
        if !name.ends_with(".json") {
            name.push_str(".json");
        }
        self.collection_file = name;
        self
    }

    pub fn with_write_json_items(mut self, write_json_items: bool) -> Self {
        self.write_json_items = write_json_items;
        self
    }

    fn collection_path(&self) -> PathBuf {
        self.folder.join(&self.collection_file)
    }
}

/// Paths written by one output run, in write order.
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    pub files: Vec<PathBuf>,
}

impl WrittenFiles {
    fn push(&mut self, path: PathBuf) {
        self.files.push(path);
    }
}

/// Write the collection and item documents per the layout.
///
/// In `json_full` mode the items are moved into the collection's
/// `features` before serialization; in `csv` mode the collection is
/// written without features and items go to `inline_items.csv`
/// (plus per-item JSON files when enabled).
pub fn write_outputs(
    layout: &OutputLayout,
    mut collection: Collection,
    items: Vec<Item>,
) -> OutputResult<WrittenFiles> {
    fs::create_dir_all(&layout.folder)?;

    let mut written = WrittenFiles::default();

    match layout.format {
        OutputFormat::JsonFull => {
            collection.features = items;

            let path = layout.collection_path();
            fs::write(&path, serde_json::to_string_pretty(&collection)?)?;
            debug!(path = %path.display(), "Wrote collection with inlined items");
            written.push(path);
        }
        OutputFormat::Csv => {
            let csv_path = layout.folder.join("inline_items.csv");
            let mut lines = String::new();
            for item in &items {
                lines.push_str(&serde_json::to_string(item)?);
                lines.push('\n');
            }
            fs::write(&csv_path, lines)?;
            debug!(path = %csv_path.display(), items = items.len(), "Wrote item lines");
            written.push(csv_path);

            if layout.write_json_items {
                let items_dir = layout.folder.join("items");
                fs::create_dir_all(&items_dir)?;
                for item in &items {
                    let item_path = items_dir.join(format!("{}.json", item.id));
                    fs::write(&item_path, serde_json::to_string_pretty(item)?)?;
                    written.push(item_path);
                }
            }

            let path = layout.collection_path();
            fs::write(&path, serde_json::to_string_pretty(&collection)?)?;
            debug!(path = %path.display(), "Wrote collection");
            written.push(path);
        }
    }

    info!(
        folder = %layout.folder.display(),
        files = written.files.len(),
        "Catalog outputs written"
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use extent_aggregator::{to_cube_dimensions, DimensionNames, ExtentAccumulator};
    use stac_common::{AssetRef, BandSet, BoundingBox, Crs, ItemMetadata, TemporalInterval};
    use stac_model::Extent;

    fn build_docs() -> (Collection, Vec<Item>) {
        let t = TemporalInterval::parse_iso8601("2023-06-01T10:30:00Z").unwrap();
        let meta = ItemMetadata::new(
            "20230601103000",
            BoundingBox::new(10.0, 45.0, 12.0, 47.0),
            TemporalInterval::instant(t),
            BandSet::from(vec!["B02"]),
        )
        .with_asset("B02", AssetRef::new("B02.tif"));

        let mut acc = ExtentAccumulator::new();
        acc.fold(&meta).unwrap();
        let extent = acc.finalize().unwrap();

        let cube = to_cube_dimensions(
            &extent,
            &DimensionNames::default(),
            Crs::WGS84,
            None,
            None,
        );
        let collection = Collection::new(
            "test-collection",
            "test",
            Extent::from_collection_extent(&extent),
            cube,
        );

        let mut item = Item::from_metadata(&meta, "test-collection");
        item.build_links("https://stac.example.org/api", "test-collection");

        (collection, vec![item])
    }

    #[test]
    fn test_json_full_output() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "test-collection")
            .with_format(OutputFormat::JsonFull);

        let (collection, items) = build_docs();
        let written = write_outputs(&layout, collection, items).unwrap();

        assert_eq!(written.files.len(), 1);
        let text = fs::read_to_string(&written.files[0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["type"], "Collection");
        assert_eq!(json["features"][0]["id"], "20230601103000");
    }

    #[test]
    fn test_csv_output() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "test-collection");

        let (collection, items) = build_docs();
        write_outputs(&layout, collection, items).unwrap();

        let csv = fs::read_to_string(dir.path().join("inline_items.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1);
        // compact, one record per line
        assert!(!lines[0].contains('\n'));
        let item: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(item["id"], "20230601103000");

        // per-item pretty JSON
        let item_file = dir.path().join("items/20230601103000.json");
        assert!(item_file.exists());

        // collection written without features
        let coll: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("test-collection.json")).unwrap(),
        )
        .unwrap();
        assert!(coll.get("features").is_none());
    }

    #[test]
    fn test_csv_output_without_json_items() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "test-collection")
            .with_write_json_items(false);

        let (collection, items) = build_docs();
        write_outputs(&layout, collection, items).unwrap();

        assert!(!dir.path().join("items").exists());
    }

    #[test]
    fn test_collection_file_suffix() {
        let layout =
            OutputLayout::new("/tmp/x", "c").with_collection_file("custom-name");
        assert_eq!(layout.collection_file, "custom-name.json");

        let layout = OutputLayout::new("/tmp/x", "c").with_collection_file("done.json");
        assert_eq!(layout.collection_file, "done.json");
    }

}
