//! Collection build pipeline.
//!
//! Aggregates granule metadata into a collection extent, assembles the
//! STAC documents, writes them to the output directory, and optionally
//! uploads the directory to object storage.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, instrument};

use extent_aggregator::{aggregate_parallel, to_cube_dimensions};
use stac_common::time::compact_timestamp;
use stac_common::{Crs, ItemMetadata};
use stac_model::{Collection, Extent, Item};
use stac_output::{upload_output_directory, write_outputs, ObjectStorage, OutputLayout};

use crate::config::BuilderConfig;

/// Result of one collection build run.
#[derive(Debug)]
pub struct BuildSummary {
    pub collection_id: String,
    pub item_count: u64,
    pub output_folder: PathBuf,
    pub files_written: usize,
    pub uploaded_bytes: Option<u64>,
}

/// Run the full build: aggregate, assemble, write, upload.
#[instrument(skip_all, fields(collection = %config.collection.id, granules = items.len()))]
pub async fn run(config: &BuilderConfig, items: Vec<ItemMetadata>) -> Result<BuildSummary> {
    let items = assign_item_ids(&config.collection.item_prefix, items);

    // Aggregate extents across all granules.
    let mut accumulator = aggregate_parallel(&items)?;
    let extent = accumulator.finalize()?;
    info!(
        bbox = ?extent.spatial.to_vec(),
        bands = %extent.bands,
        items = extent.item_count,
        "Aggregated collection extent"
    );

    let crs = Crs::from_authority_string(&config.datacube.crs)?;
    let cube = to_cube_dimensions(
        &extent,
        &config.datacube.dimensions,
        crs,
        config.datacube.resolution_x,
        config.datacube.resolution_y,
    );

    // Assemble the collection document.
    let mut collection = Collection::new(
        &config.collection.id,
        &config.collection.description,
        Extent::from_collection_extent(&extent),
        cube,
    )
    .with_scientific(
        config.collection.sci_doi.clone(),
        config.collection.sci_citation.clone(),
    )
    .with_eo_band_summaries(eo_band_summaries(&items, &extent.bands.to_vec()));

    if let Some(title) = &config.collection.title {
        collection = collection.with_title(title);
    }
    if let Some(keywords) = &config.collection.keywords {
        collection = collection.with_keywords(keywords.clone());
    }
    if let Some(license) = &config.collection.license {
        collection = collection.with_license(license);
    }
    if let Some(providers) = &config.collection.providers {
        collection = collection.with_providers(providers.clone());
    }
    if let Some(version) = &config.collection.version {
        collection = collection.with_version(version);
    }

    if let Some(url) = &config.collection.url {
        collection.build_links(url, &config.collection.extra_links);
    }

    // Assemble the item documents.
    let item_docs: Vec<Item> = items
        .iter()
        .map(|meta| {
            let mut doc = Item::from_metadata(meta, &config.collection.id);
            if let Some(url) = &config.collection.url {
                doc.build_links(url, &config.collection.id);
            }
            doc
        })
        .collect();

    // Write outputs.
    let folder = config
        .output
        .folder
        .clone()
        .unwrap_or_else(|| PathBuf::from(Utc::now().format("%Y%m%d%H%M%S%3f").to_string()));

    let mut layout = OutputLayout::new(&folder, &config.collection.id)
        .with_format(config.output.format)
        .with_write_json_items(config.output.write_json_items);
    if let Some(file) = &config.output.file {
        layout = layout.with_collection_file(file);
    }

    let written = write_outputs(&layout, collection, item_docs)?;

    // Optional upload.
    let uploaded_bytes = if config.upload.s3_upload {
        let storage = ObjectStorage::new(&config.upload.storage)?;
        let bytes = upload_output_directory(&storage, &folder, &config.upload.key_prefix)
            .await
            .context("Upload of catalog outputs failed")?;
        info!(bytes, prefix = %config.upload.key_prefix, "Uploaded catalog outputs");
        Some(bytes)
    } else {
        None
    };

    Ok(BuildSummary {
        collection_id: config.collection.id.clone(),
        item_count: extent.item_count,
        output_folder: folder,
        files_written: written.files.len(),
        uploaded_bytes,
    })
}

/// Assign catalog item ids: `{prefix}_{yyyymmddhhmmss}` from the
/// acquisition start, prefix omitted when empty.
///
/// Manifest ids are advisory; deriving the catalog id from the timestamp
/// keeps it stable across re-runs of the introspection step.
fn assign_item_ids(prefix: &str, items: Vec<ItemMetadata>) -> Vec<ItemMetadata> {
    items
        .into_iter()
        .map(|mut item| {
            let stamp = compact_timestamp(&item.temporal.start);
            item.id = if prefix.is_empty() {
                stamp
            } else {
                format!("{prefix}_{stamp}")
            };
            item
        })
        .collect()
}

/// Build the `summaries.eo:bands` enumeration.
///
/// Prefers the eo:bands payload attached to granule assets by the
/// introspection collaborator; falls back to a name-only entry per band.
fn eo_band_summaries(items: &[ItemMetadata], bands: &[String]) -> Value {
    let entries: Vec<Value> = bands
        .iter()
        .map(|band| {
            items
                .iter()
                .filter_map(|item| item.assets.get(band))
                .filter_map(|asset| asset.extra_fields.get("eo:bands"))
                .filter_map(|v| v.as_array())
                .filter_map(|arr| arr.first())
                .next()
                .cloned()
                .unwrap_or_else(|| serde_json::json!({ "name": band }))
        })
        .collect();

    Value::Array(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stac_common::{AssetRef, BandSet, BoundingBox, TemporalInterval};

    fn meta(id: &str, bands: Vec<&str>) -> ItemMetadata {
        let t = TemporalInterval::parse_iso8601("2023-06-01T10:30:00Z").unwrap();
        ItemMetadata::new(
            id,
            BoundingBox::new(10.0, 45.0, 12.0, 47.0),
            TemporalInterval::instant(t),
            BandSet::from(bands),
        )
    }

    #[test]
    fn test_assign_item_ids_from_timestamp() {
        // the manifest id is replaced, not trusted
        let items = assign_item_ids("s2", vec![meta("granule-a", vec!["B02"])]);
        assert_eq!(items[0].id, "s2_20230601103000");

        let items = assign_item_ids("", vec![meta("granule-a", vec!["B02"])]);
        assert_eq!(items[0].id, "20230601103000");
    }

    #[test]
    fn test_eo_band_summaries_fallback() {
        let items = vec![meta("a", vec!["B02", "B03"])];
        let bands = vec!["B02".to_string(), "B03".to_string()];

        let summaries = eo_band_summaries(&items, &bands);
        assert_eq!(summaries[0]["name"], "B02");
        assert_eq!(summaries[1]["name"], "B03");
    }

    #[test]
    fn test_eo_band_summaries_from_assets() {
        let item = meta("a", vec!["B02"]).with_asset(
            "B02",
            AssetRef::new("B02.tif").with_extra_field(
                "eo:bands",
                serde_json::json!([{"name": "B02", "common_name": "blue"}]),
            ),
        );
        let bands = vec!["B02".to_string()];

        let summaries = eo_band_summaries(&[item], &bands);
        assert_eq!(summaries[0]["common_name"], "blue");
    }
}
