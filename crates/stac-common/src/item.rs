//! Per-granule metadata records.
//!
//! One `ItemMetadata` is produced per source raster granule (one timestamp,
//! one or more bands) by the raster-introspection collaborator. Records are
//! immutable once constructed and are consumed exactly once by the extent
//! aggregator and the document assembler.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::band::BandSet;
use crate::bbox::BoundingBox;
use crate::time::TemporalInterval;

/// Reference to one materialized asset (COG, Kerchunk reference file, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset location (local path, https or s3 URI).
    pub href: String,

    /// Extension payloads attached to the asset verbatim
    /// (proj:*, raster:bands, eo:bands, ...).
    #[serde(flatten, default)]
    pub extra_fields: Map<String, Value>,
}

impl AssetRef {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            extra_fields: Map::new(),
        }
    }

    pub fn with_extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_fields.insert(key.into(), value);
        self
    }
}

/// Metadata for one raster granule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Granule identifier (timestamp-derived, possibly prefixed).
    pub id: String,

    /// Spatial extent in the collection CRS.
    pub spatial: BoundingBox,

    /// Acquisition instant or interval.
    pub temporal: TemporalInterval,

    /// Ordered band identifiers present in this granule.
    pub bands: BandSet,

    /// Asset reference per band, keyed by band identifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assets: BTreeMap<String, AssetRef>,
}

impl ItemMetadata {
    pub fn new(
        id: impl Into<String>,
        spatial: BoundingBox,
        temporal: TemporalInterval,
        bands: BandSet,
    ) -> Self {
        Self {
            id: id.into(),
            spatial,
            temporal,
            bands,
            assets: BTreeMap::new(),
        }
    }

    pub fn with_asset(mut self, band: impl Into<String>, asset: AssetRef) -> Self {
        self.assets.insert(band.into(), asset);
        self
    }
}
