//! STAC item documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use stac_common::ItemMetadata;

use crate::asset::Asset;
use crate::extensions;
use crate::geometry::{bbox_to_geometry, Geometry};
use crate::link::{join_url, root_url, Link, MEDIA_TYPE_JSON};

/// Item properties. `datetime` is mandatory in STAC; everything else
/// (eo:cloud_cover etc.) rides in the flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub datetime: String,

    #[serde(flatten, default)]
    pub extra_fields: Map<String, Value>,
}

/// A STAC item: one granule as a GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub type_: String,

    pub stac_version: String,

    pub stac_extensions: Vec<String>,

    pub id: String,

    pub geometry: Geometry,

    pub bbox: Vec<f64>,

    pub properties: Properties,

    pub links: Vec<Link>,

    pub assets: BTreeMap<String, Asset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl Item {
    /// Build an item document from granule metadata.
    ///
    /// One asset per band, keyed by band identifier, in the granule's
    /// band order. The item datetime is the interval start; a true
    /// interval additionally carries `start_datetime`/`end_datetime`
    /// properties so the end is not lost.
    pub fn from_metadata(meta: &ItemMetadata, collection_id: &str) -> Self {
        let mut assets = BTreeMap::new();
        for band in meta.bands.iter() {
            if let Some(asset_ref) = meta.assets.get(band) {
                assets.insert(band.to_string(), Asset::from_asset_ref(asset_ref));
            }
        }

        let (start, end) = meta.temporal.to_rfc3339_pair();
        let mut extra_fields = Map::new();
        if meta.temporal.start != meta.temporal.end {
            extra_fields.insert("start_datetime".to_string(), Value::String(start.clone()));
            extra_fields.insert("end_datetime".to_string(), Value::String(end));
        }

        Self {
            type_: "Feature".to_string(),
            stac_version: extensions::STAC_VERSION.to_string(),
            stac_extensions: extensions::default_extensions(),
            id: meta.id.clone(),
            geometry: bbox_to_geometry(&meta.spatial),
            bbox: meta.spatial.to_vec(),
            properties: Properties {
                datetime: start,
                extra_fields,
            },
            links: Vec::new(),
            assets,
            collection: Some(collection_id.to_string()),
        }
    }

    /// Wire the standard item links: collection, parent, self, root.
    ///
    /// `collection_url` is the catalog endpoint under which the collection
    /// lives; root and parent point at its scheme+authority root.
    pub fn build_links(&mut self, collection_url: &str, collection_id: &str) {
        let collection_href = join_url(collection_url, collection_id);
        let self_href = join_url(&collection_href, &format!("items/{}", self.id));

        self.links = vec![
            Link::new(&collection_href, "collection").with_type(MEDIA_TYPE_JSON),
            Link::new(&collection_href, "parent").with_type(MEDIA_TYPE_JSON),
            Link::new(&self_href, "self").with_type(MEDIA_TYPE_JSON),
            Link::new(root_url(&collection_href), "root").with_type(MEDIA_TYPE_JSON),
        ];
    }
}
