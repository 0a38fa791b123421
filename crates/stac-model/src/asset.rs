//! STAC asset objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stac_common::AssetRef;

use crate::link::MEDIA_TYPE_COG;

/// A STAC asset: one downloadable artifact of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset location.
    pub href: String,

    /// Media type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Asset roles (e.g., "data", "thumbnail").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    /// Extension fields (proj:*, raster:bands, eo:bands, ...).
    #[serde(flatten, default)]
    pub extra_fields: Map<String, Value>,
}

impl Asset {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            type_: None,
            title: None,
            roles: None,
            extra_fields: Map::new(),
        }
    }

    /// Build a COG data asset from a granule asset reference, carrying
    /// its extension payloads verbatim.
    pub fn from_asset_ref(asset_ref: &AssetRef) -> Self {
        Self {
            href: asset_ref.href.clone(),
            type_: Some(MEDIA_TYPE_COG.to_string()),
            title: None,
            roles: None,
            extra_fields: asset_ref.extra_fields.clone(),
        }
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = Some(roles);
        self
    }
}
