//! GeoJSON geometry derivation.

use serde::{Deserialize, Serialize};

use stac_common::BoundingBox;

/// A GeoJSON geometry. Only polygons are produced here (item footprints
/// derived from bounding boxes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

/// Build the closed polygon ring of a bounding box, counter-clockwise,
/// starting and ending at the lower-left corner.
pub fn bbox_to_geometry(bbox: &BoundingBox) -> Geometry {
    Geometry::Polygon {
        coordinates: vec![vec![
            [bbox.min_x, bbox.min_y],
            [bbox.max_x, bbox.min_y],
            [bbox.max_x, bbox.max_y],
            [bbox.min_x, bbox.max_y],
            [bbox.min_x, bbox.min_y],
        ]],
    }
}
