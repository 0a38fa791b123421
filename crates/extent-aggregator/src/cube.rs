//! Datacube dimension descriptors.
//!
//! Derives the STAC datacube extension's `cube:dimensions` object from a
//! finalized collection extent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use stac_common::Crs;

use crate::accumulator::CollectionExtent;

/// Names used for the x/y/time/bands dimensions in `cube:dimensions`.
///
/// These mirror the dimension names of the source datacube (e.g. "x", "y",
/// "t", "bands" for openEO-style netCDF datacubes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionNames {
    pub x: String,
    pub y: String,
    pub time: String,
    pub bands: String,
}

impl Default for DimensionNames {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            time: "t".to_string(),
            bands: "bands".to_string(),
        }
    }
}

/// One axis descriptor inside `cube:dimensions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CubeDimension {
    Spatial {
        axis: String,
        extent: [f64; 2],
        reference_system: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Temporal {
        extent: [String; 2],
    },
    Bands {
        values: Vec<String>,
    },
}

/// The `cube:dimensions` object of a STAC collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeDimensions(pub BTreeMap<String, CubeDimension>);

impl CubeDimensions {
    pub fn get(&self, name: &str) -> Option<&CubeDimension> {
        self.0.get(name)
    }
}

/// Derive `cube:dimensions` from a finalized extent.
///
/// The x/y axes carry the unioned spatial range and the collection CRS;
/// the time axis carries the unioned interval as RFC 3339 strings; the
/// bands axis carries the validated band sequence, order preserved.
/// `resolution_x`/`resolution_y` become the optional `step` of the
/// spatial axes when known.
pub fn to_cube_dimensions(
    extent: &CollectionExtent,
    names: &DimensionNames,
    crs: Crs,
    resolution_x: Option<f64>,
    resolution_y: Option<f64>,
) -> CubeDimensions {
    let (start, end) = extent.temporal.to_rfc3339_pair();

    let mut dims = BTreeMap::new();
    dims.insert(
        names.x.clone(),
        CubeDimension::Spatial {
            axis: "x".to_string(),
            extent: [extent.spatial.min_x, extent.spatial.max_x],
            reference_system: crs.epsg(),
            step: resolution_x,
        },
    );
    dims.insert(
        names.y.clone(),
        CubeDimension::Spatial {
            axis: "y".to_string(),
            extent: [extent.spatial.min_y, extent.spatial.max_y],
            reference_system: crs.epsg(),
            step: resolution_y,
        },
    );
    dims.insert(
        names.time.clone(),
        CubeDimension::Temporal {
            extent: [start, end],
        },
    );
    dims.insert(
        names.bands.clone(),
        CubeDimension::Bands {
            values: extent.bands.to_vec(),
        },
    );

    CubeDimensions(dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::ExtentAccumulator;
    use stac_common::{BandSet, BoundingBox, ItemMetadata, TemporalInterval};

    fn finalized_extent() -> CollectionExtent {
        let t0 = TemporalInterval::parse_iso8601("2022-01-01T00:00:00Z").unwrap();
        let t1 = TemporalInterval::parse_iso8601("2022-12-31T00:00:00Z").unwrap();

        let mut acc = ExtentAccumulator::new();
        acc.fold(&ItemMetadata::new(
            "a",
            BoundingBox::new(10.0, 45.0, 11.0, 46.0),
            TemporalInterval::instant(t0),
            BandSet::from(vec!["B02", "B03"]),
        ))
        .unwrap();
        acc.fold(&ItemMetadata::new(
            "b",
            BoundingBox::new(10.5, 45.5, 12.0, 47.0),
            TemporalInterval::instant(t1),
            BandSet::from(vec!["B02", "B03"]),
        ))
        .unwrap();
        acc.finalize().unwrap()
    }

    #[test]
    fn test_cube_dimensions_axes() {
        let cube = to_cube_dimensions(
            &finalized_extent(),
            &DimensionNames::default(),
            Crs::WGS84,
            None,
            None,
        );

        match cube.get("x").unwrap() {
            CubeDimension::Spatial {
                axis,
                extent,
                reference_system,
                step,
            } => {
                assert_eq!(axis, "x");
                assert_eq!(*extent, [10.0, 12.0]);
                assert_eq!(*reference_system, 4326);
                assert!(step.is_none());
            }
            other => panic!("Expected spatial x axis, got {other:?}"),
        }

        match cube.get("t").unwrap() {
            CubeDimension::Temporal { extent } => {
                assert_eq!(extent[0], "2022-01-01T00:00:00Z");
                assert_eq!(extent[1], "2022-12-31T00:00:00Z");
            }
            other => panic!("Expected temporal axis, got {other:?}"),
        }

        match cube.get("bands").unwrap() {
            CubeDimension::Bands { values } => {
                assert_eq!(values, &["B02".to_string(), "B03".to_string()]);
            }
            other => panic!("Expected bands axis, got {other:?}"),
        }
    }

    #[test]
    fn test_cube_dimensions_serialization() {
        let cube = to_cube_dimensions(
            &finalized_extent(),
            &DimensionNames::default(),
            Crs::WGS84,
            Some(0.0001),
            None,
        );

        let json = serde_json::to_value(&cube).unwrap();
        assert_eq!(json["x"]["type"], "spatial");
        assert_eq!(json["x"]["axis"], "x");
        assert_eq!(json["x"]["reference_system"], 4326);
        assert_eq!(json["x"]["step"], 0.0001);
        assert!(json["y"].get("step").is_none());
        assert_eq!(json["t"]["type"], "temporal");
        assert_eq!(json["bands"]["type"], "bands");
        assert_eq!(json["bands"]["values"][0], "B02");
    }

    #[test]
    fn test_custom_dimension_names() {
        let names = DimensionNames {
            x: "lon".to_string(),
            y: "lat".to_string(),
            time: "time".to_string(),
            bands: "variable".to_string(),
        };

        let cube = to_cube_dimensions(&finalized_extent(), &names, Crs::new(3035), None, None);
        assert!(cube.get("lon").is_some());
        assert!(cube.get("lat").is_some());
        assert!(cube.get("time").is_some());
        assert!(cube.get("variable").is_some());
        assert!(cube.get("x").is_none());
    }
}
