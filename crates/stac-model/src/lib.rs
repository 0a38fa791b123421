//! STAC 1.0.0 document types.
//!
//! Serde representations of STAC Collections, Items, and Assets, with the
//! extension fields used by the catalog builder (projection, raster, eo,
//! scientific, datacube).

pub mod asset;
pub mod collection;
pub mod extensions;
pub mod geometry;
pub mod item;
pub mod link;

pub use asset::Asset;
pub use collection::{Collection, Extent, Provider, SpatialExtent, TemporalExtent};
pub use geometry::{bbox_to_geometry, Geometry};
pub use item::Item;
pub use link::{root_url, Link};
