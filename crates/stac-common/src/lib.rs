//! Common types shared across the raster-stac workspace.

pub mod band;
pub mod bbox;
pub mod crs;
pub mod item;
pub mod time;

pub use band::BandSet;
pub use bbox::BoundingBox;
pub use crs::Crs;
pub use item::{AssetRef, ItemMetadata};
pub use time::TemporalInterval;
