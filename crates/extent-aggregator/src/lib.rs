//! Collection-level extent aggregation.
//!
//! Folds per-granule spatial/temporal/band metadata into a single
//! collection-level extent and datacube dimension summary. The fold is
//! commutative and associative over spatial and temporal extents, so
//! partitions of the input may be aggregated independently and merged.

pub mod accumulator;
pub mod cube;
pub mod error;
pub mod parallel;

pub use accumulator::{CollectionExtent, ExtentAccumulator};
pub use cube::{to_cube_dimensions, CubeDimension, CubeDimensions, DimensionNames};
pub use error::AggregateError;
pub use parallel::aggregate_parallel;
