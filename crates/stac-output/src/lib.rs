//! Output persistence for generated STAC documents.
//!
//! Writes collection and item documents to a local output directory in the
//! configured layout, and optionally uploads the whole directory to
//! S3-compatible object storage.

pub mod error;
pub mod storage;
pub mod writer;

pub use error::{OutputError, OutputResult};
pub use storage::{upload_output_directory, ObjectStorage, ObjectStorageConfig};
pub use writer::{write_outputs, OutputFormat, OutputLayout, WrittenFiles};
