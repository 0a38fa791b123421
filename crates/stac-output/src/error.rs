//! Error types for output writing and upload.

use thiserror::Error;

/// Errors that can occur while persisting catalog outputs.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to upload to storage: {0}")]
    StorageUpload(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for output operations.
pub type OutputResult<T> = std::result::Result<T, OutputError>;
