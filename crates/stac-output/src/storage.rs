//! Object storage interface for catalog outputs (S3 compatible).

use bytes::Bytes;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{OutputError, OutputResult};

/// Configuration for object storage connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// S3 endpoint URL
    pub endpoint: String,
    /// Bucket name
    pub bucket: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// AWS region
    pub region: String,
    /// Allow HTTP (for local MinIO)
    pub allow_http: bool,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://minio:9000".to_string(),
            bucket: "stac-catalogs".to_string(),
            access_key_id: "minioadmin".to_string(),
            secret_access_key: "minioadmin".to_string(),
            region: "us-east-1".to_string(),
            allow_http: true,
        }
    }
}

/// Object storage client for catalog outputs.
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl ObjectStorage {
    /// Create a new object storage client from config.
    pub fn new(config: &ObjectStorageConfig) -> OutputResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_endpoint(&config.endpoint)
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_region(&config.region);

        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| OutputError::Storage(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
        })
    }

    /// Write bytes to a path in the bucket.
    #[instrument(skip(self, data), fields(bucket = %self.bucket, path = %path))]
    pub async fn put(&self, path: &str, data: Bytes) -> OutputResult<()> {
        let location = Path::from(path);
        debug!(size = data.len(), "Writing object");

        self.store
            .put(&location, data.into())
            .await
            .map_err(|e| OutputError::Storage(format!("Failed to write {}: {}", path, e)))?;

        Ok(())
    }

    /// Check if an object exists.
    pub async fn exists(&self, path: &str) -> OutputResult<bool> {
        let location = Path::from(path);

        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(OutputError::Storage(format!(
                "Failed to check {}: {}",
                path, e
            ))),
        }
    }

    /// List objects with a given prefix.
    pub async fn list(&self, prefix: &str) -> OutputResult<Vec<String>> {
        use futures::TryStreamExt;

        let prefix_path = Path::from(prefix);
        let mut paths = Vec::new();

        let mut stream = self.store.list(Some(&prefix_path));
        while let Some(meta) = stream
            .try_next()
            .await
            .map_err(|e| OutputError::Storage(format!("List failed: {}", e)))?
        {
            paths.push(meta.location.to_string());
        }

        Ok(paths)
    }
}

/// Upload a catalog output directory to object storage.
///
/// Recursively walks the local directory and uploads all files under the
/// given key prefix, preserving relative paths. No retries: a failed put
/// surfaces immediately.
///
/// Returns total bytes uploaded.
pub async fn upload_output_directory(
    storage: &ObjectStorage,
    local_path: &std::path::Path,
    key_prefix: &str,
) -> OutputResult<u64> {
    let mut total_size = 0u64;

    for entry in walkdir::WalkDir::new(local_path) {
        let entry = entry.map_err(|e| OutputError::StorageUpload(e.to_string()))?;

        if entry.file_type().is_file() {
            let relative_path = entry
                .path()
                .strip_prefix(local_path)
                .map_err(|e| OutputError::StorageUpload(e.to_string()))?;

            let storage_path = format!(
                "{}/{}",
                key_prefix.trim_end_matches('/'),
                relative_path.display()
            );

            let file_data = tokio::fs::read(entry.path()).await?;
            let file_size = file_data.len() as u64;
            total_size += file_size;

            storage.put(&storage_path, Bytes::from(file_data)).await?;

            debug!(path = %storage_path, size = file_size, "Uploaded catalog file");
        }
    }

    Ok(total_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObjectStorageConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert!(config.allow_http);
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = ObjectStorageConfig::default();
        let storage = ObjectStorage::new(&config);
        assert!(storage.is_ok());
    }
}
