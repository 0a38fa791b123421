//! Builder configuration.
//!
//! Every default lives here in `Default` impls; there is no module-level
//! mutable state. Storage credentials can be overridden from the
//! environment for containerized deployments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use extent_aggregator::DimensionNames;
use stac_model::{Link, Provider};
use stac_output::{ObjectStorageConfig, OutputFormat};

/// Top-level builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Collection identity and descriptive metadata.
    pub collection: CollectionConfig,

    /// Output layout.
    #[serde(default)]
    pub output: OutputConfig,

    /// Object storage upload.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Datacube dimension naming and reference system.
    #[serde(default)]
    pub datacube: DatacubeConfig,
}

impl BuilderConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides for storage credentials.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config {}", path.as_ref().display()))?;
        let mut config: Self =
            serde_yaml::from_str(&text).context("Failed to parse builder config")?;
        config.upload.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Collection identity and descriptive metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection identifier (e.g., "blue-river-basin").
    pub id: String,

    /// Catalog API endpoint under which the collection will live.
    /// Link wiring is skipped when unset.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    #[serde(default)]
    pub providers: Option<Vec<Provider>>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub sci_doi: Option<String>,

    #[serde(default)]
    pub sci_citation: Option<String>,

    /// Prefix prepended to the timestamp-derived item ids (useful when
    /// the same timestamp can occur in multiple collections).
    #[serde(default)]
    pub item_prefix: String,

    /// Extra links appended to the collection document.
    #[serde(default)]
    pub extra_links: Vec<Link>,
}

/// Output layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory. Defaults to a UTC run-timestamp folder.
    #[serde(default)]
    pub folder: Option<PathBuf>,

    /// Collection file name. Defaults to `{collection_id}.json`.
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Also write pretty per-item JSON files in csv mode.
    #[serde(default = "default_true")]
    pub write_json_items: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: None,
            file: None,
            format: OutputFormat::default(),
            write_json_items: true,
        }
    }
}

/// Object storage upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadConfig {
    /// Whether to upload outputs after generation.
    #[serde(default)]
    pub s3_upload: bool,

    #[serde(default)]
    pub storage: ObjectStorageConfig,

    /// Key prefix for uploaded files in the bucket.
    #[serde(default)]
    pub key_prefix: String,
}

/// Datacube dimension naming and reference system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatacubeConfig {
    #[serde(default)]
    pub dimensions: DimensionNames,

    /// Collection CRS as an authority string (e.g., "EPSG:4326").
    #[serde(default = "default_crs")]
    pub crs: String,

    /// Pixel resolution along x, exposed as the x axis `step`.
    #[serde(default)]
    pub resolution_x: Option<f64>,

    /// Pixel resolution along y, exposed as the y axis `step`.
    #[serde(default)]
    pub resolution_y: Option<f64>,
}

fn default_crs() -> String {
    "EPSG:4326".to_string()
}

impl Default for DatacubeConfig {
    fn default() -> Self {
        Self {
            dimensions: DimensionNames::default(),
            crs: default_crs(),
            resolution_x: None,
            resolution_y: None,
        }
    }
}

/// Environment overrides for storage credentials, matching container
/// deployment conventions.
pub trait StorageEnvOverrides {
    fn apply_env_overrides(&mut self);
}

impl StorageEnvOverrides for ObjectStorageConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("S3_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(bucket) = env::var("S3_BUCKET") {
            self.bucket = bucket;
        }
        if let Ok(access_key) = env::var("S3_ACCESS_KEY") {
            self.access_key_id = access_key;
        }
        if let Ok(secret_key) = env::var("S3_SECRET_KEY") {
            self.secret_access_key = secret_key;
        }
        if let Ok(region) = env::var("S3_REGION") {
            self.region = region;
        }
        if let Ok(allow_http) = env::var("S3_ALLOW_HTTP") {
            self.allow_http = allow_http == "true";
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml() {
        let yaml = r#"
collection:
  id: s2-l2a
  description: Sentinel-2 L2A test collection
"#;
        let config: BuilderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.collection.id, "s2-l2a");
        assert_eq!(config.collection.item_prefix, "");
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.output.write_json_items);
        assert!(!config.upload.s3_upload);
        assert_eq!(config.datacube.crs, "EPSG:4326");
        assert_eq!(config.datacube.dimensions.time, "t");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
collection:
  id: s2-l2a
  url: https://stac.example.org/api
  title: Sentinel-2 L2A
  description: Test
  license: CC-BY-4.0
  item_prefix: s2
  providers:
    - name: Example EO
      url: https://example.org
      roles: [host]
output:
  folder: /tmp/out
  format: json_full
  write_json_items: false
upload:
  s3_upload: true
  key_prefix: catalogs/s2-l2a
datacube:
  crs: EPSG:32632
  resolution_x: 10.0
  resolution_y: 10.0
  dimensions:
    x: x
    y: y
    time: time
    bands: bands
"#;
        let config: BuilderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.format, OutputFormat::JsonFull);
        assert!(!config.output.write_json_items);
        assert!(config.upload.s3_upload);
        assert_eq!(config.datacube.crs, "EPSG:32632");
        assert_eq!(config.datacube.resolution_x, Some(10.0));
        assert_eq!(config.datacube.dimensions.time, "time");
        assert_eq!(
            config.collection.providers.unwrap()[0].name,
            "Example EO"
        );
    }
}
