//! Granule manifest ingestion.
//!
//! The raster-introspection collaborator emits one JSON `ItemMetadata`
//! record per granule, newline-delimited. This module reads that manifest;
//! it never opens raster files itself.

use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use stac_common::ItemMetadata;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid manifest record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest contains no granule records")]
    Empty,
}

/// Read an NDJSON granule manifest. Blank lines are skipped; any
/// malformed record fails the whole read with its line number.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<ItemMetadata>, ManifestError> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let item: ItemMetadata = serde_json::from_str(&line)
            .map_err(|source| ManifestError::Parse {
                line: idx + 1,
                source,
            })?;
        items.push(item);
    }

    if items.is_empty() {
        return Err(ManifestError::Empty);
    }

    info!(
        granules = items.len(),
        path = %path.as_ref().display(),
        "Loaded granule manifest"
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    const RECORD: &str = r#"{"id":"20230601103000","spatial":{"min_x":10.0,"min_y":45.0,"max_x":12.0,"max_y":47.0},"temporal":{"start":"2023-06-01T10:30:00Z","end":"2023-06-01T10:30:00Z"},"bands":["B02"],"assets":{"B02":{"href":"B02.tif"}}}"#;

    #[test]
    fn test_read_manifest() {
        let file = write_manifest(&[RECORD, "", RECORD]);
        let items = read_manifest(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "20230601103000");
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let file = write_manifest(&[RECORD, "{not json"]);
        match read_manifest(file.path()) {
            Err(ManifestError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let file = write_manifest(&["", ""]);
        assert!(matches!(
            read_manifest(file.path()),
            Err(ManifestError::Empty)
        ));
    }
}
