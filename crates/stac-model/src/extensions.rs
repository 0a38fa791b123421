//! STAC extension schema versions and URLs.

pub const STAC_VERSION: &str = "1.0.0";

pub const PROJECTION_EXT_VERSION: &str = "v1.1.0";
pub const RASTER_EXT_VERSION: &str = "v1.1.0";
pub const EO_EXT_VERSION: &str = "v1.1.0";
pub const DATACUBE_EXT_VERSION: &str = "v1.0.0";
pub const SCIENTIFIC_EXT_VERSION: &str = "v1.0.0";

fn schema_url(name: &str, version: &str) -> String {
    format!("https://stac-extensions.github.io/{name}/{version}/schema.json")
}

pub fn projection_schema() -> String {
    schema_url("projection", PROJECTION_EXT_VERSION)
}

pub fn raster_schema() -> String {
    schema_url("raster", RASTER_EXT_VERSION)
}

pub fn eo_schema() -> String {
    schema_url("eo", EO_EXT_VERSION)
}

pub fn datacube_schema() -> String {
    schema_url("datacube", DATACUBE_EXT_VERSION)
}

pub fn scientific_schema() -> String {
    schema_url("scientific", SCIENTIFIC_EXT_VERSION)
}

/// The extension set declared on every item and collection.
pub fn default_extensions() -> Vec<String> {
    vec![projection_schema(), raster_schema(), eo_schema()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_urls() {
        assert_eq!(
            projection_schema(),
            "https://stac-extensions.github.io/projection/v1.1.0/schema.json"
        );
        assert_eq!(
            scientific_schema(),
            "https://stac-extensions.github.io/scientific/v1.0.0/schema.json"
        );
    }
}
