//! STAC link objects and URL helpers.

use serde::{Deserialize, Serialize};

pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_GEOJSON: &str = "application/geo+json";
pub const MEDIA_TYPE_COG: &str = "image/tiff; application=geotiff; profile=cloud-optimized";

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "parent", "collection").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Extract scheme + authority from a URL ("https://host/a/b" -> "https://host").
///
/// Used for `root` and `parent` links, which point at the catalog API root
/// rather than the collection path.
pub fn root_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let authority_start = scheme_end + 3;
        match url[authority_start..].find('/') {
            Some(path_start) => url[..authority_start + path_start].to_string(),
            None => url.to_string(),
        }
    } else {
        url.to_string()
    }
}

/// Join a base URL and a path segment with exactly one slash.
pub fn join_url(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_builder() {
        let link = Link::new("https://stac.example.org/collections/c1", "self")
            .with_type(MEDIA_TYPE_JSON);
        assert_eq!(link.rel, "self");
        assert_eq!(link.type_.as_deref(), Some("application/json"));
        assert!(link.title.is_none());
    }

    #[test]
    fn test_link_serialization_skips_none() {
        let link = Link::new("https://x/y", "parent");
        let json = serde_json::to_value(&link).unwrap();
        assert!(json.get("type").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_root_url() {
        assert_eq!(
            root_url("https://stac.example.org/api/collections/c1"),
            "https://stac.example.org"
        );
        assert_eq!(root_url("https://stac.example.org"), "https://stac.example.org");
        assert_eq!(root_url("not-a-url"), "not-a-url");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://x/", "/c1"), "https://x/c1");
        assert_eq!(join_url("https://x", "c1"), "https://x/c1");
    }
}
