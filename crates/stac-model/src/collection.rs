//! STAC collection documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use extent_aggregator::{CollectionExtent, CubeDimensions};

use crate::extensions;
use crate::item::Item;
use crate::link::{join_url, root_url, Link, MEDIA_TYPE_JSON};

/// A data provider entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            roles: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = Some(roles);
        self
    }
}

/// Collection-level spatial extent: a list of bboxes, the first being the
/// union of all items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    pub bbox: Vec<Vec<f64>>,
}

/// Collection-level temporal extent: a list of intervals, the first being
/// the union of all items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalExtent {
    pub interval: Vec<[Option<String>; 2]>,
}

/// The `extent` block of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

impl Extent {
    /// Build the STAC extent block from a finalized aggregation result.
    pub fn from_collection_extent(extent: &CollectionExtent) -> Self {
        let (start, end) = extent.temporal.to_rfc3339_pair();
        Self {
            spatial: SpatialExtent {
                bbox: vec![extent.spatial.to_vec()],
            },
            temporal: TemporalExtent {
                interval: vec![[Some(start), Some(end)]],
            },
        }
    }
}

/// A STAC collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "type")]
    pub type_: String,

    pub stac_version: String,

    pub stac_extensions: Vec<String>,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    pub license: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<Provider>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "sci:doi", skip_serializing_if = "Option::is_none")]
    pub sci_doi: Option<String>,

    #[serde(rename = "sci:citation", skip_serializing_if = "Option::is_none")]
    pub sci_citation: Option<String>,

    pub extent: Extent,

    /// Collection summaries (eo:bands enumeration).
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub summaries: Map<String, Value>,

    #[serde(rename = "cube:dimensions")]
    pub cube_dimensions: CubeDimensions,

    pub links: Vec<Link>,

    /// Item documents inlined under `features` (json_full output only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub features: Vec<Item>,
}

impl Collection {
    /// Create a collection with required fields. License defaults to
    /// "proprietary" per the STAC spec when none is declared.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        extent: Extent,
        cube_dimensions: CubeDimensions,
    ) -> Self {
        Self {
            type_: "Collection".to_string(),
            stac_version: extensions::STAC_VERSION.to_string(),
            stac_extensions: extensions::default_extensions(),
            id: id.into(),
            title: None,
            description: description.into(),
            keywords: None,
            license: "proprietary".to_string(),
            providers: None,
            version: None,
            sci_doi: None,
            sci_citation: None,
            extent,
            summaries: Map::new(),
            cube_dimensions,
            links: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = Some(providers);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set DOI and/or citation. Declares the scientific extension on the
    /// document exactly once when either is present.
    pub fn with_scientific(
        mut self,
        doi: Option<String>,
        citation: Option<String>,
    ) -> Self {
        if doi.is_some() || citation.is_some() {
            let schema = extensions::scientific_schema();
            if !self.stac_extensions.contains(&schema) {
                self.stac_extensions.push(schema);
            }
        }
        self.sci_doi = doi;
        self.sci_citation = citation;
        self
    }

    /// Set the `summaries.eo:bands` enumeration.
    pub fn with_eo_band_summaries(mut self, eo_bands: Value) -> Self {
        self.summaries.insert("eo:bands".to_string(), eo_bands);
        self
    }

    /// Wire the standard collection links: items, parent, self, root.
    /// User-supplied extra links are appended after them.
    pub fn build_links(&mut self, collection_url: &str, extra_links: &[Link]) {
        let self_href = join_url(collection_url, &self.id);
        let root = root_url(&self_href);

        self.links = vec![
            Link::new(join_url(&self_href, "items"), "items").with_type(MEDIA_TYPE_JSON),
            Link::new(&root, "parent").with_type(MEDIA_TYPE_JSON),
            Link::new(&self_href, "self").with_type(MEDIA_TYPE_JSON),
            Link::new(&root, "root").with_type(MEDIA_TYPE_JSON),
        ];
        self.links.extend_from_slice(extra_links);
        self.dedup_root_links();
    }

    /// Keep at most one root link when a root duplicates the self link.
    fn dedup_root_links(&mut self) {
        let self_href = self
            .links
            .iter()
            .find(|l| l.rel == "self")
            .map(|l| l.href.clone());

        let Some(self_href) = self_href else { return };

        let root_count = self.links.iter().filter(|l| l.rel == "root").count();
        if root_count > 1 {
            if let Some(idx) = self
                .links
                .iter()
                .position(|l| l.rel == "root" && l.href == self_href)
            {
                self.links.remove(idx);
            }
        }
    }
}
