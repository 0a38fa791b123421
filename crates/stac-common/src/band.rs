//! Band/variable identifier sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of band (or variable) identifiers.
///
/// Order is significant: the position of a band maps to the band index in
/// the source raster files, and downstream consumers index assets
/// positionally. Two band sets are equal only when they contain the same
/// identifiers in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandSet(Vec<String>);

impl BandSet {
    pub fn new(bands: Vec<String>) -> Self {
        Self(bands)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl From<Vec<String>> for BandSet {
    fn from(bands: Vec<String>) -> Self {
        Self(bands)
    }
}

impl From<Vec<&str>> for BandSet {
    fn from(bands: Vec<&str>) -> Self {
        Self(bands.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for BandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
