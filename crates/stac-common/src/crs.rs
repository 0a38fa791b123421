//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EPSG-coded coordinate reference system.
///
/// STAC's projection and datacube extensions reference CRSs by numeric
/// EPSG code; the collection-level summary defaults to EPSG:4326.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(pub u32);

impl Crs {
    /// WGS84 Geographic (lat/lon in degrees).
    pub const WGS84: Crs = Crs(4326);

    pub fn new(epsg: u32) -> Self {
        Self(epsg)
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        self.0
    }

    /// Parse an authority string like "EPSG:4326" or a bare code "4326".
    pub fn from_authority_string(s: &str) -> Result<Self, CrsParseError> {
        let code = match s.split_once(':') {
            Some((authority, code)) => {
                if !authority.eq_ignore_ascii_case("epsg") {
                    return Err(CrsParseError::UnsupportedAuthority(s.to_string()));
                }
                code
            }
            None => s,
        };

        code.parse::<u32>()
            .map(Crs)
            .map_err(|_| CrsParseError::InvalidCode(s.to_string()))
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS authority: {0}. Only EPSG codes are supported")]
    UnsupportedAuthority(String),

    #[error("Invalid CRS code: {0}")]
    InvalidCode(String),
}
