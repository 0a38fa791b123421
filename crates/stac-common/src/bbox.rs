//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// An axis-aligned geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS, coordinates are in the projection's linear units.
/// Antimeridian-crossing (wrapping) boxes are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Check that all four bounds are finite and min <= max on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// The smallest bounding box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Corner coordinates in STAC order: [minx, miny, maxx, maxy].
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(0.5, 0.5, 2.0, 2.0);

        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(0.0, 0.0, 2.0, 2.0));

        // commutative
        assert_eq!(b.union(&a), u);
    }

    #[test]
    fn test_well_formed() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!BoundingBox::new(1.0, 0.0, 0.0, 1.0).is_well_formed());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_well_formed());
    }

    #[test]
    fn test_to_vec() {
        let bbox = BoundingBox::new(10.0, 45.0, 12.0, 47.0);
        assert_eq!(bbox.to_vec(), vec![10.0, 45.0, 12.0, 47.0]);
    }
}
