//! Object footprints and size classes

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// Width (X), depth (Y) and height (Z) of an object, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Size along X
    pub width: f32,
    /// Size along Y
    pub depth: f32,
    /// Size along Z
    pub height: f32,
}

impl Footprint {
    /// Create a footprint from full dimensions
    pub fn new(width: f32, depth: f32, height: f32) -> Self {
        Self { width, depth, height }
    }

    /// Full dimensions as a vector
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.depth, self.height)
    }

    /// Half of each dimension
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Half of the height
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Smaller of width and depth
    pub fn min_horizontal(&self) -> f32 {
        self.width.min(self.depth)
    }

    /// Whether every dimension is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.width, self.depth, self.height].iter().all(|d| d.is_finite() && *d > 0.0)
    }
}

/// Coarse size class from the largest dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    /// Under 10 cm
    Tiny,
    /// Under 50 cm
    Small,
    /// Under 2 m
    Medium,
    /// Under 5 m
    Large,
    /// 5 m and up
    Huge,
}

impl SizeCategory {
    /// Classify by largest dimension in meters
    pub fn from_max_dimension(max_dimension: f32) -> Self {
        if max_dimension < 0.1 {
            Self::Tiny
        } else if max_dimension < 0.5 {
            Self::Small
        } else if max_dimension < 2.0 {
            Self::Medium
        } else if max_dimension < 5.0 {
            Self::Large
        } else {
            Self::Huge
        }
    }

    /// Lower-case label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents() {
        let footprint = Footprint::new(0.2, 0.1, 0.05);
        assert_eq!(footprint.half_height(), 0.025);
        assert_eq!(footprint.min_horizontal(), 0.1);
    }

    #[test]
    fn test_size_category_boundaries() {
        assert_eq!(SizeCategory::from_max_dimension(0.05), SizeCategory::Tiny);
        assert_eq!(SizeCategory::from_max_dimension(0.1), SizeCategory::Small);
        assert_eq!(SizeCategory::from_max_dimension(1.9), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_max_dimension(4.0), SizeCategory::Large);
        assert_eq!(SizeCategory::from_max_dimension(12.0), SizeCategory::Huge);
    }

    #[test]
    fn test_zero_dimension_is_invalid() {
        assert!(!Footprint::new(0.0, 1.0, 1.0).is_valid());
        assert!(Footprint::new(0.3, 1.0, 1.0).is_valid());
    }
}
