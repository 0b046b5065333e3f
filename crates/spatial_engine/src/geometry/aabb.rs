//! Axis-aligned bounding boxes

use serde::{Serialize, Deserialize};

use crate::foundation::math::{Axis, Vec3};

/// Axis-Aligned Bounding Box in world space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Room-style bounds: `[0, width] x [0, depth] x [0, height]`
    pub fn from_dimensions(width: f32, depth: f32, height: f32) -> Self {
        Self::new(Vec3::zeros(), Vec3::new(width, depth, height))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the main diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().magnitude()
    }

    /// Smallest of the three side lengths
    pub fn min_dimension(&self) -> f32 {
        self.size().min()
    }

    /// Largest of the three side lengths
    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check whether `other` lies inside this box, allowing `tolerance` of overhang
    pub fn contains_aabb(&self, other: &AABB, tolerance: f32) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            other.min[i] >= self.min[i] - tolerance && other.max[i] <= self.max[i] + tolerance
        })
    }

    /// Signed overlap depth along one axis (negative means a gap)
    pub fn overlap_on(&self, other: &AABB, axis: Axis) -> f32 {
        let i = axis.index();
        self.max[i].min(other.max[i]) - self.min[i].max(other.min[i])
    }

    /// Whether the XY footprints overlap by more than `epsilon`
    pub fn overlaps_horizontally(&self, other: &AABB, epsilon: f32) -> bool {
        self.overlap_on(other, Axis::X) > epsilon && self.overlap_on(other, Axis::Y) > epsilon
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Copy grown by `amount` on every side of the given axes
    pub fn inflated(&self, amount: Vec3) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }

    /// Smallest box enclosing both
    pub fn union(&self, other: &AABB) -> Self {
        Self::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_and_extents() {
        let aabb = AABB::from_center_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.5));
        assert_relative_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(aabb.extents(), Vec3::new(0.5, 1.0, 1.5));
        assert_relative_eq!(aabb.size(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(aabb.min_dimension(), 1.0);
    }

    #[test]
    fn test_overlap_depth_sign() {
        let a = AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = a.translated(Vec3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(a.overlap_on(&b, Axis::X), -0.5);
        assert_relative_eq!(a.overlap_on(&b, Axis::Y), 1.0);
    }

    #[test]
    fn test_contains_with_tolerance() {
        let room = AABB::from_dimensions(4.0, 3.0, 2.5);
        let flush = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let overhang = flush.translated(Vec3::new(-0.01, 0.0, 0.0));
        assert!(room.contains_aabb(&flush, 0.0));
        assert!(!room.contains_aabb(&overhang, 0.001));
        assert!(room.contains_aabb(&overhang, 0.02));
    }
}
