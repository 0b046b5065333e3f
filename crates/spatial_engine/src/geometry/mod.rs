//! Geometry model
//!
//! Every scene object is represented by the axis-aligned box enclosing its
//! rotated, scaled bounds. Objects turned off-axis are over-approximated
//! and may report collisions their true shapes would not have.
//!
//! Pivots are assumed to sit at the geometric center, so a floor-standing
//! object of height `h` rests at `z = h / 2`.

mod aabb;
mod footprint;

pub use aabb::AABB;
pub use footprint::{Footprint, SizeCategory};

use crate::foundation::math::{utils, Vec3};
use crate::scene::SceneObject;

/// World-space AABB of an object
///
/// Computes `position ± |R| · (half_extents ⊙ |scale|)` where `R` is the
/// rotation matrix. With no rotation this is exactly `position ± half_extents ⊙ scale`.
pub fn aabb_of(object: &SceneObject) -> AABB {
    let scaled = object.half_extents.component_mul(&object.scale.abs());
    AABB::from_center_extents(object.position, enclosing_half_extents(scaled, object.rotation))
}

/// Half extents of the axis-aligned box enclosing a rotated box
pub fn enclosing_half_extents(half_extents: Vec3, rotation_degrees: Vec3) -> Vec3 {
    if rotation_degrees == Vec3::zeros() {
        return half_extents;
    }
    let rotation = utils::euler_xyz_degrees(rotation_degrees);
    rotation.abs() * half_extents
}

/// Canonical resting Z for a center-pivot object of the given height
pub fn floor_contact_z(height: f32) -> f32 {
    height / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unrotated_aabb_matches_scaled_extents() {
        let object = SceneObject::new("Box", Vec3::new(1.0, 2.0, 0.5), Vec3::new(0.5, 0.25, 0.5))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));
        let aabb = aabb_of(&object);
        assert_relative_eq!(aabb.min, Vec3::new(0.0, 1.75, 0.0));
        assert_relative_eq!(aabb.max, Vec3::new(2.0, 2.25, 1.0));
    }

    #[test]
    fn test_quarter_turn_swaps_footprint() {
        let object = SceneObject::new("Bench", Vec3::zeros(), Vec3::new(1.0, 0.25, 0.2))
            .with_rotation(Vec3::new(0.0, 0.0, 90.0));
        let aabb = aabb_of(&object);
        assert_relative_eq!(aabb.extents(), Vec3::new(0.25, 1.0, 0.2), epsilon = 1e-5);
    }

    #[test]
    fn test_diagonal_turn_over_approximates() {
        let object = SceneObject::new("Crate", Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
            .with_rotation(Vec3::new(0.0, 0.0, 45.0));
        let aabb = aabb_of(&object);
        let expected = std::f32::consts::SQRT_2 * 0.5;
        assert_relative_eq!(aabb.extents().x, expected, epsilon = 1e-5);
        assert_relative_eq!(aabb.extents().z, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_negative_scale_does_not_invert_box() {
        let object = SceneObject::new("Mirror", Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
            .with_scale(Vec3::new(-1.0, 1.0, 1.0));
        let aabb = aabb_of(&object);
        assert!(aabb.min.x < aabb.max.x);
    }

    #[test]
    fn test_floor_contact() {
        assert_relative_eq!(floor_contact_z(0.9), 0.45);
    }
}
