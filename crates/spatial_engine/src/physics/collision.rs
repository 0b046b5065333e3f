//! Collision detection over scene snapshots
//!
//! All tests work on world AABBs. Overlap uses a tolerance: boxes must
//! interpenetrate by more than `epsilon` on every axis before they count as
//! colliding, so flush contact (a lamp resting on a desk, a cabinet against
//! a wall) stays valid.
//!
//! A transform is valid iff it overlaps no other object, does not sink into
//! the floor plane (Z = 0) and stays inside the declared room.

use serde::Serialize;

use crate::config::CollisionConfig;
use crate::foundation::math::{Axis, Vec3};
use crate::geometry::{self, AABB};
use crate::scene::{SceneObject, SceneSnapshot};
use crate::error::{Result, SpatialError};

/// Outcome of a full validity check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformValidation {
    /// Box that was tested
    pub aabb: AABB,
    /// Objects overlapping the box, in snapshot order
    pub colliders: Vec<String>,
    /// Whether the box sinks below the floor
    pub penetrates_floor: bool,
    /// Whether the box leaves the declared room
    pub outside_room: bool,
}

impl TransformValidation {
    /// No collisions, no floor penetration, inside the room
    pub fn is_valid(&self) -> bool {
        self.colliders.is_empty() && !self.penetrates_floor && !self.outside_room
    }

    /// Short description of every failed check
    pub fn describe(&self) -> String {
        let mut problems = Vec::new();
        if !self.colliders.is_empty() {
            problems.push(format!("collides with {}", self.colliders.join(", ")));
        }
        if self.penetrates_floor {
            problems.push("penetrates the floor".to_string());
        }
        if self.outside_room {
            problems.push("extends outside the room".to_string());
        }
        if problems.is_empty() {
            "valid".to_string()
        } else {
            problems.join("; ")
        }
    }
}

/// AABB collision tests (broadcast over a snapshot)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetector {
    epsilon: f32,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

impl CollisionDetector {
    /// Create a detector with the given touching tolerance
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon: epsilon.max(0.0) }
    }

    /// Create a detector from configuration
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::new(config.epsilon)
    }

    /// Touching tolerance in meters
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Whether two boxes interpenetrate by more than `epsilon` on all three axes
    ///
    /// Symmetric in `a` and `b`; boxes that only touch (or overlap by less than
    /// `epsilon`) are not reported.
    pub fn overlaps(a: &AABB, b: &AABB, epsilon: f32) -> bool {
        Axis::ALL.iter().all(|&axis| a.overlap_on(b, axis) > epsilon)
    }

    /// [`Self::overlaps`] with this detector's tolerance
    pub fn test(&self, a: &AABB, b: &AABB) -> bool {
        Self::overlaps(a, b, self.epsilon)
    }

    /// Names of every object overlapping `candidate`, skipping `exclude`
    pub fn find_colliders(&self, candidate: &AABB, snapshot: &SceneSnapshot, exclude: &[&str]) -> Vec<String> {
        snapshot.iter()
            .filter(|(object, _)| !exclude.contains(&object.name.as_str()))
            .filter(|(_, aabb)| self.test(candidate, aabb))
            .map(|(object, _)| object.name.clone())
            .collect()
    }

    /// Whether the box sinks below the floor plane
    pub fn penetrates_floor(&self, aabb: &AABB) -> bool {
        aabb.min.z < -self.epsilon
    }

    /// Whether the box leaves the room (always false without a room)
    pub fn outside_room(&self, aabb: &AABB, room: Option<&AABB>) -> bool {
        room.map_or(false, |room| !room.contains_aabb(aabb, self.epsilon))
    }

    /// Run all three checks
    pub fn validate(&self, candidate: &AABB, snapshot: &SceneSnapshot, exclude: &[&str]) -> TransformValidation {
        TransformValidation {
            aabb: *candidate,
            colliders: self.find_colliders(candidate, snapshot, exclude),
            penetrates_floor: self.penetrates_floor(candidate),
            outside_room: self.outside_room(candidate, snapshot.room()),
        }
    }

    /// Check a proposed transform for an existing object
    ///
    /// The object keeps its own extents; only position, rotation and scale
    /// change. The object itself is never reported as a collider.
    pub fn validate_transform(
        &self,
        name: &str,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        snapshot: &SceneSnapshot,
    ) -> Result<TransformValidation> {
        let (object, _) = snapshot.require(name)?;
        let proposed = SceneObject {
            position,
            rotation,
            scale,
            ..object.clone()
        };
        let validation = self.validate(&geometry::aabb_of(&proposed), snapshot, &[name]);
        log::debug!("Transform check for '{}': {}", name, validation.describe());
        Ok(validation)
    }

    /// Check where a not-yet-existing object would land
    pub fn validate_new_object(&self, object: &SceneObject, snapshot: &SceneSnapshot) -> Result<TransformValidation> {
        if snapshot.contains(&object.name) {
            return Err(SpatialError::DuplicateObject(object.name.clone()));
        }
        Ok(self.validate(&geometry::aabb_of(object), snapshot, &[]))
    }
}
