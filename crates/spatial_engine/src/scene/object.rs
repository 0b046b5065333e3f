//! Scene objects as reported by the host scene store

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// A single object in a scene snapshot
///
/// Position is the world-space pivot (assumed at the geometric center),
/// rotation is XYZ Euler in degrees, and `half_extents` are the object-space
/// half sizes before scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Scene-wide unique name
    pub name: String,
    /// World-space pivot position in meters
    pub position: Vec3,
    /// XYZ Euler rotation in degrees
    #[serde(default = "Vec3::zeros")]
    pub rotation: Vec3,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Object-space half extents in meters
    pub half_extents: Vec3,
    /// Optional catalog type key, e.g. `"dining_table"`
    #[serde(default)]
    pub object_type: Option<String>,
}

fn unit_scale() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

impl SceneObject {
    /// Create an unrotated, unscaled object
    pub fn new(name: impl Into<String>, position: Vec3, half_extents: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Vec3::zeros(),
            scale: unit_scale(),
            half_extents,
            object_type: None,
        }
    }

    /// Set the rotation (degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Tag with a catalog type key
    pub fn with_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    /// Same object moved to `position`
    pub fn moved_to(&self, position: Vec3) -> Self {
        Self { position, ..self.clone() }
    }

    /// Reason the geometry is unusable, if any
    pub(crate) fn geometry_problem(&self) -> Option<String> {
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());
        if !finite(&self.position) || !finite(&self.rotation) || !finite(&self.scale) {
            return Some("transform contains non-finite values".to_string());
        }
        if !finite(&self.half_extents) {
            return Some("extents contain non-finite values".to_string());
        }
        if self.half_extents.iter().any(|c| *c < 0.0) {
            return Some(format!("negative half extents {:?}", self.half_extents.as_slice()));
        }
        None
    }
}
