//! Rectangular room shells

use crate::error::{Result, SpatialError};
use crate::foundation::math::Vec3;
use crate::geometry::AABB;
use super::object::SceneObject;

/// Floor and wall objects of a rectangular room, plus its interior bounds
#[derive(Debug, Clone, PartialEq)]
pub struct RoomShell {
    /// `Floor` followed by `Wall_Left`, `Wall_Right`, `Wall_Front`, `Wall_Back`
    pub objects: Vec<SceneObject>,
    /// Interior `[0,width] x [0,depth] x [0,height]`
    pub bounds: AABB,
}

/// Build the shell of a `width x depth x height` room
///
/// Slabs sit outside the interior: walls touch its faces and the floor slab
/// lies below `z = 0`, so nothing placed inside the room collides with them.
pub fn room_shell(width: f32, depth: f32, height: f32, wall_thickness: f32) -> Result<RoomShell> {
    let sizes = [("width", width), ("depth", depth), ("height", height), ("wall_thickness", wall_thickness)];
    if let Some((field, value)) = sizes.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
        return Err(SpatialError::InvalidGeometry {
            name: "room".to_string(),
            reason: format!("{field} must be positive, got {value}"),
        });
    }

    let t = wall_thickness / 2.0;
    let slab = |name: &str, center: Vec3, half: Vec3| SceneObject::new(name, center, half);
    let objects = vec![
        slab("Floor", Vec3::new(width / 2.0, depth / 2.0, -t), Vec3::new(width / 2.0 + wall_thickness, depth / 2.0 + wall_thickness, t)),
        slab("Wall_Left", Vec3::new(-t, depth / 2.0, height / 2.0), Vec3::new(t, depth / 2.0, height / 2.0)),
        slab("Wall_Right", Vec3::new(width + t, depth / 2.0, height / 2.0), Vec3::new(t, depth / 2.0, height / 2.0)),
        slab("Wall_Front", Vec3::new(width / 2.0, -t, height / 2.0), Vec3::new(width / 2.0 + wall_thickness, t, height / 2.0)),
        slab("Wall_Back", Vec3::new(width / 2.0, depth + t, height / 2.0), Vec3::new(width / 2.0 + wall_thickness, t, height / 2.0)),
    ];

    log::debug!("Room shell {}x{}x{} (walls {})", width, depth, height, wall_thickness);
    Ok(RoomShell { objects, bounds: AABB::from_dimensions(width, depth, height) })
}
