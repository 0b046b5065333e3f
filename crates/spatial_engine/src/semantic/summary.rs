//! Semantic scene summary

use serde::Serialize;

use crate::catalog::{Category, DimensionCatalog};
use crate::foundation::math::Vec3;
use crate::geometry::{SizeCategory, AABB};
use crate::scene::{SceneObject, SceneSnapshot};
use super::relations::{forward_vector, RelationshipGraph};

/// Neighbours listed per object
const NEAREST_NEIGHBOURS: usize = 3;

/// Overall scale of a scene, from its largest dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneScale {
    /// Under 2 m
    Tabletop,
    /// Under 10 m
    Room,
    /// Under 50 m
    Building,
    /// 50 m and up
    Landscape,
}

impl SceneScale {
    /// Classify by largest dimension in meters
    pub fn from_max_dimension(max_dimension: f32) -> Self {
        if max_dimension < 2.0 {
            Self::Tabletop
        } else if max_dimension < 10.0 {
            Self::Room
        } else if max_dimension < 50.0 {
            Self::Building
        } else {
            Self::Landscape
        }
    }

    /// Human description
    pub const fn description(self) -> &'static str {
        match self {
            Self::Tabletop => "small-scale (tabletop/miniature)",
            Self::Room => "room-scale",
            Self::Building => "building-scale",
            Self::Landscape => "large-scale (outdoor/landscape)",
        }
    }
}

/// Per-object part of a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSummary {
    /// Object name
    pub name: String,
    /// Catalog type tag, if any
    pub object_type: Option<String>,
    /// Catalog category of the tag, when the tag is known
    pub category: Option<Category>,
    /// Size class from the largest world dimension
    pub size_category: SizeCategory,
    /// World-space center
    pub position: Vec3,
    /// Where the object sits within the scene, e.g. "on floor, left-back"
    pub position_description: String,
    /// Dominant direction of the object's local -Y axis
    pub facing: String,
    /// World AABB size
    pub dimensions: Vec3,
    /// Closest objects by center distance
    pub nearest: Vec<(String, f32)>,
}

/// Whole-scene summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    /// Number of objects
    pub object_count: usize,
    /// Bounds of every object and the room
    pub bounds: Option<AABB>,
    /// Size of `bounds`
    pub size: Vec3,
    /// Scale class
    pub scale: SceneScale,
    /// Proximity clusters
    pub clusters: Vec<Vec<String>>,
    /// Per-object details in snapshot order
    pub objects: Vec<ObjectSummary>,
    /// One-paragraph description
    pub text: String,
}

/// Describe a point relative to the scene bounds
///
/// Coordinates are normalized to `[-1, 1]` across the bounds; a third of the
/// half-extent off center counts as left/right or front/back.
pub fn describe_position(aabb: &AABB, bounds: &AABB) -> String {
    let location = aabb.center();
    let center = bounds.center();
    let half = bounds.extents().map(|e| if e < 0.005 { 0.5 } else { e });
    let rel = (location - center).component_div(&half);

    let mut parts: Vec<String> = Vec::new();
    if aabb.min.z < 0.1 {
        parts.push("on floor".to_string());
    } else if rel.z > 0.5 {
        parts.push("high up".to_string());
    } else if rel.z < -0.3 {
        parts.push("low".to_string());
    }

    let mut horizontal = Vec::new();
    if rel.x > 0.3 {
        horizontal.push("right");
    } else if rel.x < -0.3 {
        horizontal.push("left");
    }
    if rel.y > 0.3 {
        horizontal.push("back");
    } else if rel.y < -0.3 {
        horizontal.push("front");
    }

    if !horizontal.is_empty() {
        parts.push(horizontal.join("-"));
    } else if parts.is_empty() {
        parts.push("center".to_string());
    }
    parts.join(", ")
}

/// Dominant horizontal direction of the object's local -Y axis
pub fn facing_direction(object: &SceneObject) -> &'static str {
    let forward = forward_vector(object);
    if forward.x.abs() > forward.y.abs() {
        if forward.x > 0.0 { "+X (right)" } else { "-X (left)" }
    } else if forward.y > 0.0 {
        "+Y (back)"
    } else {
        "-Y (front)"
    }
}

impl RelationshipGraph {
    /// Summarize a snapshot: bounds, scale, clusters and per-object details
    pub fn summarize(&self, snapshot: &SceneSnapshot) -> SceneSummary {
        let bounds = snapshot.scene_bounds();
        let size = bounds.map_or(Vec3::zeros(), |b| b.size());
        let scale = SceneScale::from_max_dimension(size.max());
        let clusters = self.cluster(snapshot);

        let objects: Vec<ObjectSummary> = snapshot.iter()
            .map(|(object, aabb)| {
                let mut nearest: Vec<(String, f32)> = snapshot.iter()
                    .filter(|(other, _)| other.name != object.name)
                    .map(|(other, other_aabb)| (other.name.clone(), (other_aabb.center() - aabb.center()).magnitude()))
                    .collect();
                nearest.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
                nearest.truncate(NEAREST_NEIGHBOURS);

                ObjectSummary {
                    name: object.name.clone(),
                    object_type: object.object_type.clone(),
                    category: object.object_type.as_deref()
                        .and_then(|t| DimensionCatalog::lookup(t).ok())
                        .map(|entry| entry.category),
                    size_category: SizeCategory::from_max_dimension(aabb.max_dimension()),
                    position: aabb.center(),
                    position_description: bounds.map_or_else(|| "center".to_string(), |b| describe_position(aabb, &b)),
                    facing: facing_direction(object).to_string(),
                    dimensions: aabb.size(),
                    nearest,
                }
            })
            .collect();

        let mut text = format!(
            "Scene with {} object{}. Scene scale: {}. Bounds: {:.1}m x {:.1}m x {:.1}m.",
            snapshot.len(),
            if snapshot.len() == 1 { "" } else { "s" },
            scale.description(),
            size.x, size.y, size.z,
        );
        if !clusters.is_empty() {
            text.push_str(&format!(" Found {} object clusters.", clusters.len()));
        }
        if snapshot.room().is_some() {
            text.push_str(" A room has been declared.");
        }

        SceneSummary { object_count: snapshot.len(), bounds, size, scale, clusters, objects, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn living_room() -> SceneSnapshot {
        SceneSnapshot::new(vec![
            SceneObject::new("Sofa", Vec3::new(2.0, 3.5, 0.4), Vec3::new(1.0, 0.45, 0.4)).with_type("sofa_3seat"),
            SceneObject::new("Coffee Table", Vec3::new(2.0, 2.5, 0.225), Vec3::new(0.55, 0.3, 0.225)),
            SceneObject::new("Vase", Vec3::new(2.0, 2.5, 0.55), Vec3::new(0.05, 0.05, 0.1)),
            SceneObject::new("Shelf", Vec3::new(0.45, 0.5, 2.0), Vec3::new(0.2, 0.4, 0.02)).with_rotation(Vec3::new(0.0, 0.0, 90.0)),
        ], Some(AABB::from_dimensions(4.0, 4.0, 2.5))).unwrap()
    }

    #[test]
    fn test_scale_classes() {
        assert_eq!(SceneScale::from_max_dimension(1.0), SceneScale::Tabletop);
        assert_eq!(SceneScale::from_max_dimension(4.0), SceneScale::Room);
        assert_eq!(SceneScale::from_max_dimension(20.0), SceneScale::Building);
        assert_eq!(SceneScale::from_max_dimension(80.0), SceneScale::Landscape);
    }

    #[test]
    fn test_summary_overview() {
        let summary = RelationshipGraph::default().summarize(&living_room());
        assert_eq!(summary.object_count, 4);
        assert_eq!(summary.scale, SceneScale::Room);
        assert!(summary.text.starts_with("Scene with 4 objects. Scene scale: room-scale."));
        assert_eq!(summary.clusters, vec![vec!["Sofa", "Coffee Table", "Vase"]]);
    }

    #[test]
    fn test_object_details() {
        let summary = RelationshipGraph::default().summarize(&living_room());
        let sofa = &summary.objects[0];
        assert_eq!(sofa.category, Some(Category::LivingRoom));
        assert_eq!(sofa.size_category, SizeCategory::Large);
        assert_eq!(sofa.position_description, "on floor, back");
        assert_eq!(sofa.nearest.len(), 3);
        assert_eq!(sofa.nearest[0].0, "Vase");

        let vase = &summary.objects[2];
        assert_eq!(vase.size_category, SizeCategory::Small);
        assert_eq!(vase.nearest[0].0, "Coffee Table");

        let shelf = &summary.objects[3];
        assert_eq!(shelf.position_description, "high up, left-front");
        assert_eq!(shelf.facing, "+X (right)");
    }

    #[test]
    fn test_empty_scene() {
        let summary = RelationshipGraph::default().summarize(&SceneSnapshot::empty(None));
        assert_eq!(summary.object_count, 0);
        assert!(summary.bounds.is_none());
        assert_eq!(summary.scale, SceneScale::Tabletop);
    }
}
