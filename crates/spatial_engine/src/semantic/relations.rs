//! Pairwise semantic relations derived from geometry

use std::fmt;

use serde::Serialize;

use crate::config::{MovementConfig, RelationshipConfig};
use crate::error::Result;
use crate::foundation::math::{utils, Vec3};
use crate::geometry::AABB;
use crate::physics::{CollisionDetector, MovementRangeCalculator};
use crate::scene::{SceneObject, SceneSnapshot};

/// How another object relates to a subject
///
/// Every variant reads "the other object is ... the subject".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Rests on the subject's top surface
    OnTopOf,
    /// Supports the subject
    Beneath,
    /// Enclosed by the subject's box
    Inside,
    /// Encloses the subject's box
    Contains,
    /// Within the proximity threshold
    Near,
    /// Near, on the subject's -X side
    LeftOf,
    /// Near, on the subject's +X side
    RightOf,
    /// Near, on the subject's -Y side
    InFrontOf,
    /// Near, on the subject's +Y side
    Behind,
    /// Lies ahead of the subject's forward (local -Y) axis
    Facing,
}

impl Relation {
    /// Snake-case keyword
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTopOf => "on_top_of",
            Self::Beneath => "beneath",
            Self::Inside => "inside",
            Self::Contains => "contains",
            Self::Near => "near",
            Self::LeftOf => "left_of",
            Self::RightOf => "right_of",
            Self::InFrontOf => "in_front_of",
            Self::Behind => "behind",
            Self::Facing => "facing",
        }
    }

    /// Words used in answers, e.g. "on top of"
    pub fn phrase(self) -> String {
        self.as_str().replace('_', " ")
    }

    const fn is_vertical(self) -> bool {
        matches!(self, Self::OnTopOf | Self::Beneath | Self::Inside | Self::Contains)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse bucket for a center-to-center distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCategory {
    /// Under 0.5 m
    Touching,
    /// Under 1.5 m
    Near,
    /// Under 3 m
    Medium,
    /// Anything further
    Far,
}

impl DistanceCategory {
    /// Bucket for a distance in meters
    pub fn from_distance(distance: f32) -> Self {
        if distance < 0.5 {
            Self::Touching
        } else if distance < 1.5 {
            Self::Near
        } else if distance < 3.0 {
            Self::Medium
        } else {
            Self::Far
        }
    }
}

/// Another object and every relation it has to the subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedObject {
    /// Other object's name
    pub name: String,
    /// Relations, in [`Relation`] declaration order
    pub relations: Vec<Relation>,
    /// Center-to-center distance in meters
    pub distance: f32,
    /// Bucket of `distance`
    pub distance_category: DistanceCategory,
}

impl RelatedObject {
    /// Whether `relation` holds
    pub fn has(&self, relation: Relation) -> bool {
        self.relations.contains(&relation)
    }
}

/// Derives relations, clusters, summaries and query answers from a snapshot
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    pub(crate) config: RelationshipConfig,
    pub(crate) detector: CollisionDetector,
    pub(crate) movement: MovementRangeCalculator,
}

impl Default for RelationshipGraph {
    fn default() -> Self {
        let detector = CollisionDetector::default();
        Self::new(
            RelationshipConfig::default(),
            detector,
            MovementRangeCalculator::new(detector, MovementConfig::default()),
        )
    }
}

impl RelationshipGraph {
    /// Create a graph with the given thresholds
    pub fn new(config: RelationshipConfig, detector: CollisionDetector, movement: MovementRangeCalculator) -> Self {
        Self { config, detector, movement }
    }

    /// Thresholds in use
    pub fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    /// Whether two boxes are within the proximity threshold (symmetric)
    pub fn is_near(&self, a: &AABB, b: &AABB) -> bool {
        let reach = a.extents().xy().max() + b.extents().xy().max();
        let threshold = self.config.near_base + self.config.near_scale * reach;
        utils::horizontal_distance(a.center(), b.center()) < threshold
    }

    fn rests_on(&self, upper: &AABB, lower: &AABB) -> bool {
        approx::abs_diff_eq!(upper.min.z, lower.max.z, epsilon = self.config.on_epsilon)
            && upper.overlaps_horizontally(lower, self.detector.epsilon())
    }

    /// Relations of `other` to `subject`, in declaration order
    pub fn relations_between(&self, subject: &AABB, other: &AABB) -> Vec<Relation> {
        let tolerance = self.detector.epsilon();
        let mut relations = Vec::new();
        if self.rests_on(other, subject) {
            relations.push(Relation::OnTopOf);
        }
        if self.rests_on(subject, other) {
            relations.push(Relation::Beneath);
        }
        if subject.contains_aabb(other, tolerance) {
            relations.push(Relation::Inside);
        }
        if other.contains_aabb(subject, tolerance) {
            relations.push(Relation::Contains);
        }

        if !self.is_near(subject, other) {
            return relations;
        }
        relations.push(Relation::Near);

        if relations.iter().any(|r| r.is_vertical()) {
            return relations;
        }
        let offset = other.center() - subject.center();
        let deadzone = self.config.direction_deadzone;
        if offset.x.abs() >= offset.y.abs() {
            if offset.x.abs() > deadzone {
                relations.push(if offset.x > 0.0 { Relation::RightOf } else { Relation::LeftOf });
            }
        } else if offset.y.abs() > deadzone {
            relations.push(if offset.y > 0.0 { Relation::Behind } else { Relation::InFrontOf });
        }
        relations
    }

    /// Whether `target` lies within the facing cone of a subject at `origin`
    pub fn is_facing(&self, forward: Vec3, origin: Vec3, target: Vec3) -> bool {
        (target - origin)
            .try_normalize(f32::EPSILON)
            .is_some_and(|direction| forward.dot(&direction) > self.config.facing_threshold)
    }

    /// Every object related to `object_name` within the configured
    /// `max_distance`, nearest first (ties by name)
    pub fn relationships_of(&self, object_name: &str, snapshot: &SceneSnapshot) -> Result<Vec<RelatedObject>> {
        self.relationships_within(object_name, snapshot, self.config.max_distance)
    }

    /// Every object related to `object_name` whose center lies within
    /// `max_distance` of the subject's, nearest first (ties by name)
    pub fn relationships_within(&self, object_name: &str, snapshot: &SceneSnapshot, max_distance: f32) -> Result<Vec<RelatedObject>> {
        let (subject_object, subject) = snapshot.require(object_name)?;
        let forward = forward_vector(subject_object);

        let mut related: Vec<RelatedObject> = snapshot.iter()
            .filter(|(object, _)| object.name != object_name)
            .filter_map(|(object, aabb)| {
                let distance = (aabb.center() - subject.center()).magnitude();
                if distance > max_distance {
                    return None;
                }
                let mut relations = self.relations_between(subject, aabb);
                if self.is_facing(forward, subject.center(), aabb.center()) {
                    relations.push(Relation::Facing);
                }
                (!relations.is_empty()).then(|| RelatedObject {
                    name: object.name.clone(),
                    relations,
                    distance,
                    distance_category: DistanceCategory::from_distance(distance),
                })
            })
            .collect();

        related.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
        log::trace!("'{}' has {} related objects", object_name, related.len());
        Ok(related)
    }

    /// Flattened `(relation, other)` pairs for `object_name`
    pub fn relation_pairs(&self, object_name: &str, snapshot: &SceneSnapshot) -> Result<Vec<(Relation, String)>> {
        Ok(self.relationships_of(object_name, snapshot)?
            .into_iter()
            .flat_map(|related| {
                let name = related.name;
                related.relations.into_iter().map(move |r| (r, name.clone()))
            })
            .collect())
    }
}

/// The object's local -Y axis in world space
pub fn forward_vector(object: &SceneObject) -> Vec3 {
    utils::euler_xyz_degrees(object.rotation) * Vec3::new(0.0, -1.0, 0.0)
}
