//! Movement range calculation
//!
//! For each axis direction the object's box is grown step by step along
//! that direction (a swept volume, so thin obstacles cannot be tunneled
//! through). The first step that trips a collision, the room boundary or the
//! floor is then refined by bisection to the configured precision.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

use crate::config::MovementConfig;
use crate::error::Result;
use crate::foundation::math::{Axis, Vec3};
use crate::geometry::AABB;
use crate::scene::SceneSnapshot;
use super::collision::CollisionDetector;

/// One of the six axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// +X (right)
    #[serde(rename = "+x")]
    PosX,
    /// -X (left)
    #[serde(rename = "-x")]
    NegX,
    /// +Y (back)
    #[serde(rename = "+y")]
    PosY,
    /// -Y (front)
    #[serde(rename = "-y")]
    NegY,
    /// +Z (up)
    #[serde(rename = "+z")]
    PosZ,
    /// -Z (down)
    #[serde(rename = "-z")]
    NegZ,
}

impl Direction {
    /// All six directions
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Axis moved along
    pub const fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// +1.0 or -1.0
    pub const fn sign(self) -> f32 {
        match self {
            Self::PosX | Self::PosY | Self::PosZ => 1.0,
            Self::NegX | Self::NegY | Self::NegZ => -1.0,
        }
    }

    /// Unit vector
    pub fn vector(self) -> Vec3 {
        self.axis().unit() * self.sign()
    }

    /// Short label such as `+x`
    pub const fn label(self) -> &'static str {
        match self {
            Self::PosX => "+x",
            Self::NegX => "-x",
            Self::PosY => "+y",
            Self::NegY => "-y",
            Self::PosZ => "+z",
            Self::NegZ => "-z",
        }
    }

    /// Matching flag in a [`DirectionSet`]
    pub const fn flag(self) -> DirectionSet {
        match self {
            Self::PosX => DirectionSet::POS_X,
            Self::NegX => DirectionSet::NEG_X,
            Self::PosY => DirectionSet::POS_Y,
            Self::NegY => DirectionSet::NEG_Y,
            Self::PosZ => DirectionSet::POS_Z,
            Self::NegZ => DirectionSet::NEG_Z,
        }
    }

    /// Parse a user-facing word ("left", "up", "+x", ...)
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "+x" | "right" => Some(Self::PosX),
            "-x" | "left" => Some(Self::NegX),
            "+y" | "back" | "backward" | "backwards" => Some(Self::PosY),
            "-y" | "forward" | "forwards" | "front" => Some(Self::NegY),
            "+z" | "up" | "upward" | "upwards" => Some(Self::PosZ),
            "-z" | "down" | "downward" | "downwards" => Some(Self::NegZ),
            _ => None,
        }
    }
}

bitflags! {
    /// Subset of directions to evaluate
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DirectionSet: u8 {
        /// +X
        const POS_X = 1 << 0;
        /// -X
        const NEG_X = 1 << 1;
        /// +Y
        const POS_Y = 1 << 2;
        /// -Y
        const NEG_Y = 1 << 3;
        /// +Z
        const POS_Z = 1 << 4;
        /// -Z
        const NEG_Z = 1 << 5;
        /// Floor-plane directions
        const HORIZONTAL = Self::POS_X.bits() | Self::NEG_X.bits() | Self::POS_Y.bits() | Self::NEG_Y.bits();
        /// Up and down
        const VERTICAL = Self::POS_Z.bits() | Self::NEG_Z.bits();
    }
}

impl DirectionSet {
    /// Directions contained in this set, in canonical order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(d.flag()))
    }
}

/// What stopped the sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Obstruction {
    /// Another scene object
    Object(String),
    /// A wall/ceiling of the declared room
    RoomBoundary,
    /// The floor plane
    Floor,
    /// Nothing within the search distance
    Unobstructed,
}

/// Travel limit in one direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelLimit {
    /// Distance to first contact, or the sentinel when unobstructed
    pub distance: f32,
    /// Cause of the limit
    pub obstruction: Obstruction,
}

/// Per-direction travel limits for one object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelRange {
    /// Object that was swept
    pub object: String,
    /// Limits keyed by direction
    pub limits: BTreeMap<Direction, TravelLimit>,
}

impl TravelRange {
    /// Distance available in a direction (if it was evaluated)
    pub fn distance(&self, direction: Direction) -> Option<f32> {
        self.limits.get(&direction).map(|limit| limit.distance)
    }

    /// Full limit record for a direction
    pub fn limit(&self, direction: Direction) -> Option<&TravelLimit> {
        self.limits.get(&direction)
    }
}

/// Computes how far an object can move before it collides
#[derive(Debug, Clone)]
pub struct MovementRangeCalculator {
    detector: CollisionDetector,
    config: MovementConfig,
}

impl MovementRangeCalculator {
    /// Create a calculator
    pub fn new(detector: CollisionDetector, config: MovementConfig) -> Self {
        Self { detector, config }
    }

    /// Sentinel reported when nothing is in the way
    pub fn unbounded_distance(&self) -> f32 {
        self.config.unbounded_travel
    }

    /// Travel limits in all six directions
    pub fn max_travel(&self, object_name: &str, snapshot: &SceneSnapshot) -> Result<TravelRange> {
        self.max_travel_in(object_name, snapshot, DirectionSet::all())
    }

    /// Travel limits for a subset of directions
    pub fn max_travel_in(&self, object_name: &str, snapshot: &SceneSnapshot, directions: DirectionSet) -> Result<TravelRange> {
        let (_, start) = snapshot.require(object_name)?;
        let start = *start;

        // Objects already interpenetrating at the start would block every
        // direction at zero, so they are left out of the sweep.
        let mut obstacles = Vec::new();
        for (object, aabb) in snapshot.iter() {
            if object.name == object_name {
                continue;
            }
            if self.detector.test(&start, aabb) {
                log::warn!("'{}' already overlaps '{}'; ignoring it for movement range", object_name, object.name);
                continue;
            }
            obstacles.push((object.name.as_str(), *aabb));
        }

        let room = snapshot.room().filter(|room| !self.detector.outside_room(&start, Some(room)));
        let check_floor = !self.detector.penetrates_floor(&start);
        let search_limit = snapshot.room().map_or(self.config.unbounded_travel, AABB::diagonal);

        let step = obstacles.iter()
            .map(|(_, aabb)| aabb.min_dimension())
            .filter(|d| *d > 0.0)
            .fold(search_limit, f32::min)
            .max(self.config.min_sweep_step);

        let sweep = Sweep { detector: &self.detector, start, obstacles: &obstacles, room, check_floor };

        let limits = directions.directions()
            .map(|direction| (direction, self.sweep_direction(&sweep, direction, step, search_limit)))
            .collect();

        Ok(TravelRange { object: object_name.to_string(), limits })
    }

    fn sweep_direction(&self, sweep: &Sweep<'_>, direction: Direction, step: f32, search_limit: f32) -> TravelLimit {
        let mut free = 0.0_f32;
        while free < search_limit {
            let next = (free + step).min(search_limit);
            if sweep.blocked(direction, next).is_some() {
                let (mut lo, mut hi) = (free, next);
                while hi - lo > self.config.precision {
                    let mid = 0.5 * (lo + hi);
                    if sweep.blocked(direction, mid).is_some() {
                        hi = mid;
                    } else {
                        lo = mid;
                    }
                }
                let obstruction = sweep.blocked(direction, hi).unwrap_or(Obstruction::Unobstructed);
                // The tolerant overlap test lets boxes sink `epsilon` before
                // tripping; report the geometric contact distance instead.
                let distance = (lo - self.detector.epsilon()).max(0.0);
                log::trace!("{} {}: {:.4} m ({:?})", direction.label(), sweep.start.center(), distance, obstruction);
                return TravelLimit { distance, obstruction };
            }
            free = next;
        }

        TravelLimit { distance: self.config.unbounded_travel, obstruction: Obstruction::Unobstructed }
    }
}

struct Sweep<'a> {
    detector: &'a CollisionDetector,
    start: AABB,
    obstacles: &'a [(&'a str, AABB)],
    room: Option<&'a AABB>,
    check_floor: bool,
}

impl Sweep<'_> {
    /// Volume covered by moving `distance` along `direction`
    fn swept(&self, direction: Direction, distance: f32) -> AABB {
        let offset = direction.vector() * distance;
        self.start.union(&self.start.translated(offset))
    }

    fn blocked(&self, direction: Direction, distance: f32) -> Option<Obstruction> {
        let swept = self.swept(direction, distance);
        if let Some((name, _)) = self.obstacles.iter().find(|(_, aabb)| self.detector.test(&swept, aabb)) {
            return Some(Obstruction::Object((*name).to_string()));
        }
        // The room's bottom face is the floor plane
        if self.check_floor && self.detector.penetrates_floor(&swept) {
            return Some(Obstruction::Floor);
        }
        if self.room.is_some() && self.detector.outside_room(&swept, self.room) {
            return Some(Obstruction::RoomBoundary);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use approx::assert_relative_eq;

    fn calculator() -> MovementRangeCalculator {
        MovementRangeCalculator::new(CollisionDetector::default(), MovementConfig::default())
    }

    fn cube(name: &str, center: Vec3, half: f32) -> SceneObject {
        SceneObject::new(name, center, Vec3::new(half, half, half))
    }

    #[test]
    fn test_gap_to_neighbour() {
        let snapshot = SceneSnapshot::new(vec![
            cube("A", Vec3::new(0.0, 0.0, 0.5), 0.5),
            cube("B", Vec3::new(3.0, 0.0, 0.5), 0.5),
        ], None).unwrap();
        let range = calculator().max_travel("A", &snapshot).unwrap();
        let limit = range.limit(Direction::PosX).unwrap();
        assert_relative_eq!(limit.distance, 2.0, epsilon = 1e-3);
        assert_eq!(limit.obstruction, Obstruction::Object("B".to_string()));
    }

    #[test]
    fn test_resting_object_cannot_move_down() {
        let snapshot = SceneSnapshot::new(vec![cube("A", Vec3::new(0.0, 0.0, 0.5), 0.5)], None).unwrap();
        let range = calculator().max_travel("A", &snapshot).unwrap();
        let down = range.limit(Direction::NegZ).unwrap();
        assert_relative_eq!(down.distance, 0.0, epsilon = 1e-3);
        assert_eq!(down.obstruction, Obstruction::Floor);
    }

    #[test]
    fn test_floor_wins_over_room_bottom() {
        let room = AABB::from_dimensions(4.0, 4.0, 3.0);
        let snapshot = SceneSnapshot::new(vec![cube("A", Vec3::new(2.0, 2.0, 0.5), 0.5)], Some(room)).unwrap();
        let range = calculator().max_travel_in("A", &snapshot, DirectionSet::NEG_Z).unwrap();
        let down = range.limit(Direction::NegZ).unwrap();
        assert_relative_eq!(down.distance, 0.0, epsilon = 1e-3);
        assert_eq!(down.obstruction, Obstruction::Floor);
    }

    #[test]
    fn test_moving_to_the_limit_leaves_no_travel() {
        let snapshot = SceneSnapshot::new(vec![
            cube("A", Vec3::new(0.0, 0.0, 0.5), 0.5),
            cube("B", Vec3::new(3.0, 0.0, 0.5), 0.5),
        ], None).unwrap();
        let calc = calculator();
        let travel = calc.max_travel_in("A", &snapshot, DirectionSet::POS_X).unwrap()
            .distance(Direction::PosX).unwrap() - 1e-3;

        let (a, _) = snapshot.require("A").unwrap();
        let moved = snapshot.with_replaced("A", a.moved_to(a.position + Direction::PosX.vector() * travel)).unwrap();
        let (_, aabb) = moved.require("A").unwrap();
        assert!(CollisionDetector::default().validate(aabb, &moved, &["A"]).is_valid());

        let remaining = calc.max_travel_in("A", &moved, DirectionSet::POS_X).unwrap();
        assert_relative_eq!(remaining.distance(Direction::PosX).unwrap(), 1e-3, epsilon = 5e-4);
        let back = calc.max_travel_in("A", &moved, DirectionSet::NEG_X).unwrap();
        assert_eq!(back.limit(Direction::NegX).unwrap().obstruction, Obstruction::Unobstructed);
    }

    #[test]
    fn test_unobstructed_reports_sentinel() {
        let snapshot = SceneSnapshot::new(vec![cube("A", Vec3::new(0.0, 0.0, 0.5), 0.5)], None).unwrap();
        let calc = calculator();
        let range = calc.max_travel_in("A", &snapshot, DirectionSet::POS_Z).unwrap();
        assert_eq!(range.limits.len(), 1);
        let up = range.limit(Direction::PosZ).unwrap();
        assert_eq!(up.obstruction, Obstruction::Unobstructed);
        assert_eq!(up.distance, calc.unbounded_distance());
    }

    #[test]
    fn test_room_walls_limit_travel() {
        let room = AABB::from_dimensions(4.0, 3.0, 2.5);
        let snapshot = SceneSnapshot::new(vec![cube("A", Vec3::new(1.0, 1.0, 0.5), 0.5)], Some(room)).unwrap();
        let range = calculator().max_travel("A", &snapshot).unwrap();
        assert_relative_eq!(range.distance(Direction::PosX).unwrap(), 2.5, epsilon = 1e-3);
        assert_relative_eq!(range.distance(Direction::NegX).unwrap(), 0.5, epsilon = 1e-3);
        assert_relative_eq!(range.distance(Direction::PosZ).unwrap(), 1.5, epsilon = 1e-3);
        assert_eq!(range.limit(Direction::PosY).unwrap().obstruction, Obstruction::RoomBoundary);
    }

    #[test]
    fn test_thin_obstacle_is_not_skipped() {
        let snapshot = SceneSnapshot::new(vec![
            cube("A", Vec3::new(0.0, 0.0, 0.5), 0.5),
            SceneObject::new("Pane", Vec3::new(2.0, 0.0, 0.5), Vec3::new(0.001, 1.0, 1.0)),
        ], None).unwrap();
        let range = calculator().max_travel_in("A", &snapshot, DirectionSet::POS_X).unwrap();
        assert_relative_eq!(range.distance(Direction::PosX).unwrap(), 1.499, epsilon = 1e-3);
    }

    #[test]
    fn test_direction_words() {
        assert_eq!(Direction::from_word("Left"), Some(Direction::NegX));
        assert_eq!(Direction::from_word("backward"), Some(Direction::PosY));
        assert_eq!(Direction::from_word("sideways"), None);
        assert_eq!(DirectionSet::HORIZONTAL.directions().count(), 4);
    }
}
