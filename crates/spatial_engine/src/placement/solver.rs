//! Placement solver
//!
//! Each relation has a deterministic first candidate and, where it makes
//! sense, a bounded search around it: a square spiral over the support
//! surface for `on_top`, a linear slide for `next_to` and `against_wall`.
//! Whatever the branch, the final candidate is re-validated through the
//! collision detector and the solver fails closed.

use serde::{Serialize, Deserialize};

use crate::catalog::DimensionCatalog;
use crate::config::PlacementConfig;
use crate::error::{Result, SpatialError};
use crate::foundation::math::Vec3;
use crate::geometry::{self, Footprint, AABB};
use crate::physics::CollisionDetector;
use crate::scene::SceneSnapshot;
use super::relation::{Side, SpatialRelationship};
use super::search::{self, SpiralOffsets};

/// Smallest spiral step, guards against degenerate footprints
const MIN_SPIRAL_STEP: f32 = 1e-3;

/// What to place and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Relation to satisfy
    pub relation: SpatialRelationship,
    /// Size of the new object
    pub footprint: Footprint,
    /// Reference object name
    #[serde(default)]
    pub reference: Option<String>,
    /// Gap to keep to neighbours; falls back to the configured default
    #[serde(default)]
    pub clearance: Option<f32>,
}

impl PlacementRequest {
    /// Request without a reference or explicit clearance
    pub fn new(relation: SpatialRelationship, footprint: Footprint) -> Self {
        Self { relation, footprint, reference: None, clearance: None }
    }

    /// Request for a catalog type, sized from the middle of its ranges
    pub fn for_catalog_type(relation: SpatialRelationship, type_key: &str) -> Result<Self> {
        let entry = DimensionCatalog::lookup(type_key)?;
        Ok(Self::new(relation, entry.typical_footprint()))
    }

    /// Set the reference object
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Override the clearance
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = Some(clearance);
        self
    }
}

/// Solver output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// Chosen center, or the last candidate tried on failure
    pub position: Vec3,
    /// Whether `position` is a valid placement
    pub success: bool,
    /// Relation that was solved
    pub relation: SpatialRelationship,
    /// Reference object, if any
    pub reference: Option<String>,
    /// Footprint that was placed
    pub footprint: Footprint,
    /// Number of candidates evaluated
    pub attempts: usize,
    /// Diagnostic when unsuccessful
    pub failure: Option<SpatialError>,
}

impl PlacementResult {
    /// World box of the placed footprint
    pub fn aabb(&self) -> AABB {
        AABB::from_center_extents(self.position, self.footprint.half_extents())
    }

    /// Failure message, if any
    pub fn reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// Position on success, the diagnostic otherwise
    pub fn into_result(self) -> Result<Vec3> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.position),
        }
    }
}

/// Bookkeeping shared by all search branches
#[derive(Debug, Default)]
struct SearchTrace {
    attempts: usize,
    last: Vec3,
    colliders: Vec<String>,
}

/// Finds collision-free positions satisfying a [`SpatialRelationship`]
#[derive(Debug, Clone)]
pub struct PlacementSolver {
    detector: CollisionDetector,
    config: PlacementConfig,
}

impl PlacementSolver {
    /// Create a solver
    pub fn new(detector: CollisionDetector, config: PlacementConfig) -> Self {
        Self { detector, config }
    }

    /// Solve a placement request against a snapshot
    pub fn solve(&self, request: &PlacementRequest, snapshot: &SceneSnapshot) -> PlacementResult {
        log::debug!(
            "Solving {} for {:?} relative to {:?}",
            request.relation, request.footprint, request.reference
        );

        let mut trace = SearchTrace::default();
        let outcome = self.place(request, snapshot, &mut trace)
            .and_then(|position| self.verify(request, position, snapshot));

        let (position, failure) = match outcome {
            Ok(position) => {
                log::debug!("Placed at {:?} after {} candidates", position.as_slice(), trace.attempts);
                (position, None)
            }
            Err(err) => {
                log::debug!("Placement failed after {} candidates: {}", trace.attempts, err);
                (trace.last, Some(err))
            }
        };

        PlacementResult {
            position,
            success: failure.is_none(),
            relation: request.relation,
            reference: request.reference.clone(),
            footprint: request.footprint,
            attempts: trace.attempts,
            failure,
        }
    }

    fn place(&self, request: &PlacementRequest, snapshot: &SceneSnapshot, trace: &mut SearchTrace) -> Result<Vec3> {
        let footprint = &request.footprint;
        if !footprint.is_valid() {
            return Err(SpatialError::InvalidGeometry {
                name: "footprint".to_string(),
                reason: format!("dimensions must be positive, got {:?}", footprint.size().as_slice()),
            });
        }

        let clearance = request.clearance.unwrap_or(self.config.default_clearance).max(0.0);
        let reference = match request.reference.as_deref() {
            Some(name) => Some((name, *snapshot.require(name)?.1)),
            None => None,
        };
        let relation = request.relation;

        if relation.requires_reference() && reference.is_none() {
            return Err(SpatialError::unsupported(relation, "a reference object is required"));
        }
        let room = match snapshot.room() {
            Some(room) => Some(*room),
            None if relation.requires_room() => {
                return Err(SpatialError::unsupported(relation, "no room bounds have been declared"));
            }
            None => None,
        };

        match (relation, reference, room) {
            (SpatialRelationship::OnTop, Some(support), _) => self.on_top(support, footprint, clearance, snapshot, trace),
            (SpatialRelationship::NextTo(side), Some(neighbour), _) => {
                self.next_to(neighbour, side, footprint, clearance, snapshot, trace)
            }
            (SpatialRelationship::Inside, Some(container), _) => self.inside(container, footprint, snapshot, trace),
            (SpatialRelationship::AgainstWall(wall), _, Some(room)) => {
                let side = wall
                    .or_else(|| reference.map(|(_, aabb)| nearest_wall(&room, aabb.center())))
                    .unwrap_or(Side::Behind);
                self.against_wall(side, &room, footprint, clearance, snapshot, trace)
            }
            (SpatialRelationship::CenteredInRoom, _, Some(room)) => {
                self.centered_in_room(&room, footprint, clearance, snapshot, trace)
            }
            _ => Err(SpatialError::unsupported(relation, "missing reference or room")),
        }
    }

    /// Re-check the final candidate; the intended parent is not a collider
    fn verify(&self, request: &PlacementRequest, position: Vec3, snapshot: &SceneSnapshot) -> Result<Vec3> {
        let aabb = AABB::from_center_extents(position, request.footprint.half_extents());
        let exclude: Vec<&str> = match request.relation {
            SpatialRelationship::OnTop | SpatialRelationship::Inside => request.reference.as_deref().into_iter().collect(),
            _ => Vec::new(),
        };
        let validation = self.detector.validate(&aabb, snapshot, &exclude);
        if validation.is_valid() {
            Ok(position)
        } else {
            Err(SpatialError::NoFreeRegion {
                reason: format!("final candidate rejected: {}", validation.describe()),
                colliders: validation.colliders,
            })
        }
    }

    /// Evaluate one candidate; only collider checks see the `padding`
    fn is_free(
        &self,
        position: Vec3,
        half_extents: Vec3,
        padding: Vec3,
        snapshot: &SceneSnapshot,
        exclude: &[&str],
        trace: &mut SearchTrace,
    ) -> bool {
        trace.attempts += 1;
        trace.last = position;

        let aabb = AABB::from_center_extents(position, half_extents);
        let padded = aabb.inflated(padding);
        trace.colliders = self.detector.find_colliders(&padded, snapshot, exclude);

        trace.colliders.is_empty()
            && !self.detector.penetrates_floor(&aabb)
            && !self.detector.outside_room(&aabb, snapshot.room())
    }

    fn on_top(
        &self,
        (name, support): (&str, AABB),
        footprint: &Footprint,
        clearance: f32,
        snapshot: &SceneSnapshot,
        trace: &mut SearchTrace,
    ) -> Result<Vec3> {
        let half = footprint.half_extents();
        let z = support.max.z + half.z;
        let center = support.center();
        let step = footprint.min_horizontal().min(self.config.spiral_step).max(MIN_SPIRAL_STEP);
        let radius = support.extents().x.max(support.extents().y);

        for offset in SpiralOffsets::new(step, radius) {
            let (x, y) = (center.x + offset.x, center.y + offset.y);
            if x < support.min.x || x > support.max.x || y < support.min.y || y > support.max.y {
                continue;
            }
            let position = Vec3::new(x, y, z);
            if self.is_free(position, half, horizontal(clearance), snapshot, &[name], trace) {
                return Ok(position);
            }
        }

        log::debug!("Spiral search on '{}' exhausted after {} candidates", name, trace.attempts);
        Err(SpatialError::NoFreeRegion {
            reason: format!("no free surface region on '{name}'"),
            colliders: trace.colliders.clone(),
        })
    }

    fn next_to(
        &self,
        (name, neighbour): (&str, AABB),
        side: Side,
        footprint: &Footprint,
        clearance: f32,
        snapshot: &SceneSnapshot,
        trace: &mut SearchTrace,
    ) -> Result<Vec3> {
        let half = footprint.half_extents();
        let axis = side.axis().index();
        let across = side.perpendicular().index();

        let mut base = neighbour.center();
        base[axis] += side.sign() * (neighbour.extents()[axis] + clearance + half[axis]);
        if base.z - half.z < 0.0 {
            // Taller than the reference: stand on the floor instead of sinking into it
            base.z = geometry::floor_contact_z(footprint.height);
        }

        let max_slide = neighbour.extents()[across] + half[across];
        for offset in search::slide_offsets(self.config.slide_step, max_slide) {
            let mut position = base;
            position[across] += offset;
            if self.is_free(position, half, horizontal(clearance), snapshot, &[], trace) {
                return Ok(position);
            }
        }

        Err(SpatialError::NoFreeRegion {
            reason: format!("no free region {side} '{name}'"),
            colliders: trace.colliders.clone(),
        })
    }

    fn inside(
        &self,
        (name, container): (&str, AABB),
        footprint: &Footprint,
        snapshot: &SceneSnapshot,
        trace: &mut SearchTrace,
    ) -> Result<Vec3> {
        let walls = 2.0 * self.config.container_wall_thickness;
        let interior = container.size() - Vec3::repeat(walls);
        let size = footprint.size();
        if (0..3).any(|i| size[i] > interior[i]) {
            return Err(SpatialError::FootprintTooLarge(format!(
                "object too large for container '{name}' (interior {:.3} x {:.3} x {:.3} m)",
                interior.x.max(0.0), interior.y.max(0.0), interior.z.max(0.0)
            )));
        }

        let position = container.center();
        if self.is_free(position, footprint.half_extents(), Vec3::zeros(), snapshot, &[name], trace) {
            Ok(position)
        } else {
            Err(SpatialError::NoFreeRegion {
                reason: format!("container '{name}' is occupied"),
                colliders: trace.colliders.clone(),
            })
        }
    }

    fn against_wall(
        &self,
        side: Side,
        room: &AABB,
        footprint: &Footprint,
        clearance: f32,
        snapshot: &SceneSnapshot,
        trace: &mut SearchTrace,
    ) -> Result<Vec3> {
        ensure_fits_room(room, footprint)?;

        let half = footprint.half_extents();
        let axis = side.axis().index();
        let along = side.perpendicular().index();

        let mut base = room.center();
        base[axis] = if side.sign() > 0.0 {
            room.max[axis] - half[axis]
        } else {
            room.min[axis] + half[axis]
        };
        base.z = room.min.z + geometry::floor_contact_z(footprint.height);

        // Flush against the wall: no gap towards it
        let mut padding = horizontal(clearance);
        padding[axis] = 0.0;

        let max_slide = room.extents()[along] - half[along];
        for offset in search::slide_offsets(self.config.slide_step, max_slide) {
            let mut position = base;
            position[along] += offset;
            if self.is_free(position, half, padding, snapshot, &[], trace) {
                return Ok(position);
            }
        }

        Err(SpatialError::NoFreeRegion {
            reason: format!("no free space along the {} wall", side.wall_name()),
            colliders: trace.colliders.clone(),
        })
    }

    fn centered_in_room(
        &self,
        room: &AABB,
        footprint: &Footprint,
        clearance: f32,
        snapshot: &SceneSnapshot,
        trace: &mut SearchTrace,
    ) -> Result<Vec3> {
        ensure_fits_room(room, footprint)?;

        let center = room.center();
        let position = Vec3::new(center.x, center.y, room.min.z + geometry::floor_contact_z(footprint.height));
        if self.is_free(position, footprint.half_extents(), horizontal(clearance), snapshot, &[], trace) {
            Ok(position)
        } else {
            Err(SpatialError::NoFreeRegion {
                reason: "room center is occupied".to_string(),
                colliders: trace.colliders.clone(),
            })
        }
    }
}

fn horizontal(clearance: f32) -> Vec3 {
    Vec3::new(clearance, clearance, 0.0)
}

fn ensure_fits_room(room: &AABB, footprint: &Footprint) -> Result<()> {
    let room_size = room.size();
    let size = footprint.size();
    if (0..3).any(|i| size[i] > room_size[i]) {
        return Err(SpatialError::FootprintTooLarge(format!(
            "{:.2} x {:.2} x {:.2} m does not fit in a {:.2} x {:.2} x {:.2} m room",
            size.x, size.y, size.z, room_size.x, room_size.y, room_size.z
        )));
    }
    Ok(())
}

/// Room wall closest to a point (first in [`Side::ALL`] order on ties)
fn nearest_wall(room: &AABB, point: Vec3) -> Side {
    let distance = |side: &Side| {
        let axis = side.axis().index();
        if side.sign() > 0.0 {
            room.max[axis] - point[axis]
        } else {
            point[axis] - room.min[axis]
        }
    };
    Side::ALL.into_iter()
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
        .unwrap_or(Side::Behind)
}
