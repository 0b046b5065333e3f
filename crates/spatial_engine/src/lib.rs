//! # Spatial Engine
//!
//! Spatial reasoning and placement for automated scene building. Objects are
//! placed using real-world measurements instead of guesswork.
//!
//! ## Features
//!
//! - **Dimension Catalog**: Canonical size ranges for common furniture and decor
//! - **Geometry Model**: Rotation-enclosing world AABBs for every scene object
//! - **Collision Detection**: Overlap, floor penetration and room containment tests
//! - **Placement Solver**: Collision-free positions for "on top of", "left of", ...
//! - **Movement Range**: Free travel per axis direction before first contact
//! - **Floor Plans**: ASCII orthographic projections from six cardinal views
//! - **Relationship Graph**: Semantic relations, clusters and structured queries
//!
//! Every operation is a pure function of an immutable [`SceneSnapshot`] plus
//! its own parameters. The engine never mutates the scene; committing a
//! decision is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_engine::prelude::*;
//!
//! let desk = SceneObject::new("Desk", Vec3::new(1.0, 1.0, 0.73), Vec3::new(0.7, 0.4, 0.02));
//! let snapshot = SceneSnapshot::new(vec![desk], None).unwrap();
//!
//! let engine = SpatialEngine::default();
//! let request = PlacementRequest::new(SpatialRelationship::OnTop, Footprint::new(0.2, 0.1, 0.05))
//!     .with_reference("Desk")
//!     .with_clearance(0.0);
//! let result = engine.solve(&request, &snapshot);
//! assert!(result.success);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod catalog;
pub mod geometry;
pub mod scene;
pub mod physics;
pub mod placement;
pub mod render;
pub mod semantic;

mod engine;
mod error;

#[cfg(test)]
mod tests;

pub use engine::SpatialEngine;
pub use error::{Result, SpatialError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        SpatialEngine, SpatialError,
        foundation::math::{Vec2, Vec3},
        config::{Config, ConfigError, SpatialConfig},
        catalog::{Category, DimensionCatalog, DimensionRange, ObjectDimensionEntry, PlacementRules},
        geometry::{AABB, Footprint},
        scene::{room_shell, RoomShell, SceneObject, SceneSnapshot},
        physics::{CollisionDetector, Direction, DirectionSet, MovementRangeCalculator, TravelRange, TransformValidation},
        placement::{PlacementRequest, PlacementResult, PlacementSolver, Side, SpatialRelationship},
        render::{FloorPlanGrid, FloorPlanRenderer, View, ViewSelection},
        semantic::{QueryAnswer, Relation, RelationshipGraph, SceneSummary},
    };
}
