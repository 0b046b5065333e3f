//! Physics module for collision detection and movement limits
//!
//! Static geometry only: overlap, floor and room containment tests, plus the
//! per-direction free travel of an object. No gravity, no dynamics.

pub mod collision;
pub mod movement;

pub use collision::{CollisionDetector, TransformValidation};
pub use movement::{
    Direction,
    DirectionSet,
    MovementRangeCalculator,
    Obstruction,
    TravelLimit,
    TravelRange,
};
