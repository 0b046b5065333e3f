//! Placement module
//!
//! Solves for collision-free positions that satisfy a named relation
//! ("on top of the desk", "left of the sofa", "against the back wall") and
//! parses short position instructions into solver requests.

pub mod instruction;
pub mod relation;
pub mod search;
pub mod solver;

pub use instruction::{parse_instruction, PositionInstruction, Preposition};
pub use relation::{Side, SpatialRelationship};
pub use solver::{PlacementRequest, PlacementResult, PlacementSolver};
