//! Semantic layer
//!
//! Everything here is derived from geometry alone: pairwise relations
//! ("on top of", "left of", "near"), proximity clusters, a scene summary
//! and answers to structured questions. Nothing is stored between calls.

pub mod cluster;
pub mod query;
pub mod relations;
pub mod summary;

pub use query::QueryAnswer;
pub use relations::{forward_vector, DistanceCategory, RelatedObject, Relation, RelationshipGraph};
pub use summary::{describe_position, facing_direction, ObjectSummary, SceneScale, SceneSummary};
