//! Engine error type
//!
//! Every failure crosses the engine boundary as a typed value so an
//! automated caller can react (retry with other parameters, ask for
//! clarification) instead of crashing.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, SpatialError>;

/// Errors reported by engine operations
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SpatialError {
    /// A referenced object name is absent from the snapshot
    #[error("Object '{0}' not found in scene")]
    ObjectNotFound(String),

    /// The relation cannot be applied to this reference/footprint combination
    #[error("Relation '{relation}' is not supported here: {reason}")]
    UnsupportedRelation {
        /// Relation as written by the caller
        relation: String,
        /// Why it was rejected
        reason: String,
    },

    /// The placement search ran out of candidates
    #[error("No free region found: {reason}")]
    NoFreeRegion {
        /// Diagnostic for the caller
        reason: String,
        /// Objects the last candidate collided with
        colliders: Vec<String>,
    },

    /// The object cannot fit inside its container or the room
    #[error("Footprint too large: {0}")]
    FootprintTooLarge(String),

    /// A question or instruction did not match the closed grammar
    #[error("Could not parse '{question}': {reason}")]
    AmbiguousQuery {
        /// Original text
        question: String,
        /// Which slot failed
        reason: String,
    },

    /// Type key missing from the dimension catalog
    #[error("Object type '{0}' not found in dimension catalog")]
    UnknownObjectType(String),

    /// Two snapshot objects share a name
    #[error("Duplicate object name '{0}' in snapshot")]
    DuplicateObject(String),

    /// An object has unusable geometry
    #[error("Invalid geometry for '{name}': {reason}")]
    InvalidGeometry {
        /// Object name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Floor plan view name not recognised
    #[error("Unknown view '{0}' (expected top, bottom, front, back, left, right or all)")]
    UnknownView(String),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for SpatialError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl SpatialError {
    /// Shorthand for [`SpatialError::AmbiguousQuery`]
    pub fn ambiguous(question: &str, reason: impl Into<String>) -> Self {
        Self::AmbiguousQuery { question: question.to_string(), reason: reason.into() }
    }

    /// Shorthand for [`SpatialError::UnsupportedRelation`]
    pub fn unsupported(relation: impl ToString, reason: impl Into<String>) -> Self {
        Self::UnsupportedRelation { relation: relation.to_string(), reason: reason.into() }
    }
}
