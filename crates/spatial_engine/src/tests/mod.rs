//! Cross-component tests
//!
//! Worked scenarios run through [`crate::SpatialEngine`] end to end; the
//! property checks drive the same operations with seeded random scenes.

mod properties;
mod scenarios;
