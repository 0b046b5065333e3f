//! Foundation layer
//!
//! Vector aliases, the axis enum and rotation helpers used by every other
//! module, plus logger setup for binaries.

pub mod math;
pub mod logging;
