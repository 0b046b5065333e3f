//! Floor plan rendering
//!
//! Orthographic ASCII projections of a snapshot from the six cardinal views.
//! Each object's AABB is rasterized into square cells in the two screen
//! axes; the dropped axis is ignored.

pub mod floor_plan;
pub mod legend;
pub mod view;

pub use floor_plan::{FloorPlanGrid, FloorPlanRenderer};
pub use legend::LegendEntry;
pub use view::{ScreenAxis, View, ViewSelection};
