//! Orthographic views

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::{Result, SpatialError};
use crate::foundation::math::Axis;
use crate::geometry::AABB;

/// World axis with a direction, as seen on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenAxis {
    /// World axis
    pub axis: Axis,
    /// Whether screen coordinates grow towards negative world values
    pub flipped: bool,
}

impl ScreenAxis {
    const fn new(axis: Axis, flipped: bool) -> Self {
        Self { axis, flipped }
    }

    /// Screen-space interval covered by a box
    pub fn project(&self, aabb: &AABB) -> (f32, f32) {
        let i = self.axis.index();
        if self.flipped {
            (-aabb.max[i], -aabb.min[i])
        } else {
            (aabb.min[i], aabb.max[i])
        }
    }

    /// Signed label such as `+X` or `-Y`
    pub fn label(&self) -> String {
        format!("{}{}", if self.flipped { '-' } else { '+' }, self.axis.label())
    }
}

/// One of the six cardinal orthographic projections
///
/// Screen axes are right-handed as seen from the camera: the horizontal axis
/// points to screen-right and the vertical axis to screen-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Looking down from +Z
    Top,
    /// Looking up from -Z
    Bottom,
    /// Looking from -Y
    Front,
    /// Looking from +Y
    Back,
    /// Looking from -X
    Left,
    /// Looking from +X
    Right,
}

impl View {
    /// Every view, in rendering order for "all"
    pub const ALL: [View; 6] = [View::Top, View::Bottom, View::Front, View::Back, View::Left, View::Right];

    /// Lower-case name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Heading used in rendered text
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top (looking down, +Z)",
            Self::Bottom => "Bottom (looking up, -Z)",
            Self::Front => "Front (looking from -Y)",
            Self::Back => "Back (looking from +Y)",
            Self::Left => "Left (looking from -X)",
            Self::Right => "Right (looking from +X)",
        }
    }

    /// Screen-right axis
    pub const fn horizontal(self) -> ScreenAxis {
        match self {
            Self::Top | Self::Bottom | Self::Front => ScreenAxis::new(Axis::X, false),
            Self::Back => ScreenAxis::new(Axis::X, true),
            Self::Left => ScreenAxis::new(Axis::Y, true),
            Self::Right => ScreenAxis::new(Axis::Y, false),
        }
    }

    /// Screen-up axis
    pub const fn vertical(self) -> ScreenAxis {
        match self {
            Self::Top => ScreenAxis::new(Axis::Y, false),
            Self::Bottom => ScreenAxis::new(Axis::Y, true),
            _ => ScreenAxis::new(Axis::Z, false),
        }
    }

    /// Axis dropped by the projection
    pub const fn depth_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Z,
            Self::Front | Self::Back => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Self::ALL.iter()
            .copied()
            .find(|v| v.as_str() == name)
            .ok_or_else(|| SpatialError::UnknownView(s.to_string()))
    }
}

/// A single view or all six
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSelection {
    /// One view
    Single(View),
    /// Every view in [`View::ALL`] order
    All,
}

impl ViewSelection {
    /// Views to render
    pub fn views(self) -> Vec<View> {
        match self {
            Self::Single(view) => vec![view],
            Self::All => View::ALL.to_vec(),
        }
    }
}

impl From<View> for ViewSelection {
    fn from(view: View) -> Self {
        Self::Single(view)
    }
}

impl FromStr for ViewSelection {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Single)
        }
    }
}
