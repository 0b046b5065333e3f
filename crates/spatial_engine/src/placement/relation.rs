//! Placement relation kinds

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::{Result, SpatialError};
use crate::foundation::math::Axis;

/// Horizontal side of a reference object (or wall of the room)
///
/// World convention: X right, Y back, Z up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// -X
    LeftOf,
    /// +X
    RightOf,
    /// -Y
    InFrontOf,
    /// +Y
    Behind,
}

impl Side {
    /// Every side
    pub const ALL: [Side; 4] = [Side::LeftOf, Side::RightOf, Side::InFrontOf, Side::Behind];

    /// Axis the side lies on
    pub const fn axis(self) -> Axis {
        match self {
            Self::LeftOf | Self::RightOf => Axis::X,
            Self::InFrontOf | Self::Behind => Axis::Y,
        }
    }

    /// Horizontal axis along which a side-by-side candidate slides
    pub const fn perpendicular(self) -> Axis {
        match self.axis() {
            Axis::X => Axis::Y,
            _ => Axis::X,
        }
    }

    /// +1.0 or -1.0 along [`Side::axis`]
    pub const fn sign(self) -> f32 {
        match self {
            Self::RightOf | Self::Behind => 1.0,
            Self::LeftOf | Self::InFrontOf => -1.0,
        }
    }

    /// Relation keyword
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftOf => "left_of",
            Self::RightOf => "right_of",
            Self::InFrontOf => "in_front_of",
            Self::Behind => "behind",
        }
    }

    /// Name of the room wall on this side
    pub const fn wall_name(self) -> &'static str {
        match self {
            Self::LeftOf => "left",
            Self::RightOf => "right",
            Self::InFrontOf => "front",
            Self::Behind => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "left_of" | "left" => Ok(Self::LeftOf),
            "right_of" | "right" => Ok(Self::RightOf),
            "in_front_of" | "in_front" | "front" => Ok(Self::InFrontOf),
            "behind" | "behind_of" | "back" => Ok(Self::Behind),
            _ => Err(SpatialError::unsupported(s, "unknown side")),
        }
    }
}

/// Named spatial relation between a new object and its surroundings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum SpatialRelationship {
    /// Resting on the reference's top surface
    OnTop,
    /// Beside the reference on one side
    NextTo(Side),
    /// At the reference's center, within its walls
    Inside,
    /// Flush with a room wall (nearest to the reference when unspecified)
    AgainstWall(Option<Side>),
    /// On the floor at the room center
    CenteredInRoom,
}

impl SpatialRelationship {
    /// Whether the relation is defined relative to a reference object
    pub const fn requires_reference(self) -> bool {
        matches!(self, Self::OnTop | Self::NextTo(_) | Self::Inside)
    }

    /// Whether the relation needs declared room bounds
    pub const fn requires_room(self) -> bool {
        matches!(self, Self::AgainstWall(_) | Self::CenteredInRoom)
    }
}

impl fmt::Display for SpatialRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTop => f.write_str("on_top"),
            Self::NextTo(side) => write!(f, "next_to:{side}"),
            Self::Inside => f.write_str("inside"),
            Self::AgainstWall(None) => f.write_str("against_wall"),
            Self::AgainstWall(Some(side)) => write!(f, "against_wall:{}", side.wall_name()),
            Self::CenteredInRoom => f.write_str("centered_in_room"),
        }
    }
}

impl FromStr for SpatialRelationship {
    type Err = SpatialError;

    /// Parse `kind[:qualifier]`, e.g. `on_top`, `next_to:left_of`, `against_wall:back`
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        let (kind, qualifier) = match normalized.split_once(':') {
            Some((kind, qualifier)) => (kind, Some(qualifier)),
            None => (normalized.as_str(), None),
        };

        let relation = match (kind, qualifier) {
            ("on_top" | "on_top_of" | "on", None) => Self::OnTop,
            ("next_to" | "beside", None) => Self::NextTo(Side::RightOf),
            ("next_to" | "beside", Some(side)) => Self::NextTo(side.parse()?),
            ("left_of" | "right_of" | "in_front_of" | "behind", None) => Self::NextTo(kind.parse()?),
            ("inside" | "in", None) => Self::Inside,
            ("against_wall", None) => Self::AgainstWall(None),
            ("against_wall", Some(wall)) => Self::AgainstWall(Some(wall.parse()?)),
            ("centered_in_room" | "center" | "centered", None) => Self::CenteredInRoom,
            _ => return Err(SpatialError::unsupported(s, "unknown relation kind")),
        };
        Ok(relation)
    }
}
