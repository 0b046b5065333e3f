//! Dimension catalog
//!
//! Canonical real-world size ranges for common object types. The table is
//! compiled into the binary and only ever read, so it can be shared across
//! threads without any synchronization.
//!
//! Lookups are exact on normalized keys (lower case, words joined by `_`).
//! There is no fuzzy matching; callers enumerate with [`DimensionCatalog::list`].

mod entries;

use serde::{Serialize, Deserialize};

use crate::error::{Result, SpatialError};
use crate::geometry::Footprint;

/// Room category an object type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Beds, nightstands, dressers
    Bedroom,
    /// Sofas, coffee tables, TV stands
    LivingRoom,
    /// Dining tables and chairs
    DiningRoom,
    /// Counters, appliances
    Kitchen,
    /// Fixtures and vanities
    Bathroom,
    /// Desks, office chairs, filing
    Office,
    /// Garden and patio furniture
    Outdoor,
    /// Lamps, plants, small items
    Decor,
}

impl Category {
    /// Every category in declaration order
    pub const ALL: [Category; 8] = [
        Category::Bedroom,
        Category::LivingRoom,
        Category::DiningRoom,
        Category::Kitchen,
        Category::Bathroom,
        Category::Office,
        Category::Outdoor,
        Category::Decor,
    ];

    /// Snake-case identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bedroom => "bedroom",
            Self::LivingRoom => "living_room",
            Self::DiningRoom => "dining_room",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Office => "office",
            Self::Outdoor => "outdoor",
            Self::Decor => "decor",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_key(s);
        Self::ALL.iter()
            .copied()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| SpatialError::UnknownObjectType(format!("category '{s}'")))
    }
}

/// A size that is either fixed (`min == max`) or a range, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    /// Smallest typical value
    pub min: f32,
    /// Largest typical value
    pub max: f32,
}

impl DimensionRange {
    /// Range between two values
    pub const fn range(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Single fixed value
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Middle of the range
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }
}

/// Placement hints for an object type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementRules {
    /// Usually stands with its back to a wall
    pub against_wall: bool,
    /// Gap kept under the object (legs, wall mounting) in meters
    pub floor_clearance: f32,
    /// Free space needed in front
    pub clearance_front: f32,
    /// Free space needed behind
    pub clearance_back: f32,
    /// Free space needed on each side
    pub clearance_sides: f32,
    /// Types it is typically grouped with
    pub typical_groupings: &'static [&'static str],
}

/// Canonical dimensions of one object type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectDimensionEntry {
    /// Normalized type key, e.g. `dining_table`
    pub type_key: &'static str,
    /// Room category
    pub category: Category,
    /// Size along X
    pub width: DimensionRange,
    /// Size along Y
    pub depth: DimensionRange,
    /// Size along Z
    pub height: DimensionRange,
    /// Height of the working/seating surface when it differs from the top
    pub placement_height: Option<f32>,
    /// Placement hints
    pub rules: PlacementRules,
}

impl ObjectDimensionEntry {
    /// Footprint using the midpoint of every range
    pub fn typical_footprint(&self) -> Footprint {
        Footprint::new(self.width.midpoint(), self.depth.midpoint(), self.height.midpoint())
    }
}

/// Read-only access to the built-in dimension table
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionCatalog;

impl DimensionCatalog {
    /// Exact lookup on the normalized key
    pub fn lookup(type_key: &str) -> Result<&'static ObjectDimensionEntry> {
        let key = normalize_key(type_key);
        entries::ENTRIES.iter()
            .find(|e| e.type_key == key)
            .ok_or_else(|| {
                log::debug!("Catalog miss for '{}'", type_key);
                SpatialError::UnknownObjectType(type_key.to_string())
            })
    }

    /// All entries, optionally restricted to one category, in table order
    pub fn list(category: Option<Category>) -> Vec<&'static ObjectDimensionEntry> {
        entries::ENTRIES.iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect()
    }

    /// Placement hints for a type
    pub fn placement_rules(type_key: &str) -> Result<&'static PlacementRules> {
        Self::lookup(type_key).map(|e| &e.rules)
    }

    /// Categories that have at least one entry
    pub fn categories() -> Vec<Category> {
        Category::ALL.iter()
            .copied()
            .filter(|c| entries::ENTRIES.iter().any(|e| e.category == *c))
            .collect()
    }
}

/// Lower-case a key and join its words with underscores
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
