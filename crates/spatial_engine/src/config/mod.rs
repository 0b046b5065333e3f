//! Configuration system
//!
//! Every threshold the engine uses lives in [`SpatialConfig`]. None of the
//! numbers are physical constants; they are tuning knobs and can be loaded
//! from TOML or RON files.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its valid range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Collision test tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Penetration depth below which two boxes count as touching, not colliding
    pub epsilon: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { epsilon: 1e-4 }
    }
}

/// Placement solver tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Gap left between neighbours when the caller gives no clearance
    pub default_clearance: f32,
    /// Upper bound for the spiral search step on a support surface
    pub spiral_step: f32,
    /// Increment used when sliding a side-by-side candidate sideways
    pub slide_step: f32,
    /// Wall thickness assumed for containers
    pub container_wall_thickness: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            default_clearance: 0.02,
            spiral_step: 0.05,
            slide_step: 0.05,
            container_wall_thickness: 0.02,
        }
    }
}

/// Movement range sweep tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Lower bound on the sweep step
    pub min_sweep_step: f32,
    /// Search cap without a room, also reported when nothing is in the way
    pub unbounded_travel: f32,
    /// Precision of the contact distance refinement
    pub precision: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            min_sweep_step: 0.005,
            unbounded_travel: 1000.0,
            precision: 1e-5,
        }
    }
}

/// Floor plan rendering defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlanConfig {
    /// Requested cell size in meters
    pub cell_size: f32,
    /// Maximum cells per grid side
    pub max_grid: usize,
    /// Whether rendered text includes the legend
    pub include_legend: bool,
}

impl Default for FloorPlanConfig {
    fn default() -> Self {
        Self {
            cell_size: 0.25,
            max_grid: 120,
            include_legend: true,
        }
    }
}

/// Largest accepted floor plan side, in cells
pub const MAX_GRID_LIMIT: usize = 1024;

/// Relationship graph thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipConfig {
    /// Vertical tolerance for "resting on"
    pub on_epsilon: f32,
    /// Base proximity distance for "near"
    pub near_base: f32,
    /// Multiplier on the summed horizontal half extents added to `near_base`
    pub near_scale: f32,
    /// Minimum dominant-axis offset for a directional relation
    pub direction_deadzone: f32,
    /// Center-to-center cutoff for reported relations
    pub max_distance: f32,
    /// Minimum cosine between forward and the direction to the other object for "facing"
    pub facing_threshold: f32,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            on_epsilon: 0.02,
            near_base: 0.5,
            near_scale: 1.0,
            direction_deadzone: 0.05,
            max_distance: 5.0,
            facing_threshold: 0.7,
        }
    }
}

/// # Spatial Engine Configuration
///
/// Groups the tuning of every engine component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Collision tests
    pub collision: CollisionConfig,
    /// Placement solver
    pub placement: PlacementConfig,
    /// Movement range calculator
    pub movement: MovementConfig,
    /// Floor plan renderer
    pub floor_plan: FloorPlanConfig,
    /// Relationship graph
    pub relationships: RelationshipConfig,
}

impl Config for SpatialConfig {}

impl SpatialConfig {
    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: format!("must be positive and finite, got {value}") })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: format!("must be non-negative and finite, got {value}") })
            }
        }

        non_negative("collision.epsilon", self.collision.epsilon)?;
        non_negative("placement.default_clearance", self.placement.default_clearance)?;
        positive("placement.spiral_step", self.placement.spiral_step)?;
        positive("placement.slide_step", self.placement.slide_step)?;
        non_negative("placement.container_wall_thickness", self.placement.container_wall_thickness)?;
        positive("movement.min_sweep_step", self.movement.min_sweep_step)?;
        positive("movement.unbounded_travel", self.movement.unbounded_travel)?;
        positive("movement.precision", self.movement.precision)?;
        positive("floor_plan.cell_size", self.floor_plan.cell_size)?;
        if !(1..=MAX_GRID_LIMIT).contains(&self.floor_plan.max_grid) {
            return Err(ConfigError::Invalid {
                field: "floor_plan.max_grid",
                reason: format!("must be between 1 and {MAX_GRID_LIMIT}, got {}", self.floor_plan.max_grid),
            });
        }
        non_negative("relationships.on_epsilon", self.relationships.on_epsilon)?;
        non_negative("relationships.near_base", self.relationships.near_base)?;
        non_negative("relationships.near_scale", self.relationships.near_scale)?;
        non_negative("relationships.direction_deadzone", self.relationships.direction_deadzone)?;
        positive("relationships.max_distance", self.relationships.max_distance)?;
        let threshold = self.relationships.facing_threshold;
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid {
                field: "relationships.facing_threshold",
                reason: format!("must be a cosine in [-1, 1], got {threshold}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SpatialConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SpatialConfig = toml::from_str("[relationships]\nnear_base = 1.5\n").unwrap();
        assert_eq!(config.relationships.near_base, 1.5);
        assert_eq!(config.relationships.on_epsilon, RelationshipConfig::default().on_epsilon);
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn test_ron_roundtrip_keeps_values() {
        let mut config = SpatialConfig::default();
        config.floor_plan.max_grid = 40;
        let text = ron::ser::to_string(&config).unwrap();
        let parsed: SpatialConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_zero_step() {
        let mut config = SpatialConfig::default();
        config.placement.slide_step = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "placement.slide_step", .. })));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let mut config = SpatialConfig::default();
        config.floor_plan.max_grid = MAX_GRID_LIMIT;
        assert!(config.validate().is_ok());
        config.floor_plan.max_grid = MAX_GRID_LIMIT + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "floor_plan.max_grid", .. })));
        config.floor_plan.max_grid = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "floor_plan.max_grid", .. })));
    }

    #[test]
    fn test_rejects_facing_threshold_outside_cosine_range() {
        let mut config = SpatialConfig::default();
        config.relationships.facing_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "relationships.facing_threshold", .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = SpatialConfig::default().save_to_file("settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
