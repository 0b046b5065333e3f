//! Engine facade
//!
//! [`SpatialEngine`] wires every component to one [`SpatialConfig`] and
//! exposes the full operation set. It holds no scene state: each call takes
//! the snapshot it works on, so one engine can serve any number of callers.

use crate::{
    catalog::{Category, DimensionCatalog, ObjectDimensionEntry, PlacementRules},
    config::{Config, SpatialConfig},
    error::Result,
    foundation::math::Vec3,
    geometry::{self, Footprint, AABB},
    physics::{CollisionDetector, DirectionSet, MovementRangeCalculator, TransformValidation, TravelRange},
    placement::{self, PlacementRequest, PlacementResult, PlacementSolver, PositionInstruction},
    render::{FloorPlanGrid, FloorPlanRenderer, View, ViewSelection},
    scene::{SceneObject, SceneSnapshot},
    semantic::{QueryAnswer, RelatedObject, RelationshipGraph, SceneSummary},
};

/// Main engine struct
///
/// Every component shares the collision tolerance from the configuration.
#[derive(Debug, Clone)]
pub struct SpatialEngine {
    config: SpatialConfig,
    detector: CollisionDetector,
    solver: PlacementSolver,
    movement: MovementRangeCalculator,
    renderer: FloorPlanRenderer,
    graph: RelationshipGraph,
}

impl Default for SpatialEngine {
    fn default() -> Self {
        Self::build(SpatialConfig::default())
    }
}

impl SpatialEngine {
    /// Create an engine after validating the configuration
    pub fn new(config: SpatialConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine from a `.toml` or `.ron` configuration file
    pub fn from_config_file(path: &str) -> Result<Self> {
        log::info!("Loading engine configuration from {}", path);
        Self::new(SpatialConfig::load_from_file(path)?)
    }

    fn build(config: SpatialConfig) -> Self {
        log::info!("Initializing spatial engine...");
        let detector = CollisionDetector::from_config(&config.collision);
        let movement = MovementRangeCalculator::new(detector, config.movement.clone());
        Self {
            detector,
            solver: PlacementSolver::new(detector, config.placement.clone()),
            renderer: FloorPlanRenderer::new(config.floor_plan.clone()),
            graph: RelationshipGraph::new(config.relationships.clone(), detector, movement.clone()),
            movement,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SpatialConfig {
        &self.config
    }

    // Catalog

    /// Catalog entry for a type key
    pub fn lookup(&self, type_key: &str) -> Result<&'static ObjectDimensionEntry> {
        DimensionCatalog::lookup(type_key)
    }

    /// Catalog entries, optionally filtered by category
    pub fn list(&self, category: Option<Category>) -> Vec<&'static ObjectDimensionEntry> {
        DimensionCatalog::list(category)
    }

    /// Categories present in the catalog
    pub fn categories(&self) -> Vec<Category> {
        DimensionCatalog::categories()
    }

    /// Placement hints for a type key
    pub fn placement_rules(&self, type_key: &str) -> Result<&'static PlacementRules> {
        DimensionCatalog::placement_rules(type_key)
    }

    // Geometry and collision

    /// World AABB of an object description
    pub fn aabb_of(&self, object: &SceneObject) -> AABB {
        geometry::aabb_of(object)
    }

    /// Overlap test with the configured tolerance
    pub fn overlaps(&self, a: &AABB, b: &AABB) -> bool {
        self.detector.test(a, b)
    }

    /// Objects overlapping `candidate`, skipping `exclude`
    pub fn find_colliders(&self, candidate: &AABB, snapshot: &SceneSnapshot, exclude: &[&str]) -> Vec<String> {
        self.detector.find_colliders(candidate, snapshot, exclude)
    }

    /// Check a proposed transform for an existing object
    pub fn validate_transform(
        &self,
        name: &str,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        snapshot: &SceneSnapshot,
    ) -> Result<TransformValidation> {
        self.detector.validate_transform(name, position, rotation, scale, snapshot)
    }

    /// Check where a new object would land
    pub fn validate_new_object(&self, object: &SceneObject, snapshot: &SceneSnapshot) -> Result<TransformValidation> {
        self.detector.validate_new_object(object, snapshot)
    }

    // Placement

    /// Find a collision-free position for a request
    pub fn solve(&self, request: &PlacementRequest, snapshot: &SceneSnapshot) -> PlacementResult {
        let result = self.solver.solve(request, snapshot);
        if result.success {
            log::debug!("Placed {} at {:?} after {} attempts", request.relation, result.position.as_slice(), result.attempts);
        } else {
            log::debug!("Placement {} failed: {}", request.relation, result.reason().unwrap_or_default());
        }
        result
    }

    /// Parse a free-form position instruction
    pub fn parse_instruction(&self, text: &str) -> Result<PositionInstruction> {
        placement::parse_instruction(text)
    }

    /// Parse a placement instruction and solve it for `footprint`
    pub fn place_from_instruction(&self, text: &str, footprint: Footprint, snapshot: &SceneSnapshot) -> Result<PlacementResult> {
        let request = self.parse_instruction(text)?.to_request(footprint)?;
        Ok(self.solve(&request, snapshot))
    }

    // Movement

    /// Free travel of an object in all six directions
    pub fn max_travel(&self, object_name: &str, snapshot: &SceneSnapshot) -> Result<TravelRange> {
        self.movement.max_travel(object_name, snapshot)
    }

    /// Free travel of an object in selected directions
    pub fn max_travel_in(&self, object_name: &str, snapshot: &SceneSnapshot, directions: DirectionSet) -> Result<TravelRange> {
        self.movement.max_travel_in(object_name, snapshot, directions)
    }

    // Floor plans

    /// Render one view with the configured cell size
    pub fn render(&self, snapshot: &SceneSnapshot, view: View) -> Result<FloorPlanGrid> {
        self.renderer.render(snapshot, view)
    }

    /// Render one view with explicit cell size and grid cap
    pub fn render_view(&self, snapshot: &SceneSnapshot, view: View, cell_size: f32, max_grid: usize) -> Result<FloorPlanGrid> {
        self.renderer.render_with(snapshot, view, cell_size, max_grid)
    }

    /// Render a view name ("top", ..., or "all") into grids
    pub fn render_views(&self, snapshot: &SceneSnapshot, views: &str) -> Result<Vec<FloorPlanGrid>> {
        let selection: ViewSelection = views.parse()?;
        self.renderer.render_selection(snapshot, selection, self.config.floor_plan.cell_size, self.config.floor_plan.max_grid)
    }

    /// Render a selection of views as display text
    pub fn render_text(&self, snapshot: &SceneSnapshot, selection: ViewSelection) -> Result<String> {
        self.renderer.render_text(snapshot, selection)
    }

    // Semantics

    /// Everything related to an object within the configured distance, nearest first
    pub fn relationships_of(&self, object_name: &str, snapshot: &SceneSnapshot) -> Result<Vec<RelatedObject>> {
        self.graph.relationships_of(object_name, snapshot)
    }

    /// Everything related to an object within `max_distance`, nearest first
    pub fn relationships_within(&self, object_name: &str, snapshot: &SceneSnapshot, max_distance: f32) -> Result<Vec<RelatedObject>> {
        self.graph.relationships_within(object_name, snapshot, max_distance)
    }

    /// Answer a structured question
    pub fn query(&self, question: &str, snapshot: &SceneSnapshot) -> Result<QueryAnswer> {
        self.graph.query(question, snapshot)
    }

    /// Proximity clusters of two or more objects
    pub fn cluster(&self, snapshot: &SceneSnapshot) -> Vec<Vec<String>> {
        self.graph.cluster(snapshot)
    }

    /// Whole-scene summary
    pub fn summarize(&self, snapshot: &SceneSnapshot) -> SceneSummary {
        self.graph.summarize(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SpatialConfig::default();
        config.movement.precision = -1.0;
        assert!(matches!(SpatialEngine::new(config), Err(SpatialError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(SpatialEngine::from_config_file("does/not/exist.toml"), Err(SpatialError::Config(_))));
    }

    #[test]
    fn test_collision_tolerance_is_shared() {
        let mut config = SpatialConfig::default();
        config.collision.epsilon = 0.1;
        let engine = SpatialEngine::new(config).unwrap();
        let a = AABB::from_center_extents(Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.5, 0.5, 0.5));
        let b = a.translated(Vec3::new(0.95, 0.0, 0.0));
        assert!(!engine.overlaps(&a, &b));
        assert!(SpatialEngine::default().overlaps(&a, &b));
    }

    #[test]
    fn test_place_from_instruction() {
        let snapshot = SceneSnapshot::new(vec![
            SceneObject::new("Desk", Vec3::new(1.0, 1.0, 0.375), Vec3::new(0.6, 0.3, 0.375)),
        ], None).unwrap();
        let engine = SpatialEngine::default();
        let result = engine.place_from_instruction("put the lamp on the Desk", Footprint::new(0.2, 0.2, 0.4), &snapshot).unwrap();
        assert!(result.success);
        approx::assert_relative_eq!(result.position.z, 0.95, epsilon = 1e-4);

        let err = engine.place_from_instruction("move 2m left", Footprint::new(0.2, 0.2, 0.4), &snapshot).unwrap_err();
        assert!(matches!(err, SpatialError::UnsupportedRelation { .. }));
    }

    #[test]
    fn test_relationship_cutoff_comes_from_config() {
        let snapshot = SceneSnapshot::new(vec![
            SceneObject::new("Desk", Vec3::new(0.0, 0.0, 0.375), Vec3::new(0.6, 0.3, 0.375)),
            SceneObject::new("Chair", Vec3::new(0.0, -0.8, 0.45), Vec3::new(0.25, 0.25, 0.45)),
            SceneObject::new("Door", Vec3::new(0.0, -4.0, 1.0), Vec3::new(0.45, 0.05, 1.0)),
        ], None).unwrap();
        let engine = SpatialEngine::default();
        let names = |related: Vec<RelatedObject>| related.into_iter().map(|r| r.name).collect::<Vec<_>>();
        assert_eq!(names(engine.relationships_of("Desk", &snapshot).unwrap()), ["Chair", "Door"]);

        let mut config = SpatialConfig::default();
        config.relationships.max_distance = 2.0;
        let short = SpatialEngine::new(config).unwrap();
        assert_eq!(names(short.relationships_of("Desk", &snapshot).unwrap()), ["Chair"]);
        assert_eq!(names(short.relationships_within("Desk", &snapshot, 10.0).unwrap()), ["Chair", "Door"]);
    }

    #[test]
    fn test_render_views_by_name() {
        let snapshot = SceneSnapshot::new(vec![
            SceneObject::new("Desk", Vec3::new(1.0, 1.0, 0.375), Vec3::new(0.6, 0.3, 0.375)),
        ], None).unwrap();
        let engine = SpatialEngine::default();
        assert_eq!(engine.render_views(&snapshot, "all").unwrap().len(), 6);
        assert!(matches!(engine.render_views(&snapshot, "sideways"), Err(SpatialError::UnknownView(_))));
    }
}
