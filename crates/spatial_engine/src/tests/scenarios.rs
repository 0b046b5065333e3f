//! End-to-end scenarios through the engine facade

use crate::prelude::*;
use crate::physics::Obstruction;
use crate::semantic::Relation;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_object_on_thin_desk() {
        let desk = SceneObject::new("Desk", Vec3::new(1.0, 1.0, 0.73), Vec3::new(0.7, 0.4, 0.02));
        let snapshot = SceneSnapshot::new(vec![desk], None).unwrap();
        let request = PlacementRequest::new(SpatialRelationship::OnTop, Footprint::new(0.2, 0.1, 0.05))
            .with_reference("Desk")
            .with_clearance(0.0);

        let result = SpatialEngine::default().solve(&request, &snapshot);

        assert!(result.success);
        assert_relative_eq!(result.position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(result.position.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(result.position.z, 0.775, epsilon = 1e-5);
    }

    #[test]
    fn test_coincident_boxes_and_side_placement() {
        let engine = SpatialEngine::default();
        let a = SceneObject::new("A", Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.5, 0.5, 0.5));
        let b = SceneObject::new("B", Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.5, 0.5, 0.5));
        assert!(engine.overlaps(&engine.aabb_of(&a), &engine.aabb_of(&b)));

        let snapshot = SceneSnapshot::new(vec![a], None).unwrap();
        let request = PlacementRequest::new(SpatialRelationship::NextTo(Side::RightOf), Footprint::new(1.0, 1.0, 1.0))
            .with_reference("A")
            .with_clearance(0.02);
        let result = engine.solve(&request, &snapshot);

        assert!(result.success);
        assert_relative_eq!(result.position.x, 1.02, epsilon = 1e-5);
        assert_relative_eq!(result.position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.position.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_catalog_lookup() {
        let engine = SpatialEngine::default();
        let table = engine.lookup("dining_table").unwrap();
        assert_eq!(table.category, Category::DiningRoom);
        assert!((1.2..=2.2).contains(&table.width.midpoint()));
        assert!(matches!(engine.lookup("unicorn_throne"), Err(SpatialError::UnknownObjectType(_))));
    }

    #[test]
    fn test_furnish_a_room() {
        let engine = SpatialEngine::default();
        let shell = room_shell(5.0, 4.0, 2.6, 0.1).unwrap();
        let mut snapshot = SceneSnapshot::new(shell.objects, Some(shell.bounds)).unwrap();

        let steps = [
            ("Table", PlacementRequest::for_catalog_type(SpatialRelationship::CenteredInRoom, "dining_table").unwrap()),
            ("Sideboard", PlacementRequest::for_catalog_type(SpatialRelationship::AgainstWall(Some(Side::Behind)), "sideboard").unwrap()),
            ("Chair", PlacementRequest::for_catalog_type(SpatialRelationship::NextTo(Side::InFrontOf), "dining_chair")
                .unwrap()
                .with_reference("Table")),
        ];
        for (name, request) in steps {
            let result = engine.solve(&request, &snapshot);
            assert!(result.success, "{name}: {:?}", result.reason());
            let half = request.footprint.half_extents();
            snapshot = snapshot.with_object(SceneObject::new(name, result.position, half)).unwrap();
        }

        let vase = PlacementRequest::new(SpatialRelationship::OnTop, Footprint::new(0.15, 0.15, 0.3)).with_reference("Table");
        let result = engine.solve(&vase, &snapshot);
        assert!(result.success);
        snapshot = snapshot.with_object(SceneObject::new("Vase", result.position, Footprint::new(0.15, 0.15, 0.3).half_extents())).unwrap();

        let related = engine.relationships_of("Table", &snapshot).unwrap();
        assert!(related.iter().any(|r| r.name == "Vase" && r.has(Relation::OnTopOf)));
        assert!(related.iter().any(|r| r.name == "Chair" && r.has(Relation::InFrontOf)));

        match engine.query("what is on the table?", &snapshot).unwrap() {
            QueryAnswer::Objects { objects, .. } => assert_eq!(objects, vec!["Vase"]),
            other => panic!("unexpected answer {other:?}"),
        }

        let travel = engine.max_travel("Sideboard", &snapshot).unwrap();
        assert_eq!(travel.limit(Direction::PosY).unwrap().obstruction, Obstruction::Object("Wall_Back".to_string()));
        assert_relative_eq!(travel.distance(Direction::PosY).unwrap(), 0.0, epsilon = 1e-3);

        let plan = engine.render(&snapshot, View::Top).unwrap();
        assert!(plan.symbol_of("Table").is_some());
        assert!(plan.to_string().contains("Legend:"));

        let summary = engine.summarize(&snapshot);
        assert_eq!(summary.object_count, 9);
    }

    #[test]
    fn test_unknown_reference_is_typed() {
        let engine = SpatialEngine::default();
        let snapshot = SceneSnapshot::empty(None);
        let request = PlacementRequest::new(SpatialRelationship::OnTop, Footprint::new(0.1, 0.1, 0.1)).with_reference("Ghost");
        let result = engine.solve(&request, &snapshot);
        assert!(!result.success);
        assert!(matches!(result.failure, Some(SpatialError::ObjectNotFound(_))));
        assert!(matches!(engine.max_travel("Ghost", &snapshot), Err(SpatialError::ObjectNotFound(_))));
    }
}
