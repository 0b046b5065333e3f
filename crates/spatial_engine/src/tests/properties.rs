//! Randomized invariant checks over seeded scenes

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::prelude::*;
use crate::physics::Obstruction;

const SEED: u64 = 0x5eed_f100;
const CASES: usize = 40;

fn random_box(rng: &mut StdRng) -> AABB {
    let center = Vec3::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0), rng.gen_range(0.0..2.0));
    let half = Vec3::new(rng.gen_range(0.05..0.8), rng.gen_range(0.05..0.8), rng.gen_range(0.05..0.8));
    AABB::from_center_extents(center, half)
}

/// Floor-standing boxes, one per cell of a 4 x 4 grid of 1 m cells, inside a
/// 4 x 4 x 3 m room; none of them touch.
fn random_room(rng: &mut StdRng) -> SceneSnapshot {
    let mut objects = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            if rng.gen_bool(0.4) {
                continue;
            }
            let half = Vec3::new(rng.gen_range(0.05..0.4), rng.gen_range(0.05..0.4), rng.gen_range(0.1..0.6));
            let slack = Vec3::new(0.45 - half.x, 0.45 - half.y, 0.0);
            let center = Vec3::new(
                i as f32 + 0.5 + rng.gen_range(-slack.x..=slack.x),
                j as f32 + 0.5 + rng.gen_range(-slack.y..=slack.y),
                half.z,
            );
            objects.push(SceneObject::new(format!("Box_{i}_{j}"), center, half));
        }
    }
    SceneSnapshot::new(objects, Some(AABB::from_dimensions(4.0, 4.0, 3.0))).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let detector = CollisionDetector::default();
        for _ in 0..CASES * 10 {
            let (a, b) = (random_box(&mut rng), random_box(&mut rng));
            assert_eq!(detector.test(&a, &b), detector.test(&b, &a));
        }
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let detector = CollisionDetector::default();
        for _ in 0..CASES {
            let a = random_box(&mut rng);
            let gap = rng.gen_range(0.0..detector.epsilon() * 0.5);
            let b = a.translated(Vec3::new(a.size().x - gap, 0.0, 0.0));
            assert!(!detector.test(&a, &b));
            assert!(!detector.test(&b, &a));
        }
    }

    #[test]
    fn test_solve_results_revalidate() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let engine = SpatialEngine::default();
        let detector = CollisionDetector::default();

        for case in 0..CASES {
            let snapshot = random_room(&mut rng);
            let Some(reference) = snapshot.objects().first().map(|o| o.name.clone()) else {
                continue;
            };
            let footprint = Footprint::new(rng.gen_range(0.05..0.3), rng.gen_range(0.05..0.3), rng.gen_range(0.05..0.3));
            let relations = [
                SpatialRelationship::OnTop,
                SpatialRelationship::Inside,
                SpatialRelationship::NextTo(Side::ALL[case % 4]),
                SpatialRelationship::AgainstWall(Some(Side::ALL[(case + 1) % 4])),
                SpatialRelationship::CenteredInRoom,
            ];

            for relation in relations {
                let request = PlacementRequest::new(relation, footprint).with_reference(reference.clone());
                let result = engine.solve(&request, &snapshot);
                if !result.success {
                    assert!(result.failure.is_some());
                    continue;
                }
                let exclude: Vec<&str> = match relation {
                    SpatialRelationship::OnTop | SpatialRelationship::Inside => vec![reference.as_str()],
                    _ => Vec::new(),
                };
                let validation = detector.validate(&result.aabb(), &snapshot, &exclude);
                assert!(validation.is_valid(), "case {case} {relation}: {}", validation.describe());
            }
        }
    }

    #[test]
    fn test_on_top_of_empty_surface_is_exact() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let engine = SpatialEngine::default();
        for _ in 0..CASES {
            let support = random_box(&mut rng);
            let snapshot = SceneSnapshot::new(
                vec![SceneObject::new("Support", support.center(), support.extents())],
                None,
            ).unwrap();
            let footprint = Footprint::new(rng.gen_range(0.02..0.5), rng.gen_range(0.02..0.5), rng.gen_range(0.02..0.5));
            let request = PlacementRequest::new(SpatialRelationship::OnTop, footprint).with_reference("Support");

            let result = engine.solve(&request, &snapshot);
            assert!(result.success, "{:?}", result.reason());
            approx::assert_relative_eq!(result.position.z, support.max.z + footprint.half_height(), epsilon = 1e-5);
            assert!(support.contains_point(Vec3::new(result.position.x, result.position.y, support.center().z)));
        }
    }

    #[test]
    fn test_travel_distance_is_the_contact_boundary() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let engine = SpatialEngine::default();
        let detector = CollisionDetector::default();
        let nudge = 1e-3;

        for _ in 0..CASES / 4 {
            let snapshot = random_room(&mut rng);
            for (object, aabb) in snapshot.iter() {
                let range = engine.max_travel(&object.name, &snapshot).unwrap();
                for (direction, limit) in &range.limits {
                    if matches!(limit.obstruction, Obstruction::Unobstructed | Obstruction::Floor) {
                        continue;
                    }
                    let exclude = [object.name.as_str()];
                    let short = aabb.translated(direction.vector() * (limit.distance - nudge).max(0.0));
                    let long = aabb.translated(direction.vector() * (limit.distance + nudge));
                    assert!(
                        detector.validate(&short, &snapshot, &exclude).is_valid(),
                        "{} {}: free side of {:.4}", object.name, direction.label(), limit.distance
                    );
                    assert!(
                        !detector.validate(&long, &snapshot, &exclude).is_valid(),
                        "{} {}: blocked side of {:.4}", object.name, direction.label(), limit.distance
                    );
                }
            }
        }
    }

    #[test]
    fn test_grid_scales_with_cell_size() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let engine = SpatialEngine::default();
        for _ in 0..CASES / 4 {
            let snapshot = random_room(&mut rng);
            let fine = engine.render_view(&snapshot, View::Top, 0.1, 1000).unwrap();
            let coarse = engine.render_view(&snapshot, View::Top, 0.2, 1000).unwrap();
            // One padding cell on each side plus ceil rounding
            assert!(fine.cols().abs_diff(2 * coarse.cols()) <= 4, "{} vs {}", fine.cols(), coarse.cols());
            assert!(fine.row_count().abs_diff(2 * coarse.row_count()) <= 4);
        }
    }
}
