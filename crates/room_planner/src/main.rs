//! Room planner demo
//!
//! Furnishes an empty dining room with catalog furniture through the
//! spatial engine, then prints floor plans, relations, query answers and
//! movement ranges for the result.
//!
//! Usage: `room_planner [config.toml|config.ron]`

use spatial_engine::foundation::logging;
use spatial_engine::prelude::*;

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Furniture placed in order; later entries may reference earlier ones
const LAYOUT: &[(&str, &str, &str, Option<&str>)] = &[
    ("Table", "dining_table", "centered_in_room", None),
    ("Sideboard", "sideboard", "against_wall:back", None),
    ("Chair_Front", "dining_chair", "next_to:in_front_of", Some("Table")),
    ("Chair_Back", "dining_chair", "next_to:behind", Some("Table")),
    ("Chair_Left", "dining_chair", "next_to:left_of", Some("Table")),
];

const QUESTIONS: &[&str] = &[
    "what is on the table?",
    "what is in front of the table",
    "where is the sideboard?",
    "is the vase on the table?",
    "how far can chair left move left?",
    "what collides with the table",
    "what is the meaning of life",
];

fn place(engine: &SpatialEngine, snapshot: &SceneSnapshot, name: &str, request: &PlacementRequest) -> AppResult<SceneSnapshot> {
    let result = engine.solve(request, snapshot);
    let position = result.clone().into_result()?;
    log::info!(
        "{:<12} {:<24} -> ({:.2}, {:.2}, {:.2}) in {} attempts",
        name, request.relation.to_string(), position.x, position.y, position.z, result.attempts
    );
    let object = SceneObject::new(name, position, request.footprint.half_extents());
    Ok(snapshot.with_object(object)?)
}

fn furnish(engine: &SpatialEngine) -> AppResult<SceneSnapshot> {
    let shell = room_shell(5.0, 4.0, 2.6, 0.1)?;
    let mut snapshot = SceneSnapshot::new(shell.objects, Some(shell.bounds))?;

    for (name, type_key, relation, reference) in LAYOUT {
        let mut request = PlacementRequest::for_catalog_type(relation.parse()?, type_key)?;
        if let Some(reference) = reference {
            request = request.with_reference(*reference);
        }
        snapshot = place(engine, &snapshot, name, &request)?;
    }

    // Same thing, phrased as an instruction
    let instruction = "put the vase on Table";
    let vase = engine.lookup("vase")?.typical_footprint();
    let request = engine.parse_instruction(instruction)?.to_request(vase)?;
    log::info!("Parsed '{}' as {}", instruction, request.relation);
    place(engine, &snapshot, "Vase", &request)
}

fn report(engine: &SpatialEngine, snapshot: &SceneSnapshot) -> AppResult<()> {
    println!("{}\n", engine.render_text(snapshot, ViewSelection::Single(View::Top))?);
    println!("{}\n", engine.render(snapshot, View::Front)?);

    println!("Relationships of Table:");
    for related in engine.relationships_of("Table", snapshot)? {
        let relations: Vec<&str> = related.relations.iter().map(|r| r.as_str()).collect();
        println!("  {:<12} {:>5.2} m  {}", related.name, related.distance, relations.join(", "));
    }

    println!("\nQuestions:");
    for question in QUESTIONS {
        match engine.query(question, snapshot) {
            Ok(answer) => println!("  {question}\n    {answer:?}"),
            Err(err) => println!("  {question}\n    {err}"),
        }
    }

    println!("\nFree travel of Chair_Front:");
    let range = engine.max_travel("Chair_Front", snapshot)?;
    for (direction, limit) in &range.limits {
        println!("  {:<3} {:>8.3} m  {:?}", direction.label(), limit.distance, limit.obstruction);
    }

    let (table, _) = snapshot.require("Table")?;
    let shifted = table.position + Vec3::new(0.0, 1.2, 0.0);
    let check = engine.validate_transform("Table", shifted, table.rotation, table.scale, snapshot)?;
    println!("\nMoving Table by +1.2 m in Y: {}", if check.is_valid() { "ok".to_string() } else { check.describe() });

    let summary = engine.summarize(snapshot);
    println!("\n{}", summary.text);
    for object in &summary.objects {
        println!("  {:<12} {}, {}, facing {}", object.name, object.size_category.label(), object.position_description, object.facing);
    }
    Ok(())
}

fn main() -> AppResult<()> {
    logging::init_with_default("info");
    log::info!("Starting room planner");

    let engine = match std::env::args().nth(1) {
        Some(path) => SpatialEngine::from_config_file(&path)?,
        None => SpatialEngine::default(),
    };

    let snapshot = furnish(&engine)?;
    report(&engine, &snapshot)?;

    log::info!("Room planner finished");
    Ok(())
}
