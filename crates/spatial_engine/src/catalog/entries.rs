//! Built-in dimension table
//!
//! Values are typical retail ranges in meters (width X, depth Y, height Z).

use super::{Category, DimensionRange, ObjectDimensionEntry, PlacementRules};

const fn r(min: f32, max: f32) -> DimensionRange {
    DimensionRange::range(min, max)
}

const fn f(value: f32) -> DimensionRange {
    DimensionRange::fixed(value)
}

const fn rules(
    against_wall: bool,
    floor_clearance: f32,
    clearance_front: f32,
    clearance_back: f32,
    clearance_sides: f32,
    typical_groupings: &'static [&'static str],
) -> PlacementRules {
    PlacementRules {
        against_wall,
        floor_clearance,
        clearance_front,
        clearance_back,
        clearance_sides,
        typical_groupings,
    }
}

const fn entry(
    type_key: &'static str,
    category: Category,
    width: DimensionRange,
    depth: DimensionRange,
    height: DimensionRange,
    placement_height: Option<f32>,
    rules: PlacementRules,
) -> ObjectDimensionEntry {
    ObjectDimensionEntry { type_key, category, width, depth, height, placement_height, rules }
}

use Category::*;

pub(super) static ENTRIES: &[ObjectDimensionEntry] = &[
    // Bedroom
    entry("single_bed", Bedroom, r(0.90, 1.00), r(1.90, 2.10), r(0.45, 0.60), Some(0.50),
        rules(true, 0.0, 0.60, 0.0, 0.50, &["nightstand", "dresser"])),
    entry("double_bed", Bedroom, r(1.35, 1.50), r(1.90, 2.10), r(0.45, 0.65), Some(0.55),
        rules(true, 0.0, 0.70, 0.0, 0.60, &["nightstand", "dresser", "wardrobe"])),
    entry("king_bed", Bedroom, r(1.80, 2.00), r(2.00, 2.15), r(0.50, 0.70), Some(0.55),
        rules(true, 0.0, 0.75, 0.0, 0.60, &["nightstand", "dresser", "bench"])),
    entry("nightstand", Bedroom, r(0.40, 0.60), r(0.35, 0.45), r(0.50, 0.70), None,
        rules(true, 0.0, 0.40, 0.0, 0.0, &["double_bed", "table_lamp"])),
    entry("dresser", Bedroom, r(0.80, 1.60), r(0.45, 0.55), r(0.75, 1.10), None,
        rules(true, 0.0, 0.90, 0.0, 0.10, &["mirror", "double_bed"])),
    entry("wardrobe", Bedroom, r(1.00, 2.00), r(0.55, 0.65), r(1.80, 2.20), None,
        rules(true, 0.0, 1.00, 0.0, 0.05, &["dresser", "double_bed"])),

    // Living room
    entry("sofa_2seat", LivingRoom, r(1.40, 1.80), r(0.85, 1.00), r(0.75, 0.90), Some(0.45),
        rules(true, 0.0, 0.80, 0.05, 0.30, &["coffee_table", "armchair", "floor_lamp"])),
    entry("sofa_3seat", LivingRoom, r(1.90, 2.40), r(0.85, 1.00), r(0.75, 0.90), Some(0.45),
        rules(true, 0.0, 0.80, 0.05, 0.30, &["coffee_table", "armchair", "tv_stand", "rug"])),
    entry("armchair", LivingRoom, r(0.70, 0.95), r(0.75, 0.95), r(0.80, 1.00), Some(0.45),
        rules(false, 0.0, 0.60, 0.10, 0.30, &["sofa_3seat", "side_table", "floor_lamp"])),
    entry("coffee_table", LivingRoom, r(0.90, 1.30), r(0.50, 0.70), r(0.40, 0.48), None,
        rules(false, 0.0, 0.45, 0.45, 0.30, &["sofa_3seat", "rug"])),
    entry("side_table", LivingRoom, r(0.40, 0.60), r(0.40, 0.60), r(0.50, 0.65), None,
        rules(false, 0.0, 0.20, 0.0, 0.10, &["armchair", "table_lamp"])),
    entry("tv_stand", LivingRoom, r(1.20, 2.00), r(0.35, 0.50), r(0.45, 0.60), None,
        rules(true, 0.0, 2.00, 0.0, 0.20, &["television", "sofa_3seat"])),
    entry("television", LivingRoom, r(0.95, 1.65), r(0.05, 0.10), r(0.55, 0.95), None,
        rules(true, 0.0, 2.00, 0.0, 0.10, &["tv_stand"])),
    entry("bookshelf", LivingRoom, r(0.60, 1.20), r(0.28, 0.40), r(1.50, 2.10), None,
        rules(true, 0.0, 0.90, 0.0, 0.05, &["armchair", "floor_lamp", "desk"])),

    // Dining room
    entry("dining_table", DiningRoom, r(1.20, 2.40), r(0.80, 1.10), r(0.73, 0.78), None,
        rules(false, 0.0, 0.90, 0.90, 0.90, &["dining_chair", "sideboard", "pendant_light"])),
    entry("round_dining_table", DiningRoom, r(0.90, 1.50), r(0.90, 1.50), r(0.73, 0.78), None,
        rules(false, 0.0, 0.90, 0.90, 0.90, &["dining_chair"])),
    entry("dining_chair", DiningRoom, r(0.42, 0.55), r(0.45, 0.58), r(0.80, 1.00), Some(0.46),
        rules(false, 0.0, 0.60, 0.30, 0.10, &["dining_table"])),
    entry("sideboard", DiningRoom, r(1.40, 2.00), r(0.40, 0.50), r(0.75, 0.90), None,
        rules(true, 0.0, 0.90, 0.0, 0.10, &["dining_table"])),
    entry("bar_stool", DiningRoom, r(0.35, 0.45), r(0.35, 0.45), r(0.65, 0.80), Some(0.70),
        rules(false, 0.0, 0.40, 0.30, 0.10, &["kitchen_island"])),

    // Kitchen
    entry("kitchen_counter", Kitchen, r(0.60, 3.00), f(0.60), f(0.90), None,
        rules(true, 0.0, 1.00, 0.0, 0.0, &["refrigerator", "stove", "sink_cabinet"])),
    entry("kitchen_island", Kitchen, r(1.20, 2.50), r(0.90, 1.20), f(0.90), None,
        rules(false, 0.0, 1.00, 1.00, 1.00, &["bar_stool", "pendant_light"])),
    entry("refrigerator", Kitchen, r(0.60, 0.90), r(0.65, 0.80), r(1.70, 1.90), None,
        rules(true, 0.0, 1.10, 0.05, 0.05, &["kitchen_counter"])),
    entry("stove", Kitchen, r(0.60, 0.76), f(0.60), f(0.90), None,
        rules(true, 0.0, 1.10, 0.0, 0.0, &["kitchen_counter", "range_hood"])),
    entry("sink_cabinet", Kitchen, r(0.60, 1.20), f(0.60), f(0.90), None,
        rules(true, 0.0, 1.00, 0.0, 0.0, &["kitchen_counter", "dishwasher"])),
    entry("dishwasher", Kitchen, f(0.60), f(0.60), r(0.82, 0.87), None,
        rules(true, 0.0, 1.00, 0.0, 0.0, &["sink_cabinet"])),
    entry("microwave", Kitchen, r(0.45, 0.60), r(0.32, 0.45), r(0.26, 0.35), None,
        rules(true, 0.90, 0.40, 0.05, 0.05, &["kitchen_counter"])),

    // Bathroom
    entry("toilet", Bathroom, r(0.36, 0.45), r(0.65, 0.75), r(0.70, 0.80), Some(0.42),
        rules(true, 0.0, 0.60, 0.0, 0.20, &["bathroom_sink"])),
    entry("bathroom_sink", Bathroom, r(0.50, 0.70), r(0.40, 0.55), r(0.80, 0.90), None,
        rules(true, 0.0, 0.70, 0.0, 0.10, &["mirror", "toilet"])),
    entry("bathtub", Bathroom, r(1.50, 1.80), r(0.70, 0.80), r(0.50, 0.60), None,
        rules(true, 0.0, 0.75, 0.0, 0.0, &["towel_rack"])),
    entry("shower_tray", Bathroom, r(0.80, 1.20), r(0.80, 1.00), r(0.03, 0.10), None,
        rules(true, 0.0, 0.75, 0.0, 0.0, &["towel_rack"])),
    entry("towel_rack", Bathroom, r(0.45, 0.80), r(0.10, 0.20), r(0.80, 1.20), None,
        rules(true, 0.20, 0.30, 0.0, 0.05, &["bathtub"])),

    // Office
    entry("desk", Office, r(1.00, 1.80), r(0.60, 0.80), r(0.72, 0.76), None,
        rules(true, 0.0, 0.90, 0.0, 0.10, &["office_chair", "desk_lamp", "monitor"])),
    entry("standing_desk", Office, r(1.20, 1.80), r(0.60, 0.80), r(0.65, 1.25), None,
        rules(true, 0.0, 0.90, 0.0, 0.10, &["monitor"])),
    entry("office_chair", Office, r(0.55, 0.70), r(0.55, 0.70), r(0.90, 1.30), Some(0.48),
        rules(false, 0.0, 0.30, 0.60, 0.20, &["desk"])),
    entry("filing_cabinet", Office, r(0.40, 0.50), r(0.50, 0.70), r(0.70, 1.35), None,
        rules(true, 0.0, 0.80, 0.0, 0.05, &["desk"])),
    entry("monitor", Office, r(0.50, 0.80), r(0.15, 0.25), r(0.35, 0.55), None,
        rules(false, 0.0, 0.50, 0.05, 0.05, &["desk", "keyboard"])),
    entry("keyboard", Office, r(0.35, 0.45), r(0.12, 0.16), r(0.02, 0.04), None,
        rules(false, 0.0, 0.10, 0.05, 0.05, &["monitor", "desk"])),
    entry("laptop", Office, r(0.30, 0.38), r(0.21, 0.26), r(0.015, 0.025), None,
        rules(false, 0.0, 0.20, 0.0, 0.05, &["desk"])),

    // Outdoor
    entry("patio_table", Outdoor, r(0.80, 1.80), r(0.80, 1.00), r(0.70, 0.76), None,
        rules(false, 0.0, 0.90, 0.90, 0.90, &["patio_chair", "parasol"])),
    entry("patio_chair", Outdoor, r(0.50, 0.65), r(0.55, 0.70), r(0.80, 0.95), Some(0.44),
        rules(false, 0.0, 0.60, 0.30, 0.10, &["patio_table"])),
    entry("garden_bench", Outdoor, r(1.20, 1.80), r(0.50, 0.65), r(0.75, 0.90), Some(0.45),
        rules(false, 0.0, 0.60, 0.10, 0.20, &["planter"])),
    entry("parasol", Outdoor, r(2.00, 3.00), r(2.00, 3.00), r(2.20, 2.50), None,
        rules(false, 0.0, 0.0, 0.0, 0.0, &["patio_table"])),
    entry("barbecue_grill", Outdoor, r(0.80, 1.40), r(0.50, 0.65), r(1.00, 1.20), None,
        rules(false, 0.0, 0.90, 0.50, 0.50, &["patio_table"])),
    entry("planter", Outdoor, r(0.30, 0.80), r(0.30, 0.80), r(0.40, 0.90), None,
        rules(false, 0.0, 0.10, 0.0, 0.10, &["garden_bench"])),

    // Decor
    entry("floor_lamp", Decor, r(0.25, 0.45), r(0.25, 0.45), r(1.50, 1.85), None,
        rules(false, 0.0, 0.10, 0.0, 0.10, &["armchair", "sofa_3seat"])),
    entry("table_lamp", Decor, r(0.20, 0.40), r(0.20, 0.40), r(0.35, 0.65), None,
        rules(false, 0.0, 0.05, 0.0, 0.05, &["nightstand", "side_table"])),
    entry("desk_lamp", Decor, r(0.15, 0.25), r(0.15, 0.25), r(0.35, 0.55), None,
        rules(false, 0.0, 0.05, 0.0, 0.05, &["desk"])),
    entry("pendant_light", Decor, r(0.25, 0.60), r(0.25, 0.60), r(0.20, 0.50), None,
        rules(false, 1.90, 0.0, 0.0, 0.0, &["dining_table", "kitchen_island"])),
    entry("potted_plant", Decor, r(0.30, 0.60), r(0.30, 0.60), r(0.50, 1.60), None,
        rules(false, 0.0, 0.10, 0.0, 0.10, &["armchair", "bookshelf"])),
    entry("rug", Decor, r(1.60, 3.00), r(1.20, 2.40), r(0.005, 0.02), None,
        rules(false, 0.0, 0.0, 0.0, 0.0, &["sofa_3seat", "coffee_table"])),
    entry("mirror", Decor, r(0.50, 1.00), r(0.02, 0.05), r(0.70, 1.80), None,
        rules(true, 0.90, 0.50, 0.0, 0.05, &["dresser", "bathroom_sink"])),
    entry("wall_art", Decor, r(0.40, 1.50), r(0.02, 0.05), r(0.30, 1.00), None,
        rules(true, 1.40, 0.50, 0.0, 0.10, &["sofa_3seat", "sideboard"])),
    entry("vase", Decor, r(0.10, 0.25), r(0.10, 0.25), r(0.20, 0.50), None,
        rules(false, 0.0, 0.05, 0.0, 0.05, &["side_table", "sideboard", "dining_table"])),
];
