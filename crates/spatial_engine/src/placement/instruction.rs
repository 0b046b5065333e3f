//! Position instructions
//!
//! A closed keyword grammar for short commands such as
//! "put the lamp on the desk" or "move 0.5 m left". Anything outside the
//! grammar is rejected with [`SpatialError::AmbiguousQuery`].

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Result, SpatialError};
use crate::geometry::Footprint;
use crate::physics::Direction;
use super::relation::{Side, SpatialRelationship};
use super::solver::PlacementRequest;

/// Distance used when a move instruction names none
pub const DEFAULT_MOVE_DISTANCE: f32 = 1.0;

/// Preposition of a placement instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preposition {
    /// "on", "on top of"
    On,
    /// "next to", "beside"
    NextTo,
    /// "left of"
    LeftOf,
    /// "right of"
    RightOf,
    /// "in front of"
    InFrontOf,
    /// "behind"
    Behind,
    /// "above", "over"
    Above,
    /// "under", "below", "beneath"
    Below,
    /// "near"
    Near,
    /// "at the center of"
    Center,
}

impl Preposition {
    fn from_phrase(phrase: &str) -> Option<Self> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let prep = match words.as_slice() {
            ["on"] | ["on", "top", "of"] | ["onto"] => Self::On,
            ["next", "to"] | ["beside"] => Self::NextTo,
            [.., "left", "of"] => Self::LeftOf,
            [.., "right", "of"] => Self::RightOf,
            ["in", "front", "of"] => Self::InFrontOf,
            ["behind"] => Self::Behind,
            ["above"] | ["over"] => Self::Above,
            ["under"] | ["below"] | ["beneath"] | ["underneath"] => Self::Below,
            ["near"] => Self::Near,
            [.., "center" | "centre" | "middle", "of"] => Self::Center,
            _ => return None,
        };
        Some(prep)
    }

    /// Relation keyword
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::NextTo => "next_to",
            Self::LeftOf => "left_of",
            Self::RightOf => "right_of",
            Self::InFrontOf => "in_front_of",
            Self::Behind => "behind",
            Self::Above => "above",
            Self::Below => "below",
            Self::Near => "near",
            Self::Center => "center",
        }
    }

    /// Solver relation this preposition maps onto, if any
    pub const fn relationship(self) -> Option<SpatialRelationship> {
        match self {
            Self::On => Some(SpatialRelationship::OnTop),
            Self::NextTo => Some(SpatialRelationship::NextTo(Side::RightOf)),
            Self::LeftOf => Some(SpatialRelationship::NextTo(Side::LeftOf)),
            Self::RightOf => Some(SpatialRelationship::NextTo(Side::RightOf)),
            Self::InFrontOf => Some(SpatialRelationship::NextTo(Side::InFrontOf)),
            Self::Behind => Some(SpatialRelationship::NextTo(Side::Behind)),
            Self::Center => Some(SpatialRelationship::CenteredInRoom),
            Self::Above | Self::Below | Self::Near => None,
        }
    }
}

/// A parsed instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PositionInstruction {
    /// Place relative to a reference object
    Place {
        /// Object being placed, when named ("it" is dropped)
        object: Option<String>,
        /// Relation word
        preposition: Preposition,
        /// Reference object as written
        reference: String,
    },
    /// Translate by a distance along one direction
    MoveRelative {
        /// Object being moved, when named
        object: Option<String>,
        /// Direction of travel
        direction: Direction,
        /// Distance in meters
        distance: f32,
    },
}

impl PositionInstruction {
    /// Build a solver request for a `Place` instruction
    ///
    /// Fails for moves and for prepositions the solver has no relation for.
    pub fn to_request(&self, footprint: Footprint) -> Result<PlacementRequest> {
        match self {
            Self::Place { preposition, reference, .. } => {
                let relation = preposition.relationship()
                    .ok_or_else(|| SpatialError::unsupported(preposition.as_str(), "no placement rule for this preposition"))?;
                let request = PlacementRequest::new(relation, footprint);
                Ok(if relation.requires_reference() { request.with_reference(reference.clone()) } else { request })
            }
            Self::MoveRelative { .. } => Err(SpatialError::unsupported("move_relative", "a move is not a placement")),
        }
    }
}

fn compile(pattern: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    pattern.get_or_init(|| Regex::new(source).ok()).as_ref()
}

fn move_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compile(&PATTERN, concat!(
        r"^(?i)move\s+(?:(?:the\s+)?(?P<object>[a-z_][\w\s-]*?)\s+)?",
        r"(?:(?P<distance>\d+(?:\.\d+)?)\s*(?:m|meters?|metres?)?\s+)?",
        r"(?P<direction>left|right|forwards?|backwards?|back|up|upwards|down|downwards)\s*\.?$",
    ))
}

fn place_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compile(&PATTERN, concat!(
        r"^(?i)(?:place|put|set|move)\s+(?:(?:the\s+)?(?P<object>.+?)\s+)??",
        r"(?P<prep>on\s+top\s+of|onto|on|next\s+to|beside|(?:to\s+the\s+)?left\s+of|(?:to\s+the\s+)?right\s+of|",
        r"in\s+front\s+of|behind|above|over|underneath|under|below|beneath|near|",
        r"(?:at|in)\s+the\s+(?:center|centre|middle)\s+of)",
        r"\s+(?:the\s+)?(?P<reference>.+?)\s*\.?$",
    ))
}

/// Parse a position instruction
pub fn parse_instruction(text: &str) -> Result<PositionInstruction> {
    let text = text.trim();
    let unavailable = || SpatialError::ambiguous(text, "instruction grammar failed to compile");
    let object_of = |caps: &regex::Captures<'_>| {
        caps.name("object")
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("it"))
    };

    if let Some(caps) = move_pattern().ok_or_else(unavailable)?.captures(text) {
        let direction = caps.name("direction")
            .and_then(|m| Direction::from_word(m.as_str()))
            .ok_or_else(|| SpatialError::ambiguous(text, "unknown direction"))?;
        let distance = match caps.name("distance") {
            Some(m) => m.as_str().parse::<f32>()
                .map_err(|_| SpatialError::ambiguous(text, "distance is not a number"))?,
            None => DEFAULT_MOVE_DISTANCE,
        };
        return Ok(PositionInstruction::MoveRelative { object: object_of(&caps), direction, distance });
    }

    if let Some(caps) = place_pattern().ok_or_else(unavailable)?.captures(text) {
        let phrase = caps.name("prep").map_or(String::new(), |m| m.as_str().to_lowercase());
        let preposition = Preposition::from_phrase(&phrase)
            .ok_or_else(|| SpatialError::ambiguous(text, format!("unknown relation '{phrase}'")))?;
        let reference = caps.name("reference").map_or("", |m| m.as_str()).trim().to_string();
        if reference.is_empty() {
            return Err(SpatialError::ambiguous(text, "no reference object"));
        }
        return Ok(PositionInstruction::Place { object: object_of(&caps), preposition, reference });
    }

    log::debug!("Instruction not understood: '{}'", text);
    Err(SpatialError::ambiguous(text, "expected 'place <object> <relation> <reference>' or 'move [distance] <direction>'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(text: &str) -> (Option<String>, Preposition, String) {
        match parse_instruction(text).unwrap() {
            PositionInstruction::Place { object, preposition, reference } => (object, preposition, reference),
            other => panic!("expected a placement, got {other:?}"),
        }
    }

    fn moved(text: &str) -> (Option<String>, Direction, f32) {
        match parse_instruction(text).unwrap() {
            PositionInstruction::MoveRelative { object, direction, distance } => (object, direction, distance),
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_place_on() {
        let (object, prep, reference) = place("place on the desk");
        assert_eq!(object, None);
        assert_eq!(prep, Preposition::On);
        assert_eq!(reference, "desk");
    }

    #[test]
    fn test_put_it_on() {
        let (object, prep, reference) = place("put it on the table");
        assert_eq!(object, None);
        assert_eq!(prep, Preposition::On);
        assert_eq!(reference, "table");
    }

    #[test]
    fn test_named_object() {
        let (object, prep, reference) = place("Put the Lamp on top of the Desk.");
        assert_eq!(object.as_deref(), Some("Lamp"));
        assert_eq!(prep, Preposition::On);
        assert_eq!(reference, "Desk");
    }

    #[test]
    fn test_directional_prepositions() {
        assert_eq!(place("put it to the left of the bookshelf").1, Preposition::LeftOf);
        assert_eq!(place("set to the right of the lamp").1, Preposition::RightOf);
        assert_eq!(place("place in front of the sofa").1, Preposition::InFrontOf);
        assert_eq!(place("move behind the couch").1, Preposition::Behind);
        assert_eq!(place("move next to the chair").1, Preposition::NextTo);
        assert_eq!(place("place above the counter").1, Preposition::Above);
        assert_eq!(place("put under the desk").1, Preposition::Below);
        assert_eq!(place("place near the window").1, Preposition::Near);
    }

    #[test]
    fn test_center_of_room() {
        let (_, prep, reference) = place("place at the center of the room");
        assert_eq!(prep, Preposition::Center);
        assert_eq!(reference, "room");
        assert_eq!(prep.relationship(), Some(SpatialRelationship::CenteredInRoom));
    }

    #[test]
    fn test_first_preposition_wins() {
        let (_, prep, reference) = place("place on the left corner of the table");
        assert_eq!(prep, Preposition::On);
        assert_eq!(reference, "left corner of the table");
    }

    #[test]
    fn test_move_with_distance() {
        let (object, direction, distance) = moved("move 2 meters left");
        assert_eq!(object, None);
        assert_eq!(direction, Direction::NegX);
        assert_eq!(distance, 2.0);
        assert_eq!(moved("move 0.5m right").2, 0.5);
    }

    #[test]
    fn test_move_defaults_to_one_meter() {
        let (_, direction, distance) = moved("move up");
        assert_eq!(direction, Direction::PosZ);
        assert_eq!(distance, DEFAULT_MOVE_DISTANCE);
    }

    #[test]
    fn test_move_backward_is_back() {
        let (_, direction, _) = moved("move 3 meters backward");
        assert_eq!(direction, Direction::PosY);
        assert_eq!(Direction::from_word("back"), Some(direction));
    }

    #[test]
    fn test_move_named_object() {
        let (object, direction, distance) = moved("move the chair 0.3 m forward");
        assert_eq!(object.as_deref(), Some("chair"));
        assert_eq!(direction, Direction::NegY);
        assert_eq!(distance, 0.3);
    }

    #[test]
    fn test_unparseable() {
        let err = parse_instruction("fjdkslfjdsk").unwrap_err();
        assert!(matches!(err, SpatialError::AmbiguousQuery { .. }));
    }

    #[test]
    fn test_to_request() {
        let footprint = Footprint::new(0.2, 0.2, 0.2);
        let request = parse_instruction("put the vase on the shelf").unwrap().to_request(footprint).unwrap();
        assert_eq!(request.relation, SpatialRelationship::OnTop);
        assert_eq!(request.reference.as_deref(), Some("shelf"));
        assert!(parse_instruction("place near the window").unwrap().to_request(footprint).is_err());
        assert!(parse_instruction("move up").unwrap().to_request(footprint).is_err());
    }
}
