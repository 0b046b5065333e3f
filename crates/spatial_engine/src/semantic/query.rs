//! Structured scene queries
//!
//! Questions are matched against a small closed grammar whose slots are
//! relation keywords and object names present in the snapshot:
//!
//! - `what is on|under|near|left of|right of|in front of|behind|inside <X>`
//! - `where is <X>`
//! - `what collides with|overlaps <X>`
//! - `is <A> on|under|near|left of|... <B>`
//! - `how far can <X> move [direction]`
//!
//! Anything else, and any object slot that matches no name or several, is
//! an [`SpatialError::AmbiguousQuery`]. Nothing is guessed.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::catalog::normalize_key;
use crate::error::{Result, SpatialError};
use crate::foundation::math::Vec3;
use crate::physics::{Direction, DirectionSet, TravelRange};
use crate::scene::SceneSnapshot;
use super::relations::{RelatedObject, Relation, RelationshipGraph};
use super::summary::describe_position;

/// Structured answer to a question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryAnswer {
    /// Objects standing in `relation` to `subject`
    Objects {
        /// Object asked about
        subject: String,
        /// Relation asked for
        relation: Relation,
        /// Matching objects, nearest first
        objects: Vec<String>,
    },
    /// Where an object is
    Location {
        /// Object asked about
        subject: String,
        /// World-space center
        position: Vec3,
        /// Position relative to the scene bounds
        description: String,
        /// Everything related to it
        related: Vec<RelatedObject>,
    },
    /// Objects overlapping another
    Colliders {
        /// Object asked about
        subject: String,
        /// Overlapping objects, in snapshot order
        objects: Vec<String>,
    },
    /// Yes/no relation check
    Check {
        /// Object whose relation is checked
        subject: String,
        /// Relation asked for
        relation: Relation,
        /// Reference object
        reference: String,
        /// Whether the relation holds
        holds: bool,
    },
    /// Free travel of an object
    Travel {
        /// Per-direction limits
        range: TravelRange,
    },
}

const RELATION_WORDS: &str = r"on\s+top\s+of|on|under|underneath|beneath|below|near|next\s+to|(?:to\s+the\s+)?left\s+of|(?:to\s+the\s+)?right\s+of|in\s+front\s+of|behind|inside|in";

struct Grammar {
    related: Regex,
    location: Regex,
    colliders: Regex,
    check: Regex,
    travel: Regex,
}

impl Grammar {
    fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            related: Regex::new(&format!(
                r"^(?i)what(?:'s|\s+is|\s+are)\s+(?P<rel>{RELATION_WORDS})\s+(?:the\s+)?(?P<x>.+?)\s*\??$"
            ))?,
            location: Regex::new(r"^(?i)where(?:'s|\s+is|\s+are)\s+(?:the\s+)?(?P<x>.+?)\s*\??$")?,
            colliders: Regex::new(
                r"^(?i)what\s+(?:collides\s+with|overlaps(?:\s+with)?|intersects(?:\s+with)?)\s+(?:the\s+)?(?P<x>.+?)\s*\??$",
            )?,
            check: Regex::new(&format!(
                r"^(?i)(?:is|are)\s+(?:the\s+)?(?P<a>.+?)\s+(?P<rel>{RELATION_WORDS})\s+(?:the\s+)?(?P<b>.+?)\s*\??$"
            ))?,
            travel: Regex::new(
                r"^(?i)how\s+far\s+can\s+(?:the\s+)?(?P<x>.+?)\s+(?:move|go)(?:\s+(?P<dir>left|right|forwards?|backwards?|back|up|upwards|down|downwards))?\s*\??$",
            )?,
        })
    }

    fn get() -> Option<&'static Grammar> {
        static GRAMMAR: OnceLock<Option<Grammar>> = OnceLock::new();
        GRAMMAR.get_or_init(|| Self::compile().ok()).as_ref()
    }
}

fn relation_from_words(words: &str) -> Option<Relation> {
    let words: Vec<String> = words.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    let relation = match words.as_slice() {
        ["on"] | ["on", "top", "of"] => Relation::OnTopOf,
        ["under" | "underneath" | "beneath" | "below"] => Relation::Beneath,
        ["near"] | ["next", "to"] => Relation::Near,
        [.., "left", "of"] => Relation::LeftOf,
        [.., "right", "of"] => Relation::RightOf,
        ["in", "front", "of"] => Relation::InFrontOf,
        ["behind"] => Relation::Behind,
        ["inside" | "in"] => Relation::Inside,
        _ => return None,
    };
    Some(relation)
}

/// Resolve a name slot against the snapshot
///
/// Exact match first, then case-insensitive, then on normalized keys
/// ("coffee table" finds `Coffee_Table`). Several matches are ambiguous.
fn resolve_name(question: &str, slot: &str, snapshot: &SceneSnapshot) -> Result<String> {
    let slot = slot.trim();
    if snapshot.contains(slot) {
        return Ok(slot.to_string());
    }

    let matchers: [&dyn Fn(&str) -> bool; 2] = [
        &|name: &str| name.eq_ignore_ascii_case(slot),
        &|name: &str| normalize_key(name) == normalize_key(slot),
    ];
    for matches in matchers {
        let found: Vec<&str> = snapshot.objects().iter().map(|o| o.name.as_str()).filter(|n| matches(n)).collect();
        match found.as_slice() {
            [] => continue,
            [name] => return Ok((*name).to_string()),
            several => {
                return Err(SpatialError::ambiguous(
                    question,
                    format!("'{slot}' matches several objects: {}", several.join(", ")),
                ));
            }
        }
    }
    Err(SpatialError::ambiguous(question, format!("no object named '{slot}' in the scene")))
}

fn slot<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

impl RelationshipGraph {
    /// Answer a question about the snapshot
    pub fn query(&self, question: &str, snapshot: &SceneSnapshot) -> Result<QueryAnswer> {
        let question = question.trim();
        let grammar = Grammar::get().ok_or_else(|| SpatialError::ambiguous(question, "query grammar failed to compile"))?;
        log::debug!("Query: '{}'", question);

        if let Some(caps) = grammar.colliders.captures(question) {
            let subject = resolve_name(question, slot(&caps, "x"), snapshot)?;
            let (_, aabb) = snapshot.require(&subject)?;
            let objects = self.detector.find_colliders(aabb, snapshot, &[subject.as_str()]);
            return Ok(QueryAnswer::Colliders { subject, objects });
        }

        if let Some(caps) = grammar.related.captures(question) {
            let relation = relation_from_words(slot(&caps, "rel"))
                .ok_or_else(|| SpatialError::ambiguous(question, "unknown relation"))?;
            let subject = resolve_name(question, slot(&caps, "x"), snapshot)?;
            let objects = self.relationships_of(&subject, snapshot)?
                .into_iter()
                .filter(|related| related.has(relation))
                .map(|related| related.name)
                .collect();
            return Ok(QueryAnswer::Objects { subject, relation, objects });
        }

        if let Some(caps) = grammar.location.captures(question) {
            let subject = resolve_name(question, slot(&caps, "x"), snapshot)?;
            let (_, aabb) = snapshot.require(&subject)?;
            let description = snapshot.scene_bounds()
                .map_or_else(|| "center".to_string(), |bounds| describe_position(aabb, &bounds));
            let related = self.relationships_of(&subject, snapshot)?;
            return Ok(QueryAnswer::Location { position: aabb.center(), subject, description, related });
        }

        if let Some(caps) = grammar.travel.captures(question) {
            let subject = resolve_name(question, slot(&caps, "x"), snapshot)?;
            let directions = match caps.name("dir") {
                Some(word) => Direction::from_word(word.as_str())
                    .ok_or_else(|| SpatialError::ambiguous(question, "unknown direction"))?
                    .flag(),
                None => DirectionSet::all(),
            };
            let range = self.movement.max_travel_in(&subject, snapshot, directions)?;
            return Ok(QueryAnswer::Travel { range });
        }

        if let Some(caps) = grammar.check.captures(question) {
            let relation = relation_from_words(slot(&caps, "rel"))
                .ok_or_else(|| SpatialError::ambiguous(question, "unknown relation"))?;
            let subject = resolve_name(question, slot(&caps, "a"), snapshot)?;
            let reference = resolve_name(question, slot(&caps, "b"), snapshot)?;
            let holds = self.relationships_of(&reference, snapshot)?
                .iter()
                .any(|related| related.name == subject && related.has(relation));
            return Ok(QueryAnswer::Check { subject, relation, reference, holds });
        }

        Err(SpatialError::ambiguous(question, "could not parse question"))
    }
}
