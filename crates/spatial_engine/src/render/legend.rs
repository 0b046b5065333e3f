//! Legend symbol assignment

use serde::Serialize;

/// Symbol used for walls and declared room boundaries
pub const WALL_SYMBOL: char = 'W';
/// Symbol used for floors
pub const FLOOR_SYMBOL: char = '#';
/// Symbol used for doors
pub const DOOR_SYMBOL: char = 'D';
/// Symbol for an empty cell
pub const EMPTY_CELL: char = '.';
/// Legend name for the declared room outline
pub const ROOM_BOUNDARY: &str = "(room boundary)";

/// Legend symbol for one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Unique symbol, e.g. `T` or `T2`
    pub symbol: String,
    /// Object name
    pub name: String,
}

impl LegendEntry {
    /// Character drawn in grid cells
    pub fn display_char(&self) -> char {
        self.symbol.chars().next().unwrap_or('?')
    }
}

/// Fixed symbol for structural objects, by name
fn classify(name: &str) -> Option<char> {
    let lower = name.to_lowercase();
    if lower.contains("wall") || lower.contains("boundary") {
        Some(WALL_SYMBOL)
    } else if lower.contains("floor") {
        Some(FLOOR_SYMBOL)
    } else if lower.contains("door") {
        Some(DOOR_SYMBOL)
    } else {
        None
    }
}

/// Base character: structural symbol, else first letter or digit upper-cased
fn base_symbol(name: &str) -> char {
    classify(name).unwrap_or_else(|| {
        name.chars()
            .find(char::is_ascii_alphanumeric)
            .map_or('?', |c| c.to_ascii_uppercase())
    })
}

/// Assign a unique symbol per name, in order
///
/// The first name with a given base character gets it bare; later ones get
/// a numeric suffix (`T`, `T2`, `T3`). Symbols in `taken` count as used.
pub fn assign_symbols<'a>(names: impl IntoIterator<Item = &'a str>, taken: &[&str]) -> Vec<LegendEntry> {
    let mut used: Vec<String> = taken.iter().map(ToString::to_string).collect();
    let mut entries = Vec::new();
    for name in names {
        let base = base_symbol(name);
        let mut symbol = base.to_string();
        let mut n = 2;
        while used.contains(&symbol) {
            symbol = format!("{base}{n}");
            n += 1;
        }
        used.push(symbol.clone());
        entries.push(LegendEntry { symbol, name: name.to_string() });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(names: &[&str]) -> Vec<String> {
        assign_symbols(names.iter().copied(), &[]).into_iter().map(|e| e.symbol).collect()
    }

    #[test]
    fn test_first_letter_with_suffix() {
        assert_eq!(symbols(&["Table", "tv", "Chair", "Table.001"]), vec!["T", "T2", "C", "T3"]);
    }

    #[test]
    fn test_structural_symbols() {
        assert_eq!(symbols(&["Wall_Left", "Floor", "Front Door", "Wall_Right"]), vec!["W", "#", "D", "W2"]);
    }

    #[test]
    fn test_taken_symbols_are_skipped() {
        let entries = assign_symbols(["Wardrobe"], &["W"]);
        assert_eq!(entries[0].symbol, "W2");
        assert_eq!(entries[0].display_char(), 'W');
    }

    #[test]
    fn test_unusual_names() {
        assert_eq!(symbols(&["_42", "__"]), vec!["4", "?"]);
    }
}
