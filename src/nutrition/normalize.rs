//! Ingredient name and unit normalization

use crate::models::NormalizedUnit;

use super::conversion_table::{self, INGREDIENT_ALIASES};
use super::units::normalize_unit;

/// Preparation words that don't change what an ingredient weighs per unit.
/// Multi-word phrases come first so they win over their last word.
const DESCRIPTORS: &[&str] = &[
    "at room temperature",
    "room temperature",
    "lightly packed",
    "firmly packed",
    "softened",
    "melted",
    "cold",
    "warm",
    "sifted",
    "packed",
    "chopped",
    "diced",
    "minced",
    "sliced",
    "cubed",
    "fresh",
    "frozen",
    "thawed",
];

/// Canonical ingredient key and canonical unit for a raw recipe line
pub fn normalize(ingredient: &str, unit: &str) -> (String, NormalizedUnit) {
    (normalize_ingredient_name(ingredient), normalize_unit(unit))
}

/// Canonicalize an ingredient name
///
/// Unknown names come back lower-cased and stripped rather than rejected.
pub fn normalize_ingredient_name(raw: &str) -> String {
    let lowered = collapse_whitespace(&raw.to_lowercase());

    if let Some(canonical) = known_name(&lowered) {
        return canonical;
    }

    let stripped = strip_descriptors(&lowered);
    if stripped.is_empty() {
        return lowered;
    }

    if let Some(canonical) = known_name(&stripped) {
        return canonical;
    }

    INGREDIENT_ALIASES
        .iter()
        .find(|(alias, _)| stripped.contains(alias) || alias.contains(stripped.as_str()))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(stripped)
}

fn known_name(name: &str) -> Option<String> {
    if let Some(canonical) = conversion_table::alias_target(name) {
        return Some(canonical.to_string());
    }
    if conversion_table::contains(name) {
        return Some(name.to_string());
    }
    None
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove descriptor phrases at word boundaries, including a preceding comma
fn strip_descriptors(name: &str) -> String {
    let mut words: Vec<String> = name
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    for descriptor in DESCRIPTORS {
        let phrase: Vec<&str> = descriptor.split(' ').collect();
        let mut i = 0;
        while i + phrase.len() <= words.len() {
            if words[i..i + phrase.len()].iter().zip(&phrase).all(|(w, p)| w == p) {
                words.drain(i..i + phrase.len());
            } else {
                i += 1;
            }
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn test_alias_exact_match() {
        assert_eq!(normalize_ingredient_name("Flour"), "all-purpose flour");
        assert_eq!(normalize_ingredient_name("  sugar "), "granulated sugar");
        assert_eq!(normalize_ingredient_name("2 percent milk"), "2% milk");
    }

    #[test]
    fn test_canonical_name_kept() {
        assert_eq!(normalize_ingredient_name("bread flour"), "bread flour");
        assert_eq!(normalize_ingredient_name("butter"), "butter");
    }

    #[test]
    fn test_canonical_name_with_descriptor_word_survives() {
        assert_eq!(normalize_ingredient_name("walnuts chopped"), "walnuts chopped");
        assert_eq!(normalize_ingredient_name("brown sugar packed"), "brown sugar packed");
    }

    #[test]
    fn test_descriptors_stripped() {
        assert_eq!(normalize_ingredient_name("unsalted butter, softened"), "butter unsalted");
        assert_eq!(normalize_ingredient_name("butter melted"), "butter");
        assert_eq!(normalize_ingredient_name("fresh lemon juice"), "lemon juice");
        assert_eq!(
            normalize_ingredient_name("cream cheese, at room temperature"),
            "cream cheese"
        );
    }

    #[test]
    fn test_partial_match_in_alias_order() {
        // "flour" is the first alias contained in the name
        assert_eq!(normalize_ingredient_name("unbleached flour"), "all-purpose flour");
        assert_eq!(normalize_ingredient_name("organic eggs"), "egg whole large");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(normalize_ingredient_name("Quinoa  Flakes"), "quinoa flakes");
    }

    #[test]
    fn test_only_descriptors() {
        assert_eq!(normalize_ingredient_name("Frozen"), "frozen");
    }

    #[test]
    fn test_normalize_pair() {
        let (name, unit) = normalize("Large Eggs", "each");
        assert_eq!(name, "egg whole large");
        assert_eq!(unit.known(), Some(Unit::Whole));
    }
}
