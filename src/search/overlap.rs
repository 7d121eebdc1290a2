//! Ingredient overlap scoring and exclusion.
//!
//! Matching is by substring against whole ingredient lines, so "avocado"
//! matches "1 ripe avocado peeled". Each side comes in two forms: one
//! taking raw lines, and one taking lines already passed through
//! [`Normalizer::normalize_term`] (the ranker uses the corpus cache).

use crate::indexer::Normalizer;
use crate::search::aliases::AliasTable;
use std::collections::BTreeSet;

/// Denominator floor so one- or two-line recipes cannot dominate
pub const MIN_RECIPE_INGREDIENTS: usize = 4;

/// Fraction of `user_ingredients` found in `recipe_lines`.
///
/// `user_ingredients` are expected deduplicated and normalized. The result
/// is `matched / max(lines, 4)` and is not clamped: a short recipe whose
/// few lines satisfy many distinct user terms can score above 1.0.
pub fn overlap_score(
    aliases: &AliasTable,
    normalizer: &Normalizer,
    user_ingredients: &[String],
    recipe_lines: &[String],
) -> f64 {
    let lines = normalize_lines(normalizer, recipe_lines);
    let alias_sets = expand_all(aliases, user_ingredients);
    overlap_score_normalized(&alias_sets, &lines)
}

/// Whether any alias of any excluded ingredient appears in `recipe_lines`
pub fn is_excluded(
    aliases: &AliasTable,
    normalizer: &Normalizer,
    excluded_ingredients: &[String],
    recipe_lines: &[String],
) -> bool {
    let lines = normalize_lines(normalizer, recipe_lines);
    let alias_sets = expand_all(aliases, excluded_ingredients);
    contains_any_alias(&alias_sets, &lines)
}

/// Alias set for each term, in input order
pub fn expand_all(aliases: &AliasTable, terms: &[String]) -> Vec<BTreeSet<String>> {
    terms.iter().map(|term| aliases.expand(term)).collect()
}

/// [`overlap_score`] over pre-expanded alias sets and normalized lines
pub fn overlap_score_normalized(alias_sets: &[BTreeSet<String>], lines: &[String]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }

    let matched = alias_sets
        .iter()
        .filter(|set| !set.is_empty() && any_line_contains(set, lines))
        .count();

    matched as f64 / lines.len().max(MIN_RECIPE_INGREDIENTS) as f64
}

/// [`is_excluded`] over pre-expanded alias sets and normalized lines
pub fn contains_any_alias(alias_sets: &[BTreeSet<String>], lines: &[String]) -> bool {
    alias_sets.iter().any(|set| any_line_contains(set, lines))
}

fn any_line_contains(aliases: &BTreeSet<String>, lines: &[String]) -> bool {
    lines
        .iter()
        .any(|line| aliases.iter().any(|alias| line.contains(alias.as_str())))
}

fn normalize_lines(normalizer: &Normalizer, lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| normalizer.normalize_term(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn score(user: &[&str], lines: &[&str]) -> f64 {
        overlap_score(
            &AliasTable::new(),
            &Normalizer::new(),
            &strings(user),
            &strings(lines),
        )
    }

    fn excluded(terms: &[&str], lines: &[&str]) -> bool {
        is_excluded(
            &AliasTable::new(),
            &Normalizer::new(),
            &strings(terms),
            &strings(lines),
        )
    }

    #[test]
    fn test_empty_lines_score_zero() {
        assert_eq!(score(&["rice", "egg"], &[]), 0.0);
    }

    #[test]
    fn test_denominator_floor() {
        // One of one line matched still divides by four
        assert_eq!(score(&["rice"], &["2 cups rice"]), 0.25);
    }

    #[test]
    fn test_denominator_uses_line_count_above_floor() {
        let lines = ["rice", "egg", "soy sauce", "scallion", "oil", "salt", "pepper", "garlic"];
        assert_eq!(score(&["rice", "egg"], &lines), 2.0 / 8.0);
    }

    #[test]
    fn test_substring_line_match() {
        assert_eq!(score(&["avocado"], &["1 ripe Avocado, peeled"]), 0.25);
        assert_eq!(score(&["avocados"], &["1 ripe avocado"]), 0.0);
    }

    #[test]
    fn test_alias_match() {
        assert_eq!(score(&["cilantro"], &["1 tsp ground coriander"]), 0.25);
        assert_eq!(score(&["spring onion"], &["2 green onions, sliced"]), 0.25);
    }

    #[test]
    fn test_user_ingredient_counted_once() {
        assert_eq!(score(&["rice"], &["rice", "rice flour", "rice vinegar", "water"]), 0.25);
    }

    #[test]
    fn test_score_can_exceed_one() {
        let user = ["salt", "pepper", "salt and pepper", "and", "alt", "pep"];
        let lines = ["salt and pepper"];
        // Six distinct terms all hit the single line; 6 / 4 is kept as is
        assert_eq!(score(&user, &lines), 1.5);
    }

    #[test]
    fn test_empty_user_terms_do_not_match() {
        assert_eq!(score(&[""], &["rice"]), 0.0);
    }

    #[test]
    fn test_is_excluded() {
        assert!(excluded(&["prawn"], &["200 g shrimp, deveined", "rice"]));
        assert!(excluded(&["nuts", "dairy", "milk"], &["1 cup whole milk"]));
        assert!(!excluded(&["peanut"], &["1 cup rice"]));
        assert!(!excluded(&["rice"], &[]));
        assert!(!excluded(&[], &["rice"]));
    }
}
