//! Culinary synonym groups for ingredient matching

use crate::indexer::Normalizer;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Terms in the same group are interchangeable when matching ingredients
pub const INGREDIENT_SYNONYM_GROUPS: &[&[&str]] = &[
    &["scallion", "green onion", "spring onion"],
    &["garbanzo", "garbanzo bean", "garbanzo beans", "chickpea", "chickpeas"],
    &["coriander", "cilantro"],
    &["capsicum", "bell pepper", "sweet pepper"],
    &["aubergine", "aubergines", "eggplant", "eggplants"],
    &["courgette", "courgettes", "zucchini", "zucchinis"],
    &["rocket", "arugula"],
    &[
        "powdered sugar",
        "icing sugar",
        "confectioners sugar",
        "confectioners' sugar",
    ],
    &["maize", "corn"],
    &["cornstarch", "corn starch", "cornflour"],
    &["all purpose flour", "plain flour", "ap flour"],
    &["caster sugar", "superfine sugar"],
    &["white sugar", "granulated sugar"],
    &["bicarbonate of soda", "baking soda"],
    &["chili", "chilli", "chile"],
    &[
        "chili flakes",
        "chilli flakes",
        "red pepper flakes",
        "crushed red pepper",
    ],
    &["prawn", "prawns", "shrimp", "shrimps"],
    &["beetroot", "beet", "beets"],
    &["swede", "rutabaga"],
    &["yoghurt", "yogurt"],
    &["minced beef", "ground beef"],
    &["minced pork", "ground pork"],
    &["minced turkey", "ground turkey"],
    &["minced chicken", "ground chicken"],
    &[
        "tinned tomato",
        "tinned tomatoes",
        "canned tomato",
        "canned tomatoes",
    ],
    &["tomato ketchup", "ketchup"],
];

/// Normalized term -> its full normalized group. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AliasTable {
    normalizer: Normalizer,
    lookup: HashMap<String, Arc<BTreeSet<String>>>,
}

impl AliasTable {
    /// Table over the compiled-in synonym groups
    pub fn new() -> Self {
        Self::from_groups(INGREDIENT_SYNONYM_GROUPS)
    }

    pub fn from_groups(groups: &[&[&str]]) -> Self {
        let normalizer = Normalizer::new();
        let mut lookup = HashMap::new();

        for group in groups {
            let normalized: BTreeSet<String> = group
                .iter()
                .map(|term| normalizer.normalize_term(term))
                .filter(|term| !term.is_empty())
                .collect();
            let normalized = Arc::new(normalized);

            for term in normalized.iter() {
                lookup.insert(term.clone(), Arc::clone(&normalized));
            }
        }

        Self { normalizer, lookup }
    }

    /// Every alias of `term`, itself included.
    ///
    /// Unknown terms map to themselves; an empty term maps to nothing.
    pub fn expand(&self, term: &str) -> BTreeSet<String> {
        let normalized = self.normalizer.normalize_term(term);
        if normalized.is_empty() {
            return BTreeSet::new();
        }

        match self.lookup.get(&normalized) {
            Some(group) => group.as_ref().clone(),
            None => BTreeSet::from([normalized]),
        }
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members_expand_identically() {
        let table = AliasTable::new();
        for group in INGREDIENT_SYNONYM_GROUPS {
            let first = table.expand(group[0]);
            for term in group.iter() {
                assert_eq!(table.expand(term), first, "group mismatch for {term}");
            }
        }
    }

    #[test]
    fn test_expand_known_term() {
        let table = AliasTable::new();
        let aliases = table.expand("Prawn");
        assert!(aliases.contains("shrimp"));
        assert!(aliases.contains("shrimps"));
        assert_eq!(aliases.len(), 4);
    }

    #[test]
    fn test_apostrophe_variant_collapses() {
        let table = AliasTable::new();
        let aliases = table.expand("confectioners' sugar");
        // "confectioners' sugar" normalizes to "confectioners  sugar" -> "confectioners sugar"
        assert_eq!(aliases.len(), 3);
        assert!(aliases.contains("icing sugar"));
    }

    #[test]
    fn test_unknown_term_is_singleton() {
        let table = AliasTable::new();
        assert_eq!(
            table.expand("  Saffron! "),
            BTreeSet::from(["saffron".to_string()])
        );
    }

    #[test]
    fn test_empty_term() {
        let table = AliasTable::new();
        assert!(table.expand("").is_empty());
        assert!(table.expand(" ?! ").is_empty());
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AliasTable>();
    }
}
