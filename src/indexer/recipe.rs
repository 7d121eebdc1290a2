use crate::indexer::ingredients::parse_ingredients;
use crate::indexer::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recipe as delivered by a source dataset, before cleaning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Value,
    #[serde(default)]
    pub instructions: Value,
    #[serde(default)]
    pub source: Option<String>,
}

/// One immutable corpus entry.
///
/// `raw_ingredients` and `raw_instructions` keep whatever shape the source
/// stored them in; results hand them back untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub raw_ingredients: Value,
    pub raw_instructions: Value,
    #[serde(default)]
    pub source: String,
    pub clean_title: String,
    /// Normalized title plus ingredient tokens; the unit the lexical index sees
    pub clean_text: String,
    /// Lowercased ingredient lines in source order
    pub parsed_ingredient_lines: Vec<String>,
}

impl RecipeRecord {
    /// Derive the cleaned fields from a raw recipe.
    ///
    /// Returns `None` when the title or the ingredients are missing.
    pub fn prepare(raw: RawRecipe, tokenizer: &Tokenizer) -> Option<Self> {
        let title = raw.title.filter(|t| !t.trim().is_empty())?;
        if raw.ingredients.is_null() {
            return None;
        }

        let normalizer = tokenizer.normalizer();
        let lines = parse_ingredients(&raw.ingredients);

        let clean_title = normalizer.normalize(&title);
        let ingredient_tokens = tokenizer.tokenize(&normalizer.normalize(&lines.join(" ")));
        let clean_text = format!("{} {}", clean_title, ingredient_tokens.join(" "));

        let parsed_ingredient_lines = lines
            .iter()
            .map(|line| line.to_lowercase().trim().to_string())
            .collect();

        Some(Self {
            title,
            raw_ingredients: raw.ingredients,
            raw_instructions: raw.instructions,
            source: raw.source.unwrap_or_default(),
            clean_title,
            clean_text,
            parsed_ingredient_lines,
        })
    }

    /// Tokens fed to the lexical index
    pub fn index_tokens(&self) -> impl Iterator<Item = &str> {
        self.clean_text.split_whitespace()
    }
}
