// Text processing and the lexical index.
// Everything here is built once at startup and shared read-only.

pub mod bm25;
pub mod ingredients;
pub mod lemmatizer;
pub mod normalize;
pub mod recipe;
pub mod stopwords;
pub mod tokenizer;

// Re-exports
pub use bm25::{Bm25Index, IndexStats};
pub use ingredients::{parse_ingredients, IngredientField};
pub use lemmatizer::Lemmatizer;
pub use normalize::Normalizer;
pub use recipe::{RawRecipe, RecipeRecord};
pub use tokenizer::Tokenizer;
