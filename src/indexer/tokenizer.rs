use crate::indexer::lemmatizer::Lemmatizer;
use crate::indexer::normalize::Normalizer;
use crate::indexer::stopwords::is_stopword;

/// Text pipeline shared by corpus preparation and query scoring.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    normalizer: Normalizer,
    lemmatizer: Lemmatizer,
}

impl Tokenizer {
    pub fn new(lemmatizer: Lemmatizer) -> Self {
        Self {
            normalizer: Normalizer::new(),
            lemmatizer,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Split already-normalized text into stopword-free noun lemmas,
    /// preserving input order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|token| !is_stopword(token))
            .map(|token| self.lemmatizer.lemmatize(token))
            // A lemma can itself be a stopword ("cans" -> "can")
            .filter(|lemma| !is_stopword(lemma))
            .collect()
    }

    /// Query tokens: lowercase, whitespace split, lemmatize.
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        query
            .to_lowercase()
            .split_whitespace()
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect()
    }
}
