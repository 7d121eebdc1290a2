//! Hybrid ranking: BM25 relevance plus ingredient overlap.
//!
//! The corpus, index, alias table and tokenizer are shared read-only;
//! every call allocates its own score vector and mask.

use crate::corpus::Corpus;
use crate::indexer::{Bm25Index, Tokenizer};
use crate::search::aliases::AliasTable;
use crate::search::overlap::{contains_any_alias, expand_all, overlap_score_normalized};
use crate::search::params::SearchRequest;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Combined scores at or below this are not returned
pub const MIN_RESULT_SCORE: f64 = 1e-9;

/// One ranked recipe, with the raw fields as stored in the corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub ingredients: Value,
    pub instructions: Value,
    pub score: f64,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
}

impl SearchResponse {
    fn new(results: Vec<SearchHit>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}

#[derive(Debug, Clone)]
pub struct HybridRanker {
    corpus: Arc<Corpus>,
    index: Arc<Bm25Index>,
    aliases: Arc<AliasTable>,
    tokenizer: Arc<Tokenizer>,
}

impl HybridRanker {
    pub fn new(
        corpus: Arc<Corpus>,
        index: Arc<Bm25Index>,
        aliases: Arc<AliasTable>,
        tokenizer: Arc<Tokenizer>,
    ) -> Self {
        debug_assert_eq!(corpus.len(), index.len());
        Self {
            corpus,
            index,
            aliases,
            tokenizer,
        }
    }

    /// Build the index from the corpus and wire everything together
    pub fn from_corpus(corpus: Corpus, tokenizer: Arc<Tokenizer>) -> Self {
        let index = corpus.build_index();
        Self::new(
            Arc::new(corpus),
            Arc::new(index),
            Arc::new(AliasTable::new()),
            tokenizer,
        )
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &Bm25Index {
        &self.index
    }

    /// Rank the corpus for a request.
    ///
    /// Returns an empty response when there is neither a query nor any
    /// ingredient to match on.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let normalizer = self.tokenizer.normalizer();
        let ingredients = unique_terms(&request.ingredients, |t| normalizer.normalize_term(t));
        let excluded = unique_terms(&request.exclude_ingredients, |t| {
            normalizer.normalize_term(t)
        });
        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        if query.is_none() && ingredients.is_empty() {
            debug!("Empty search: no query and no ingredients");
            return SearchResponse::new(Vec::new());
        }

        let size = self.corpus.len();
        let mut scores = vec![0.0f64; size];

        if let Some(query) = query {
            let tokens = self.tokenizer.query_tokens(query);
            let lexical = self.index.score(&tokens);
            let max = lexical.iter().copied().fold(0.0f64, f64::max);
            let divisor = if max > 0.0 { max } else { 1.0 };

            for (score, raw) in scores.iter_mut().zip(&lexical) {
                *score += request.alpha * (raw / divisor);
            }
            debug!("Lexical signal for {:?}: max raw score {:.4}", tokens, max);
        }

        if !ingredients.is_empty() {
            let alias_sets = expand_all(&self.aliases, &ingredients);
            for (doc, score) in scores.iter_mut().enumerate() {
                let overlap =
                    overlap_score_normalized(&alias_sets, self.corpus.normalized_lines(doc));
                *score += request.beta * overlap;
            }
        }

        let allowed: Vec<bool> = if excluded.is_empty() {
            vec![true; size]
        } else {
            let alias_sets = expand_all(&self.aliases, &excluded);
            (0..size)
                .map(|doc| !contains_any_alias(&alias_sets, self.corpus.normalized_lines(doc)))
                .collect()
        };

        let mut ranked: Vec<usize> = (0..size).collect();
        // Stable sort: equal scores keep ascending corpus order
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let results: Vec<SearchHit> = ranked
            .into_iter()
            .filter(|&doc| allowed[doc] && scores[doc] > MIN_RESULT_SCORE)
            .take(request.top_k)
            .filter_map(|doc| {
                let record = self.corpus.get(doc)?;
                Some(SearchHit {
                    title: record.title.clone(),
                    ingredients: record.raw_ingredients.clone(),
                    instructions: record.raw_instructions.clone(),
                    score: round4(scores[doc]),
                    source: record.source.clone(),
                })
            })
            .collect();

        debug!(
            "Search returned {} of {} recipes ({} excluded terms)",
            results.len(),
            size,
            excluded.len()
        );
        SearchResponse::new(results)
    }
}

/// Normalize terms, dropping empties and repeats while keeping first-seen order
fn unique_terms<F>(terms: &[String], normalize: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let mut seen = HashSet::new();
    terms
        .iter()
        .map(|term| normalize(term))
        .filter(|term| !term.is_empty() && seen.insert(term.clone()))
        .collect()
}

/// Four decimals, halves to even
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}
