//! Okapi BM25 lexical index over the corpus `clean_text` tokens.
//!
//! The index is built once and never updated. IDF uses the classic
//! `ln((N - n + 0.5) / (n + 0.5))`; terms present in more than half the
//! corpus would go negative, so they are floored at `EPSILON` times the mean
//! IDF (and never below zero).

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Term frequency saturation
pub const BM25_K1: f64 = 1.5;
/// Document length normalization
pub const BM25_B: f64 = 0.75;
/// Fraction of the mean IDF assigned to very common terms
pub const BM25_EPSILON: f64 = 0.25;

#[derive(Debug, Clone)]
struct Posting {
    doc: u32,
    term_frequency: u32,
}

#[derive(Debug, Clone)]
struct TermEntry {
    idf: f64,
    postings: Vec<Posting>,
}

/// Summary figures for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub vocabulary: usize,
    pub average_doc_length: f64,
}

#[derive(Debug, Clone)]
pub struct Bm25Index {
    terms: HashMap<String, TermEntry>,
    doc_lengths: Vec<u32>,
    average_doc_length: f64,
}

impl Bm25Index {
    /// Build from one token sequence per document, in corpus order
    pub fn build<D, T>(documents: D) -> Self
    where
        D: IntoIterator,
        D::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        // Ordered so the mean IDF is summed in a fixed order
        let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        let mut doc_lengths = Vec::new();

        for (doc, tokens) in documents.into_iter().enumerate() {
            let mut frequencies: HashMap<String, u32> = HashMap::new();
            let mut length = 0u32;
            for token in tokens {
                *frequencies.entry(token.as_ref().to_string()).or_insert(0) += 1;
                length += 1;
            }
            doc_lengths.push(length);

            for (term, term_frequency) in frequencies {
                postings.entry(term).or_default().push(Posting {
                    doc: doc as u32,
                    term_frequency,
                });
            }
        }

        let doc_count = doc_lengths.len();
        let total_length: u64 = doc_lengths.iter().map(|&l| l as u64).sum();
        let average_doc_length = if doc_count == 0 {
            0.0
        } else {
            total_length as f64 / doc_count as f64
        };

        let n = doc_count as f64;
        let raw_idf: Vec<f64> = postings
            .values()
            .map(|list| {
                let df = list.len() as f64;
                ((n - df + 0.5) / (df + 0.5)).ln()
            })
            .collect();

        let mean_idf = if raw_idf.is_empty() {
            0.0
        } else {
            raw_idf.iter().sum::<f64>() / raw_idf.len() as f64
        };
        let floor = (BM25_EPSILON * mean_idf).max(0.0);

        let terms: HashMap<String, TermEntry> = postings
            .into_iter()
            .zip(raw_idf)
            .map(|((term, postings), idf)| {
                let idf = if idf < 0.0 { floor } else { idf };
                (term, TermEntry { idf, postings })
            })
            .collect();

        info!(
            "BM25 index built: {} documents, {} terms, avg length {:.2}",
            doc_count,
            terms.len(),
            average_doc_length
        );

        Self {
            terms,
            doc_lengths,
            average_doc_length,
        }
    }

    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.len(),
            vocabulary: self.terms.len(),
            average_doc_length: self.average_doc_length,
        }
    }

    /// IDF of a term, if it occurs anywhere in the corpus
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|entry| entry.idf)
    }

    /// Raw BM25 score of every document for the given query tokens.
    ///
    /// The result has one non-negative entry per document in corpus order.
    /// A token repeated in the query contributes once per occurrence.
    pub fn score<T: AsRef<str>>(&self, query_tokens: &[T]) -> Vec<f64> {
        let mut scores = vec![0.0; self.len()];

        for token in query_tokens {
            let Some(entry) = self.terms.get(token.as_ref()) else {
                continue;
            };

            for posting in &entry.postings {
                let tf = posting.term_frequency as f64;
                let dl = self.doc_lengths[posting.doc as usize] as f64;
                let norm = BM25_K1 * (1.0 - BM25_B + BM25_B * dl / self.average_doc_length);
                scores[posting.doc as usize] += entry.idf * tf * (BM25_K1 + 1.0) / (tf + norm);
            }
        }

        debug!("Scored {} query tokens against {} documents", query_tokens.len(), scores.len());
        scores
    }
}
