use crate::config::SearchConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 20;

/// Search parameters in transport form: everything arrives as text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    /// Comma-separated ingredients on hand
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Comma-separated ingredients to avoid
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub alpha: Option<String>,
    #[serde(default)]
    pub beta: Option<String>,
    #[serde(default)]
    pub top_k: Option<String>,
}

/// A validated search request, ready for the ranker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub ingredients: Vec<String>,
    pub exclude_ingredients: Vec<String>,
    pub alpha: f64,
    pub beta: f64,
    pub top_k: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            query: None,
            ingredients: Vec::new(),
            exclude_ingredients: Vec::new(),
            alpha: defaults.default_alpha,
            beta: defaults.default_beta,
            top_k: defaults.default_top_k,
        }
    }
}

impl SearchParams {
    /// Parse, clamp and validate into a [`SearchRequest`]
    pub fn into_request(self, defaults: &SearchConfig) -> Result<SearchRequest> {
        let alpha = parse_weight("alpha", self.alpha.as_deref(), defaults.default_alpha)?;
        let beta = parse_weight("beta", self.beta.as_deref(), defaults.default_beta)?;

        let top_k = match self.top_k.as_deref().map(str::trim) {
            None | Some("") => defaults.default_top_k as i64,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| Error::Validation(format!("top_k must be an integer, got {raw:?}")))?,
        };

        SearchRequest {
            query: self.q,
            ingredients: split_list(self.ingredients.as_deref()),
            exclude_ingredients: split_list(self.exclude.as_deref()),
            alpha,
            beta,
            top_k: top_k.clamp(MIN_TOP_K as i64, MAX_TOP_K as i64) as usize,
        }
        .validated()
    }
}

impl SearchRequest {
    /// Trim the query, clamp numeric fields and reject requests with no
    /// usable signal weight
    pub fn validated(mut self) -> Result<Self> {
        self.query = self
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(Error::Validation(format!("{name} must be a finite number")));
            }
        }

        self.alpha = self.alpha.clamp(0.0, 1.0);
        self.beta = self.beta.clamp(0.0, 1.0);
        self.top_k = self.top_k.clamp(MIN_TOP_K, MAX_TOP_K);

        if self.alpha == 0.0 && self.beta == 0.0 {
            return Err(Error::Validation(
                "alpha and beta cannot both be zero".to_string(),
            ));
        }

        Ok(self)
    }
}

fn parse_weight(name: &str, raw: Option<&str>, default: f64) -> Result<f64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| Error::Validation(format!("{name} must be a number, got {raw:?}"))),
    }
}

/// Split a comma-separated list, trimming and dropping empty entries
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
