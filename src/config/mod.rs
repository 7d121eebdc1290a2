use crate::error::{Error, Result};
use crate::search::params::{MAX_TOP_K, MIN_TOP_K};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub corpus: CorpusConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub path: PathBuf,
    /// Extra lemma vocabulary, one word per line
    pub lemmas_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_alpha: f64,
    pub default_beta: f64,
    pub default_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_alpha: 0.7,
            default_beta: 0.3,
            default_top_k: 10,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("RECIPE_CORPUS_PATH")
            .unwrap_or_else(|_| "./data/recipes.jsonl".to_string())
            .into();

        let lemmas_path = std::env::var("RECIPE_LEMMAS_PATH").ok().map(PathBuf::from);

        let default_alpha = std::env::var("SEARCH_DEFAULT_ALPHA")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_DEFAULT_ALPHA value".to_string()))?;

        let default_beta = std::env::var("SEARCH_DEFAULT_BETA")
            .unwrap_or_else(|_| "0.3".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_DEFAULT_BETA value".to_string()))?;

        let default_top_k = std::env::var("SEARCH_DEFAULT_TOP_K")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SEARCH_DEFAULT_TOP_K value".to_string()))?;

        Ok(Settings {
            corpus: CorpusConfig { path, lemmas_path },
            search: SearchConfig {
                default_alpha,
                default_beta,
                default_top_k,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("SEARCH_DEFAULT_ALPHA", self.search.default_alpha),
            ("SEARCH_DEFAULT_BETA", self.search.default_beta),
        ];
        for (name, value) in weights {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be within [0, 1]")));
            }
        }

        if self.search.default_alpha == 0.0 && self.search.default_beta == 0.0 {
            return Err(Error::Config(
                "SEARCH_DEFAULT_ALPHA and SEARCH_DEFAULT_BETA cannot both be zero".to_string(),
            ));
        }

        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.search.default_top_k) {
            return Err(Error::Config(format!(
                "SEARCH_DEFAULT_TOP_K must be within [{MIN_TOP_K}, {MAX_TOP_K}]"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            corpus: CorpusConfig {
                path: "/tmp/recipes.jsonl".into(),
                lemmas_path: None,
            },
            search: SearchConfig::default(),
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = settings();
        assert!(settings.validate().is_ok());

        settings.search.default_alpha = 0.0;
        settings.search.default_beta = 0.0;
        assert!(settings.validate().is_err());

        settings.search.default_beta = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_top_k_bounds() {
        let mut settings = settings();
        settings.search.default_top_k = 0;
        assert!(settings.validate().is_err());

        settings.search.default_top_k = 21;
        assert!(settings.validate().is_err());

        settings.search.default_top_k = 20;
        assert!(settings.validate().is_ok());
    }
}
