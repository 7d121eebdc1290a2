pub mod config;
pub mod error;

// Text processing and lexical index
pub mod indexer;

// Corpus loading and preparation
pub mod corpus;

// Hybrid ranking
pub mod search;

// Command line
pub mod cli;

// Re-exports
pub use config::Settings;
pub use corpus::Corpus;
pub use error::{Error, Result};
pub use search::{HybridRanker, SearchRequest, SearchResponse};
