// Hybrid recipe search: alias-aware ingredient matching combined with BM25.

pub mod aliases;
pub mod overlap;
pub mod params;
pub mod ranker;

// Re-exports
pub use aliases::AliasTable;
pub use overlap::{is_excluded, overlap_score};
pub use params::{SearchParams, SearchRequest};
pub use ranker::{HybridRanker, SearchHit, SearchResponse};
