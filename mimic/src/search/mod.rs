mod response_cache;
mod tfidf;

pub use response_cache::ResponseCache;
pub use tfidf::{Match, SimilarityIndex, MAX_FEATURES};
