mod normalizer;
mod sentiment;

pub use normalizer::TextNormalizer;
pub use sentiment::{LexiconSentiment, SentimentScorer};
