use serde::{Deserialize, Serialize};

/// Compound scores above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClass {
    pub fn from_compound(compound: f64) -> Self {
        if compound > POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Positive/negative/neutral shares plus the mean compound score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Mean, not a share.
    pub compound: f64,
}

impl SentimentDistribution {
    pub fn share_sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ContentStats {
    pub avg_post_length: f64,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub vocabulary_richness: f64,
}

/// Corpus-wide statistics produced by a single training pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateAnalysis {
    pub post_count: usize,
    pub sentiment_stats: SentimentDistribution,
    pub content_stats: ContentStats,
    pub top_words: Vec<(String, u64)>,
    pub top_bigrams: Vec<(String, String)>,
    pub top_hashtags: Vec<(String, u64)>,
    pub top_mentions: Vec<(String, u64)>,
}
