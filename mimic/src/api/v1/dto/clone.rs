//! Train/ask request and response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RawPost;
use crate::services::TrainingReport;

/// Request body for `POST /v1/clone:train`.
///
/// Each post is `{ "content": string|null, ...any other fields }`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TrainRequest {
    #[schema(value_type = Vec<Object>)]
    pub posts: Vec<RawPost>,
}

/// Word with its count, as reported in training summaries.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Response for `POST /v1/clone:train`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    /// Posts seen, including ones without text.
    pub posts: usize,
    /// Posts reachable by similarity search.
    pub indexed_posts: usize,
    pub vocabulary_size: usize,
    /// Share of positive, negative and neutral posts plus the mean compound.
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
    pub vocabulary_richness: f64,
    pub top_words: Vec<WordCount>,
    pub top_hashtags: Vec<WordCount>,
    #[schema(value_type = String)]
    pub trained_at: DateTime<Utc>,
}

impl From<TrainingReport> for TrainResponse {
    fn from(report: TrainingReport) -> Self {
        let analysis = report.analysis;
        let to_counts = |items: Vec<(String, u64)>| {
            items
                .into_iter()
                .map(|(word, count)| WordCount { word, count })
                .collect()
        };

        Self {
            posts: report.posts,
            indexed_posts: report.indexed_posts,
            vocabulary_size: report.vocabulary_size,
            positive: analysis.sentiment_stats.positive,
            negative: analysis.sentiment_stats.negative,
            neutral: analysis.sentiment_stats.neutral,
            compound: analysis.sentiment_stats.compound,
            vocabulary_richness: analysis.content_stats.vocabulary_richness,
            top_words: to_counts(analysis.top_words),
            top_hashtags: to_counts(analysis.top_hashtags),
            trained_at: report.trained_at,
        }
    }
}

/// Request body for `POST /v1/clone:ask`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AskRequest {
    pub question: String,
}

/// Response for `POST /v1/clone:ask`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AskResponse {
    pub response: String,
}
