use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{MimicError, Result};

/// Platform-supplied fields carried through normalization untouched
/// (likes, timestamps, media flags, ...).
pub type Metadata = HashMap<String, serde_json::Value>;

/// Sentiment scores for one piece of text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Overall polarity in `[-1, 1]`.
    pub compound: f64,
}

/// A post as delivered by the scraper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawPost {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl RawPost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            metadata: Metadata::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusShape {
    Wrapped { posts: Vec<RawPost> },
    Bare(Vec<RawPost>),
}

/// Parse a scraped corpus. Accepts either `{"posts": [...]}` or a bare array.
pub fn parse_raw_corpus(json: &str) -> Result<Vec<RawPost>> {
    let shape: CorpusShape = serde_json::from_str(json).map_err(|e| {
        MimicError::Validation(format!(
            "Corpus must be a JSON array of posts or an object with a \"posts\" array: {e}"
        ))
    })?;

    Ok(match shape {
        CorpusShape::Wrapped { posts } => posts,
        CorpusShape::Bare(posts) => posts,
    })
}

/// One post after cleaning, tokenization and scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Post {
    pub original_text: String,
    pub cleaned_text: String,
    pub tokens: Vec<String>,
    pub filtered_tokens: Vec<String>,
    pub sentences: Vec<String>,
    pub sentiment: SentimentScores,
    pub word_frequency: BTreeMap<String, u64>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub bigrams: Vec<(String, String)>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Normalized posts in arrival order. Similarity results refer to posts
/// by their position here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    posts: Vec<Post>,
}

impl Corpus {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
