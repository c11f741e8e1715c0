use std::collections::HashSet;

use crate::analysis::ranking::{most_common, top_bigrams_by_likelihood};
use crate::models::{
    AggregateAnalysis, ContentStats, Corpus, Post, SentimentClass, SentimentDistribution,
};

pub const TOP_WORDS: usize = 20;
pub const TOP_TAGS: usize = 10;
pub const TOP_BIGRAMS: usize = 10;

/// Running corpus statistics. Feed posts with [`fold`](Self::fold), then
/// call [`finish`](Self::finish) once.
#[derive(Debug, Default)]
pub struct AggregateAnalyzer {
    posts: usize,
    positive: usize,
    negative: usize,
    neutral: usize,
    compound_sum: f64,
    sentence_count: usize,
    words: Vec<String>,
    hashtags: Vec<String>,
    mentions: Vec<String>,
}

impl AggregateAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, post: &Post) {
        self.posts += 1;
        match SentimentClass::from_compound(post.sentiment.compound) {
            SentimentClass::Positive => self.positive += 1,
            SentimentClass::Negative => self.negative += 1,
            SentimentClass::Neutral => self.neutral += 1,
        }
        self.compound_sum += post.sentiment.compound;
        self.sentence_count += post.sentences.len();
        self.words.extend(post.filtered_tokens.iter().cloned());
        self.hashtags.extend(post.hashtags.iter().cloned());
        self.mentions.extend(post.mentions.iter().cloned());
    }

    pub fn finish(self) -> AggregateAnalysis {
        let posts = self.posts as f64;
        let word_count = self.words.len() as f64;

        let sentiment_stats = if self.posts == 0 {
            SentimentDistribution::default()
        } else {
            SentimentDistribution {
                positive: self.positive as f64 / posts,
                negative: self.negative as f64 / posts,
                neutral: self.neutral as f64 / posts,
                compound: self.compound_sum / posts,
            }
        };

        let char_count: usize = self.words.iter().map(|w| w.chars().count()).sum();
        let distinct: HashSet<&str> = self.words.iter().map(String::as_str).collect();

        let content_stats = ContentStats {
            avg_post_length: ratio(word_count, posts),
            avg_word_length: ratio(char_count as f64, word_count),
            avg_sentence_length: ratio(word_count, self.sentence_count as f64),
            vocabulary_richness: ratio(distinct.len() as f64, word_count),
        };

        AggregateAnalysis {
            post_count: self.posts,
            sentiment_stats,
            content_stats,
            top_words: most_common(self.words.iter().map(String::as_str), TOP_WORDS),
            top_bigrams: top_bigrams_by_likelihood(&self.words, TOP_BIGRAMS),
            top_hashtags: most_common(self.hashtags.iter().map(String::as_str), TOP_TAGS),
            top_mentions: most_common(self.mentions.iter().map(String::as_str), TOP_TAGS),
        }
    }
}

/// One pass over `corpus`.
pub fn analyze(corpus: &Corpus) -> AggregateAnalysis {
    let mut analyzer = AggregateAnalyzer::new();
    for post in corpus {
        analyzer.fold(post);
    }
    analyzer.finish()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
