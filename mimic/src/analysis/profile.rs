use std::collections::BTreeMap;

use crate::analysis::{analyze, build_personality_vector, profile_style};
use crate::models::{AggregateAnalysis, Corpus, PersonalityProfile};

/// Hashtag topics count double relative to plain words.
pub const HASHTAG_TOPIC_WEIGHT: f64 = 2.0;

/// Result of one training pass over a corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedProfile {
    pub profile: PersonalityProfile,
    pub analysis: AggregateAnalysis,
}

/// Run every analyzer over `corpus` and assemble the profile.
pub fn build_profile(corpus: &Corpus) -> TrainedProfile {
    let analysis = analyze(corpus);
    let writing_style = profile_style(corpus);
    let personality_vector = build_personality_vector(&analysis, &writing_style);

    let profile = PersonalityProfile {
        word_preferences: word_preferences(corpus),
        sentiment_distribution: analysis.sentiment_stats,
        topic_interests: topic_interests(&analysis),
        writing_style,
        personality_vector: Some(personality_vector),
    };

    TrainedProfile { profile, analysis }
}

/// Cumulative per-word counts across every post.
pub fn word_preferences(corpus: &Corpus) -> BTreeMap<String, u64> {
    let mut preferences = BTreeMap::new();
    for post in corpus {
        for (word, count) in &post.word_frequency {
            *preferences.entry(word.clone()).or_insert(0) += count;
        }
    }
    preferences
}

/// Topic weights from the top words plus double-weighted hashtags.
pub fn topic_interests(analysis: &AggregateAnalysis) -> BTreeMap<String, f64> {
    let mut topics: BTreeMap<String, f64> = analysis
        .top_words
        .iter()
        .map(|(word, count)| (word.clone(), *count as f64))
        .collect();

    for (hashtag, count) in &analysis.top_hashtags {
        let topic = hashtag.trim_start_matches('#').to_string();
        *topics.entry(topic).or_insert(0.0) += *count as f64 * HASHTAG_TOPIC_WEIGHT;
    }

    topics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;

    fn post_with_words(words: &[(&str, u64)]) -> Post {
        Post {
            word_frequency: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn word_preferences_accumulate() {
        let corpus = Corpus::new(vec![
            post_with_words(&[("kahve", 2), ("çay", 1)]),
            post_with_words(&[("kahve", 3)]),
        ]);
        let prefs = word_preferences(&corpus);
        assert_eq!(prefs.get("kahve"), Some(&5));
        assert_eq!(prefs.get("çay"), Some(&1));
    }

    #[test]
    fn hashtags_weigh_double_and_merge_with_words() {
        let analysis = AggregateAnalysis {
            top_words: vec![("rust".into(), 3), ("kod".into(), 1)],
            top_hashtags: vec![("#rust".into(), 2), ("#tatil".into(), 1)],
            ..Default::default()
        };
        let topics = topic_interests(&analysis);
        assert_eq!(topics.get("rust"), Some(&7.0));
        assert_eq!(topics.get("kod"), Some(&1.0));
        assert_eq!(topics.get("tatil"), Some(&2.0));
    }

    #[test]
    fn empty_corpus_builds_empty_profile() {
        let trained = build_profile(&Corpus::default());
        assert!(trained.profile.word_preferences.is_empty());
        assert!(trained.profile.topic_interests.is_empty());
        assert_eq!(trained.profile.sentiment_distribution.share_sum(), 0.0);
        assert!(trained.profile.validate().is_ok());
    }
}
