use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SentimentDistribution;
use crate::error::{MimicError, Result};

/// 4 content stats, 4 sentiment stats, 4 style stats, 10 top-word frequencies.
pub const PERSONALITY_VECTOR_LEN: usize = 22;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WritingStyle {
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    /// Raw counts of `.`, `,`, `!` and `?` in the original text.
    pub punctuation_freq: BTreeMap<String, u64>,
    pub emoji_freq: BTreeMap<String, u64>,
    /// Hashtags per post.
    pub hashtag_usage: f64,
    /// Mentions per post.
    pub mention_usage: f64,
}

/// The trained artifact, in the shape it is persisted.
///
/// The response cache is deliberately not part of this record; it lives with
/// the in-memory trained state and is rebuilt from scratch after a load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonalityProfile {
    pub word_preferences: BTreeMap<String, u64>,
    pub sentiment_distribution: SentimentDistribution,
    pub topic_interests: BTreeMap<String, f64>,
    pub writing_style: WritingStyle,
    /// The key must be present; `null` stands for "not computed".
    #[serde(deserialize_with = "Option::deserialize")]
    pub personality_vector: Option<Vec<f64>>,
}

impl PersonalityProfile {
    /// Whether training saw at least one post. Sentiment shares of a
    /// non-empty corpus sum to one, even when no post kept a single word.
    pub fn has_data(&self) -> bool {
        let dist = &self.sentiment_distribution;
        !self.word_preferences.is_empty() || dist.positive + dist.negative + dist.neutral > 0.0
    }

    /// The `n` most used words, highest cumulative count first, ties in
    /// lexicographic order.
    pub fn top_preferences(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .word_preferences
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        // BTreeMap iteration is already lexicographic, a stable sort keeps it.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    /// Check a deserialized record for values training could never produce.
    pub fn validate(&self) -> Result<()> {
        let dist = &self.sentiment_distribution;
        for (name, value) in [
            ("positive", dist.positive),
            ("negative", dist.negative),
            ("neutral", dist.neutral),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MimicError::Validation(format!(
                    "sentiment_distribution.{name} must be a share in [0, 1], got {value}"
                )));
            }
        }
        if !dist.compound.is_finite() || !(-1.0..=1.0).contains(&dist.compound) {
            return Err(MimicError::Validation(format!(
                "sentiment_distribution.compound must lie in [-1, 1], got {}",
                dist.compound
            )));
        }

        let style = &self.writing_style;
        for (name, value) in [
            ("avg_sentence_length", style.avg_sentence_length),
            ("avg_word_length", style.avg_word_length),
            ("hashtag_usage", style.hashtag_usage),
            ("mention_usage", style.mention_usage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MimicError::Validation(format!(
                    "writing_style.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if let Some((topic, score)) = self
            .topic_interests
            .iter()
            .find(|(_, score)| !score.is_finite())
        {
            return Err(MimicError::Validation(format!(
                "topic_interests.{topic} is not a finite number: {score}"
            )));
        }

        if let Some(vector) = &self.personality_vector {
            if vector.len() != PERSONALITY_VECTOR_LEN {
                return Err(MimicError::Validation(format!(
                    "personality_vector must have {PERSONALITY_VECTOR_LEN} dimensions, got {}",
                    vector.len()
                )));
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(MimicError::Validation(
                    "personality_vector contains a non-finite value".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile_with_words(words: &[(&str, u64)]) -> PersonalityProfile {
        PersonalityProfile {
            word_preferences: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn top_preferences_orders_by_count_then_word() {
        let profile = profile_with_words(&[("zeytin", 3), ("elma", 3), ("kahve", 7), ("su", 1)]);
        assert_eq!(
            profile.top_preferences(3),
            vec![("kahve", 7), ("elma", 3), ("zeytin", 3)]
        );
    }

    #[test]
    fn empty_profile_has_no_data_but_is_valid() {
        let profile = PersonalityProfile::default();
        assert!(!profile.has_data());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_share() {
        let mut profile = profile_with_words(&[("a", 1)]);
        profile.sentiment_distribution.positive = 1.5;
        assert!(matches!(
            profile.validate(),
            Err(MimicError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_wrong_vector_length() {
        let mut profile = profile_with_words(&[("a", 1)]);
        profile.personality_vector = Some(vec![0.0; 3]);
        assert!(profile.validate().is_err());

        profile.personality_vector = Some(vec![0.0; PERSONALITY_VECTOR_LEN]);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn wordless_corpus_still_counts_as_data() {
        let mut profile = PersonalityProfile::default();
        profile.sentiment_distribution.neutral = 1.0;
        assert!(profile.has_data());
    }

    #[test]
    fn absent_vector_key_is_rejected_but_null_is_accepted() {
        let base = r#"
            "word_preferences": {"kahve": 2},
            "sentiment_distribution": {"positive": 1, "negative": 0, "neutral": 0, "compound": 0.5},
            "topic_interests": {},
            "writing_style": {
                "avg_sentence_length": 2, "avg_word_length": 4,
                "punctuation_freq": {}, "emoji_freq": {},
                "hashtag_usage": 0, "mention_usage": 0
            }"#;

        let absent = format!("{{{base}}}");
        let err = serde_json::from_str::<PersonalityProfile>(&absent).unwrap_err();
        assert!(err.to_string().contains("personality_vector"));

        let null = format!(r#"{{{base}, "personality_vector": null}}"#);
        let profile: PersonalityProfile = serde_json::from_str(&null).expect("null vector");
        assert_eq!(profile.personality_vector, None);
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let json = r#"{
            "word_preferences": {},
            "sentiment_distribution": {"positive": 0, "negative": 0, "neutral": 0, "compound": 0},
            "topic_interests": {},
            "personality_vector": null
        }"#;
        assert!(serde_json::from_str::<PersonalityProfile>(json).is_err());
    }
}
