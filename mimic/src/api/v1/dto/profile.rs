//! Profile response DTO for the v1 API.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{PersonalityProfile, SentimentDistribution, WritingStyle};

/// Response for `GET /v1/profile`.
///
/// Same field names as the persisted profile record, so the payload can be
/// written straight to a profile file.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub word_preferences: BTreeMap<String, u64>,
    #[schema(value_type = Object)]
    pub sentiment_distribution: SentimentDistribution,
    pub topic_interests: BTreeMap<String, f64>,
    #[schema(value_type = Object)]
    pub writing_style: WritingStyle,
    pub personality_vector: Option<Vec<f64>>,
}

impl From<PersonalityProfile> for ProfileResponse {
    fn from(profile: PersonalityProfile) -> Self {
        Self {
            word_preferences: profile.word_preferences,
            sentiment_distribution: profile.sentiment_distribution,
            topic_interests: profile.topic_interests,
            writing_style: profile.writing_style,
            personality_vector: profile.personality_vector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_response_matches_persisted_record() {
        let mut profile = PersonalityProfile::default();
        profile.word_preferences.insert("deniz".to_string(), 3);
        profile.personality_vector = Some(vec![0.0; crate::models::PERSONALITY_VECTOR_LEN]);

        let record = serde_json::to_value(&profile).expect("serialize profile");
        let wire = serde_json::to_value(ProfileResponse::from(profile)).expect("serialize dto");
        assert_eq!(record, wire);
    }
}
