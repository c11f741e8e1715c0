use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{PersonalityProfile, SentimentClass, SentimentScores};

pub const POSITIVE_EMOJIS: [&str; 5] = ["😊", "👍", "🙌", "💪", "✨"];
pub const NEGATIVE_EMOJIS: [&str; 5] = ["😔", "😕", "💔", "😢", "😞"];

pub const SENTIMENT_EMOJI_PROBABILITY: f64 = 0.5;
pub const VOCABULARY_PROBABILITY: f64 = 0.3;
pub const PUNCTUATION_PROBABILITY: f64 = 0.3;
pub const STYLE_EMOJI_PROBABILITY: f64 = 0.2;
pub const INJECTED_WORDS: usize = 5;

/// Rewrites a generated draft so it reads like the profiled author.
///
/// Every random decision is drawn from the caller's RNG, in a fixed order,
/// so a seeded RNG reproduces the same output.
pub struct ResponseComposer<'a> {
    profile: &'a PersonalityProfile,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(profile: &'a PersonalityProfile) -> Self {
        Self { profile }
    }

    /// Apply sentiment styling, vocabulary injection and style replication,
    /// in that order. `nearest` is the sentiment of the matched post, if any.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        draft: &str,
        nearest: Option<&SentimentScores>,
        rng: &mut R,
    ) -> String {
        let mut response = draft.to_string();
        if let Some(sentiment) = nearest {
            self.apply_sentiment(&mut response, sentiment, rng);
        }
        self.inject_vocabulary(&mut response, rng);
        self.replicate_style(&mut response, rng);
        response
    }

    fn apply_sentiment<R: Rng + ?Sized>(
        &self,
        response: &mut String,
        sentiment: &SentimentScores,
        rng: &mut R,
    ) {
        let palette: &[&str] = match SentimentClass::from_compound(sentiment.compound) {
            SentimentClass::Positive => &POSITIVE_EMOJIS,
            SentimentClass::Negative => &NEGATIVE_EMOJIS,
            SentimentClass::Neutral => return,
        };
        if rng.gen_bool(SENTIMENT_EMOJI_PROBABILITY) {
            if let Some(emoji) = palette.choose(rng) {
                response.push(' ');
                response.push_str(emoji);
            }
        }
    }

    fn inject_vocabulary<R: Rng + ?Sized>(&self, response: &mut String, rng: &mut R) {
        for (word, _) in self.profile.top_preferences(INJECTED_WORDS) {
            if response.to_lowercase().contains(word) {
                continue;
            }
            if rng.gen_bool(VOCABULARY_PROBABILITY) {
                response.push(' ');
                response.push_str(word);
            }
        }
    }

    fn replicate_style<R: Rng + ?Sized>(&self, response: &mut String, rng: &mut R) {
        let style = &self.profile.writing_style;
        for (symbol, count) in &style.punctuation_freq {
            if *count > 0 && rng.gen_bool(PUNCTUATION_PROBABILITY) {
                response.push_str(symbol);
            }
        }
        for (emoji, count) in &style.emoji_freq {
            if *count > 0 && rng.gen_bool(STYLE_EMOJI_PROBABILITY) {
                response.push(' ');
                response.push_str(emoji);
            }
        }
    }
}
