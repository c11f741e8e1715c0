//! Corpus analytics: aggregate statistics, the writing-style fingerprint
//! and the personality vector.

mod aggregate;
mod profile;
mod ranking;
mod style;
mod vector;

pub use aggregate::{analyze, AggregateAnalyzer, TOP_BIGRAMS, TOP_TAGS, TOP_WORDS};
pub use profile::{build_profile, topic_interests, word_preferences, TrainedProfile};
pub use ranking::{most_common, top_bigrams_by_likelihood};
pub use style::{is_emoji, profile_style, StyleProfiler};
pub use vector::build_personality_vector;
