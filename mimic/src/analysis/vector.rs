use crate::models::{AggregateAnalysis, WritingStyle, PERSONALITY_VECTOR_LEN};

/// Number of top-word frequencies at the tail of the vector.
pub const VECTOR_TOP_WORDS: usize = 10;

/// Assemble the personality vector.
///
/// Layout, in order:
///
/// | range  | features                                                                  |
/// |--------|---------------------------------------------------------------------------|
/// | 0..4   | avg_post_length, avg_word_length, avg_sentence_length, vocabulary_richness |
/// | 4..8   | positive, negative, neutral, compound                                     |
/// | 8..12  | style avg_sentence_length, avg_word_length, hashtag_usage, mention_usage  |
/// | 12..22 | counts of the ten most frequent words, zero-padded                        |
pub fn build_personality_vector(analysis: &AggregateAnalysis, style: &WritingStyle) -> Vec<f64> {
    let content = &analysis.content_stats;
    let sentiment = &analysis.sentiment_stats;

    let mut vector = Vec::with_capacity(PERSONALITY_VECTOR_LEN);
    vector.extend([
        content.avg_post_length,
        content.avg_word_length,
        content.avg_sentence_length,
        content.vocabulary_richness,
    ]);
    vector.extend([
        sentiment.positive,
        sentiment.negative,
        sentiment.neutral,
        sentiment.compound,
    ]);
    vector.extend([
        style.avg_sentence_length,
        style.avg_word_length,
        style.hashtag_usage,
        style.mention_usage,
    ]);
    vector.extend(
        analysis
            .top_words
            .iter()
            .map(|(_, count)| *count as f64)
            .chain(std::iter::repeat(0.0))
            .take(VECTOR_TOP_WORDS),
    );

    vector
}
