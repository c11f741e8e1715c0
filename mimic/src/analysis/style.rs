use crate::models::{Corpus, Post, WritingStyle};

/// Punctuation tracked in the original text.
pub const TRACKED_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Emoji block counted by the style fingerprint.
pub fn is_emoji(c: char) -> bool {
    ('\u{1F300}'..='\u{1F9FF}').contains(&c)
}

/// Folds posts into a [`WritingStyle`] fingerprint.
#[derive(Debug, Default)]
pub struct StyleProfiler {
    posts: usize,
    sentence_sum: f64,
    word_length_sum: f64,
    hashtag_sum: f64,
    mention_sum: f64,
    style: WritingStyle,
}

impl StyleProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, post: &Post) {
        self.posts += 1;
        self.sentence_sum += post.sentences.len() as f64;

        if !post.tokens.is_empty() {
            let chars: usize = post.tokens.iter().map(|t| t.chars().count()).sum();
            self.word_length_sum += chars as f64 / post.tokens.len() as f64;
        }

        for c in post.original_text.chars() {
            if TRACKED_PUNCTUATION.contains(&c) {
                *self.style.punctuation_freq.entry(c.to_string()).or_insert(0) += 1;
            } else if is_emoji(c) {
                *self.style.emoji_freq.entry(c.to_string()).or_insert(0) += 1;
            }
        }

        self.hashtag_sum += post.hashtags.len() as f64;
        self.mention_sum += post.mentions.len() as f64;
    }

    pub fn finish(self) -> WritingStyle {
        if self.posts == 0 {
            return WritingStyle::default();
        }
        let posts = self.posts as f64;
        WritingStyle {
            avg_sentence_length: self.sentence_sum / posts,
            avg_word_length: self.word_length_sum / posts,
            hashtag_usage: self.hashtag_sum / posts,
            mention_usage: self.mention_sum / posts,
            ..self.style
        }
    }
}

pub fn profile_style(corpus: &Corpus) -> WritingStyle {
    let mut profiler = StyleProfiler::new();
    for post in corpus {
        profiler.fold(post);
    }
    profiler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(original: &str, tokens: &[&str], sentences: usize) -> Post {
        Post {
            original_text: original.to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            sentences: (0..sentences).map(|i| format!("s{i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_corpus_yields_default_style() {
        assert_eq!(profile_style(&Corpus::default()), WritingStyle::default());
    }

    #[test]
    fn counts_punctuation_and_emoji_in_original_text() {
        let corpus = Corpus::new(vec![
            post("Wow!! Really? 😀😀", &["wow", "really"], 2),
            post("ok, fine. 🍕", &["ok", "fine"], 1),
        ]);
        let style = profile_style(&corpus);
        assert_eq!(style.punctuation_freq.get("!"), Some(&2));
        assert_eq!(style.punctuation_freq.get("?"), Some(&1));
        assert_eq!(style.punctuation_freq.get(","), Some(&1));
        assert_eq!(style.punctuation_freq.get("."), Some(&1));
        assert_eq!(style.emoji_freq.get("😀"), Some(&2));
        assert_eq!(style.emoji_freq.get("🍕"), Some(&1));
    }

    #[test]
    fn averages_are_per_post() {
        let mut first = post("a", &["abc", "de"], 3);
        first.hashtags = vec!["#a".into(), "#b".into()];
        first.mentions = vec!["@x".into()];
        let second = post("b", &["wxyz"], 1);

        let style = profile_style(&Corpus::new(vec![first, second]));
        assert_eq!(style.avg_sentence_length, 2.0);
        // (2.5 + 4.0) / 2
        assert_eq!(style.avg_word_length, 3.25);
        assert_eq!(style.hashtag_usage, 1.0);
        assert_eq!(style.mention_usage, 0.5);
    }

    #[test]
    fn emoji_outside_tracked_block_is_ignored() {
        // U+2764 HEAVY BLACK HEART sits outside 1F300..1F9FF.
        let style = profile_style(&Corpus::new(vec![post("\u{2764} 🚀", &[], 0)]));
        assert_eq!(style.emoji_freq.len(), 1);
        assert_eq!(style.emoji_freq.get("🚀"), Some(&1));
    }
}
