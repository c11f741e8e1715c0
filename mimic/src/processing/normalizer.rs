use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Corpus, Post, RawPost};
use crate::processing::sentiment::SentimentScorer;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid URL pattern"));
static NON_BMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{10000}-\x{10FFFF}]").expect("valid non-BMP pattern"));
static SPECIAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?]").expect("valid special-char pattern"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag pattern"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention pattern"));

/// Turkish function words dropped before counting.
static STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::Turkish).into_iter().collect());

/// Turns raw scraped posts into normalized [`Post`]s.
#[derive(Clone)]
pub struct TextNormalizer {
    scorer: Arc<dyn SentimentScorer>,
}

impl TextNormalizer {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Strip URLs, emoji and special characters, collapse whitespace and
    /// lowercase. `.,!?` survive.
    pub fn clean(text: &str) -> String {
        let text = URL_RE.replace_all(text, "");
        let text = NON_BMP_RE.replace_all(&text, "");
        let text = SPECIAL_CHARS_RE.replace_all(&text, "");
        let text = WHITESPACE_RE.replace_all(&text, " ");
        text.trim().to_lowercase()
    }

    /// Word tokens of already-cleaned text, punctuation excluded.
    pub fn words(cleaned: &str) -> Vec<String> {
        cleaned.unicode_words().map(str::to_string).collect()
    }

    /// Split cleaned text after each run of terminal punctuation.
    pub fn sentences(cleaned: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut graphemes = cleaned.graphemes(true).peekable();

        while let Some(grapheme) = graphemes.next() {
            current.push_str(grapheme);

            let terminal = is_terminal(grapheme);
            let next_terminal = graphemes.peek().is_some_and(|next| is_terminal(next));
            if terminal && !next_terminal {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
        push_sentence(&mut sentences, &current);

        sentences
    }

    pub fn is_stop_word(token: &str) -> bool {
        STOP_WORDS.contains(token)
    }

    pub fn normalize(&self, raw: &RawPost) -> Post {
        let original_text = raw.text().to_string();
        let cleaned_text = Self::clean(&original_text);
        let tokens = Self::words(&cleaned_text);
        let sentences = Self::sentences(&cleaned_text);

        let filtered_tokens: Vec<String> = tokens
            .iter()
            .filter(|token| !Self::is_stop_word(token))
            .cloned()
            .collect();

        let mut word_frequency = BTreeMap::new();
        for token in &filtered_tokens {
            *word_frequency.entry(token.clone()).or_insert(0) += 1;
        }

        let bigrams = filtered_tokens
            .windows(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        let sentiment = self.scorer.score(&cleaned_text);

        Post {
            hashtags: extract_all(&HASHTAG_RE, &original_text),
            mentions: extract_all(&MENTION_RE, &original_text),
            original_text,
            cleaned_text,
            tokens,
            filtered_tokens,
            sentences,
            sentiment,
            word_frequency,
            bigrams,
            metadata: raw.metadata.clone(),
        }
    }

    /// Normalize every post, keeping arrival order.
    pub fn normalize_corpus(&self, raws: &[RawPost]) -> Corpus {
        Corpus::new(raws.iter().map(|raw| self.normalize(raw)).collect())
    }
}

fn is_terminal(grapheme: &str) -> bool {
    matches!(grapheme, "." | "!" | "?")
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn extract_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
