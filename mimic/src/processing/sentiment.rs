use std::collections::HashMap;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

use crate::models::SentimentScores;

/// Scores the polarity of a piece of text.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScores;
}

/// Valence lexicon, English and Turkish, on a -4..=4 scale.
const LEXICON_ENTRIES: &[(&str, f64)] = &[
    // English
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("good", 1.9),
    ("great", 3.1),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("excellent", 2.7),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("best", 3.2),
    ("beautiful", 2.9),
    ("nice", 1.8),
    ("happy", 2.7),
    ("glad", 2.0),
    ("fun", 2.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("win", 2.8),
    ("won", 2.7),
    ("proud", 2.1),
    ("excited", 1.4),
    ("sunny", 0.8),
    ("perfect", 2.7),
    ("cool", 1.3),
    ("hope", 1.9),
    ("yes", 1.7),
    ("hate", -2.7),
    ("hated", -3.2),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("sad", -2.1),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("boring", -1.3),
    ("ugly", -2.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("lose", -1.3),
    ("lost", -1.3),
    ("tired", -1.9),
    ("sick", -2.3),
    ("cry", -2.1),
    ("disappointed", -1.9),
    ("stupid", -2.4),
    ("wrong", -2.1),
    ("problem", -1.7),
    ("pain", -2.3),
    ("rainy", -0.4),
    ("sorry", -0.3),
    // Turkish
    ("sevgi", 2.9),
    ("seviyorum", 3.2),
    ("sevdim", 2.9),
    ("güzel", 2.5),
    ("harika", 3.1),
    ("mükemmel", 3.0),
    ("muhteşem", 3.0),
    ("süper", 2.8),
    ("iyi", 1.9),
    ("mutlu", 2.7),
    ("mutluyum", 2.8),
    ("sevinç", 2.6),
    ("teşekkürler", 1.9),
    ("teşekkür", 1.8),
    ("başarı", 2.3),
    ("başarılı", 2.4),
    ("keyif", 2.2),
    ("eğlenceli", 2.3),
    ("umut", 1.9),
    ("şahane", 3.0),
    ("tatlı", 1.7),
    ("gurur", 2.1),
    ("nefret", -2.9),
    ("kötü", -2.5),
    ("berbat", -3.0),
    ("rezalet", -3.1),
    ("üzgün", -2.1),
    ("üzücü", -2.0),
    ("mutsuz", -2.6),
    ("sinir", -2.2),
    ("sinirli", -2.3),
    ("kızgın", -2.3),
    ("korkunç", -2.6),
    ("sıkıcı", -1.5),
    ("yorgun", -1.9),
    ("hasta", -2.0),
    ("acı", -2.3),
    ("ağlamak", -2.1),
    ("maalesef", -1.2),
    ("sorun", -1.7),
    ("başarısız", -2.4),
];

static LEXICON: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| LEXICON_ENTRIES.iter().copied().collect());

/// Negators that precede the word they flip.
const PRE_NEGATORS: &[&str] = &[
    "not", "no", "never", "isnt", "wasnt", "arent", "dont", "doesnt", "didnt", "wont", "cant",
    "cannot", "without", "nor", "hiç", "asla", "hiçbir",
];

/// Turkish negates with a trailing particle ("güzel değil").
const POST_NEGATORS: &[&str] = &["değil", "yok", "değildi", "değilim"];

const NEGATION_SCALAR: f64 = -0.74;
const NEGATION_WINDOW: usize = 3;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// Lexicon scorer with negation flipping and a squashed compound score.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn valence(&self, tokens: &[String], i: usize) -> f64 {
        let Some(&base) = LEXICON.get(tokens[i].as_str()) else {
            return 0.0;
        };

        let negated_before = (1..=NEGATION_WINDOW)
            .any(|k| i >= k && PRE_NEGATORS.contains(&tokens[i - k].as_str()));
        let negated_after = tokens
            .get(i + 1)
            .is_some_and(|next| POST_NEGATORS.contains(&next.as_str()));

        if negated_before || negated_after {
            base * NEGATION_SCALAR
        } else {
            base
        }
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, text: &str) -> SentimentScores {
        let tokens: Vec<String> = text
            .unicode_words()
            .map(|w| w.replace('\'', "").to_lowercase())
            .collect();
        if tokens.is_empty() {
            return SentimentScores::default();
        }

        let valences: Vec<f64> = (0..tokens.len()).map(|i| self.valence(&tokens, i)).collect();

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += bangs * EXCLAMATION_BOOST * sum.signum();
        }
        let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();

        let positive: f64 = valences.iter().filter(|v| **v > 0.0).sum();
        let negative: f64 = valences.iter().filter(|v| **v < 0.0).map(|v| -v).sum();
        let neutral = valences.iter().filter(|v| **v == 0.0).count() as f64;
        let total = positive + negative + neutral;

        SentimentScores {
            positive: positive / total,
            negative: negative / total,
            neutral: neutral / total,
            compound,
        }
    }
}
