//! Sparse TF-IDF index over the normalized corpus.
//!
//! Unigrams and bigrams are drawn from tokens of two or more word
//! characters after English stop-word removal. The vocabulary keeps the
//! `MAX_FEATURES` most frequent terms. Weights use smoothed IDF and every
//! document vector is L2-normalized, so cosine similarity is a dot product.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use stop_words::{get, LANGUAGE};

use crate::error::{MimicError, Result};
use crate::processing::TextNormalizer;

pub const MAX_FEATURES: usize = 5000;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

static STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::English).into_iter().collect());

/// Sparse vector keyed by vocabulary index.
type SparseVector = BTreeMap<usize, f64>;

/// Nearest post for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Position of the post in the corpus.
    pub index: usize,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// An index with no documents; every query reports no match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fit vocabulary and weights over `texts`. Position `i` in the index is
    /// position `i` in `texts`, empty texts included.
    pub fn build(texts: &[&str]) -> Result<Self> {
        let analyzed: Vec<Vec<String>> = texts.iter().map(|t| analyze(t)).collect();

        let mut term_counts: HashMap<&str, u64> = HashMap::new();
        let mut doc_freq: HashMap<&str, u64> = HashMap::new();
        for terms in &analyzed {
            let mut seen = HashSet::new();
            for term in terms {
                *term_counts.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(MimicError::EmptyCorpus(
                "no post contains indexable terms".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, u64)> = term_counts.into_iter().collect();
        ranked.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then(a.cmp(b)));
        ranked.truncate(MAX_FEATURES);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n = texts.len() as f64;
        let vocabulary: HashMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            documents: Vec::with_capacity(analyzed.len()),
        };
        let documents: Vec<SparseVector> =
            analyzed.iter().map(|terms| index.vectorize(terms)).collect();
        index.documents = documents;

        tracing::debug!(
            documents = index.documents.len(),
            vocabulary = index.vocabulary.len(),
            "Similarity index built"
        );

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Most similar post, lowest index on ties.
    ///
    /// Fails with `EmptyCorpus` when nothing is indexed and with
    /// `Vectorization` when the question shares no term with the vocabulary.
    pub fn query(&self, question: &str) -> Result<Match> {
        if self.documents.is_empty() {
            return Err(MimicError::EmptyCorpus("similarity index is empty".to_string()));
        }

        let terms = analyze(&TextNormalizer::clean(question));
        let query = self.vectorize(&terms);
        if query.is_empty() {
            return Err(MimicError::Vectorization(
                "question shares no vocabulary with the corpus".to_string(),
            ));
        }

        let mut best = Match {
            index: 0,
            score: f64::NEG_INFINITY,
        };
        for (index, document) in self.documents.iter().enumerate() {
            let score = dot(&query, document);
            if score > best.score {
                best = Match { index, score };
            }
        }
        Ok(best)
    }

    /// [`query`](Self::query) with the degenerate fallbacks applied: no
    /// overlap resolves to post 0 at similarity 0, an empty index to `None`.
    pub fn nearest(&self, question: &str) -> Option<Match> {
        match self.query(question) {
            Ok(found) => Some(found),
            Err(MimicError::Vectorization(reason)) => {
                tracing::debug!(%reason, "Falling back to first post");
                Some(Match {
                    index: 0,
                    score: 0.0,
                })
            }
            Err(_) => None,
        }
    }

    fn vectorize(&self, terms: &[String]) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                *vector.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in vector.iter_mut() {
            *weight *= self.idf[*idx];
        }

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Unigrams then bigrams of the stop-filtered token stream.
fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(*t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    a.iter()
        .filter_map(|(idx, wa)| b.get(idx).map(|wb| wa * wb))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(texts: &[&str]) -> SimilarityIndex {
        SimilarityIndex::build(texts).expect("index builds")
    }

    #[test]
    fn nearest_post_by_lexical_overlap() {
        let idx = index(&["the cat sat", "the dog ran", "cats and dogs play"]);
        assert_eq!(idx.query("cat").expect("match").index, 0);
        assert_eq!(idx.query("dogs playing? dogs play!").expect("match").index, 2);
    }

    #[test]
    fn analyze_drops_stop_words_and_short_tokens() {
        assert_eq!(
            analyze("The cat is a fluffy cat x"),
            vec!["cat", "fluffy", "cat", "cat fluffy", "fluffy cat"]
        );
    }

    #[test]
    fn ordinal_and_number_words_are_stop_words() {
        let idx = index(&["second place", "first prize"]);
        assert!(matches!(
            idx.query("first"),
            Err(MimicError::Vectorization(_))
        ));
        assert!(matches!(
            idx.query("two"),
            Err(MimicError::Vectorization(_))
        ));
        assert_eq!(idx.query("prize").expect("match").index, 1);
    }

    #[test]
    fn unseen_terms_are_a_vectorization_error() {
        let idx = index(&["the cat sat"]);
        assert!(matches!(
            idx.query("quantum blockchain"),
            Err(MimicError::Vectorization(_))
        ));
        assert_eq!(
            idx.nearest("quantum blockchain"),
            Some(Match {
                index: 0,
                score: 0.0
            })
        );
    }

    #[test]
    fn empty_corpus_fails_to_build() {
        assert!(matches!(
            SimilarityIndex::build(&["", "the a"]),
            Err(MimicError::EmptyCorpus(_))
        ));
        assert!(matches!(
            SimilarityIndex::build(&[]),
            Err(MimicError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn empty_index_reports_no_match() {
        assert_eq!(SimilarityIndex::empty().nearest("anything"), None);
    }

    #[test]
    fn empty_posts_keep_their_position() {
        let idx = index(&["", "sunny beach"]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.query("beach").expect("match").index, 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let idx = index(&["apple tart", "apple tart", "pear jam"]);
        let found = idx.query("apple tart").expect("match");
        assert_eq!(found.index, 0);
        assert!((found.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vocabulary_is_capped() {
        let texts: Vec<String> = (0..3000).map(|i| format!("word{i} other{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let idx = index(&refs);
        assert_eq!(idx.vocabulary_size(), MAX_FEATURES);
    }
}
