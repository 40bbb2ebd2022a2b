//! Character and word n-gram vectorizer.
//!
//! Turns a raw word into a sparse feature vector over a fixed vocabulary, the
//! same way count/TF-IDF n-gram vectorizers do: extract n-grams, count the
//! ones present in the vocabulary, weight by inverse document frequency when
//! available, then normalize.
//!
//! The `word` analyzer tokenizes with `\b\w\w+\b`. Here `\w` is the Unicode
//! word class, which keeps combining marks (Tamil vowel signs, virama) inside
//! a token. Python's `re` stops a token at those marks, so a word-analyzer
//! vocabulary exported from scikit-learn only matches for text without them.
//! The `char` and `char_wb` analyzers are unaffected.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::PredictionError;

/// Default token pattern of count/TF-IDF word vectorizers. Punctuation and
/// single-character tokens are dropped.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Transform from a raw word to the feature space a classifier consumes.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, word: &str) -> Result<SparseVector, PredictionError>;
}

/// Sparse feature vector: `(index, value)` pairs sorted by index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries. Duplicate indices are summed.
    pub fn new(dim: usize, entries: impl IntoIterator<Item = (usize, f32)>) -> Self {
        let mut merged: BTreeMap<usize, f32> = BTreeMap::new();
        for (idx, val) in entries {
            *merged.entry(idx).or_insert(0.0) += val;
        }
        Self {
            dim,
            entries: merged.into_iter().collect(),
        }
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// Number of non-zero features.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product against a dense row.
    pub fn dot(&self, dense: &[f32]) -> Result<f32, PredictionError> {
        if dense.len() != self.dim {
            return Err(PredictionError::DimensionMismatch {
                expected: dense.len(),
                actual: self.dim,
            });
        }
        let mut sum = 0.0f32;
        for &(idx, val) in &self.entries {
            let w = dense
                .get(idx)
                .ok_or(PredictionError::FeatureOutOfRange {
                    index: idx,
                    dim: self.dim,
                })?;
            sum += w * val;
        }
        Ok(sum)
    }

    pub fn norm_l2(&self) -> f32 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt()
    }

    fn scale(&mut self, factor: f32) {
        for (_, v) in &mut self.entries {
            *v *= factor;
        }
    }
}

/// How the input string is split into terms before n-gram extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    /// Character n-grams over the whole string.
    Char,
    /// Character n-grams inside whitespace-separated tokens, each padded with a space.
    CharWb,
    /// Word n-grams over tokens of two or more word characters.
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of [`NgramVectorizer`], validated on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNgramVectorizer {
    pub analyzer: Analyzer,
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f32>>,
    #[serde(default)]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

/// Pre-fitted n-gram vectorizer with a fixed vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawNgramVectorizer")]
pub struct NgramVectorizer {
    analyzer: Analyzer,
    min_n: usize,
    max_n: usize,
    lowercase: bool,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f32>>,
    norm: Option<Norm>,
    dim: usize,
}

impl TryFrom<RawNgramVectorizer> for NgramVectorizer {
    type Error = String;

    fn try_from(raw: RawNgramVectorizer) -> Result<Self, Self::Error> {
        let (min_n, max_n) = raw.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }

        let vocab_dim = match raw.vocabulary.values().max() {
            Some(&m) => m
                .checked_add(1)
                .ok_or_else(|| "vocabulary index out of range".to_string())?,
            None => 0,
        };

        let dim = match &raw.idf {
            Some(idf) => {
                if idf.len() < vocab_dim {
                    return Err(format!(
                        "idf has {} weights but vocabulary indexes up to {}",
                        idf.len(),
                        vocab_dim
                    ));
                }
                if let Some(i) = idf.iter().position(|w| !w.is_finite()) {
                    return Err(format!("idf weight {i} is not finite"));
                }
                idf.len()
            }
            None => vocab_dim,
        };

        Ok(Self {
            analyzer: raw.analyzer,
            min_n,
            max_n,
            lowercase: raw.lowercase,
            vocabulary: raw.vocabulary,
            idf: raw.idf,
            norm: raw.norm,
            dim,
        })
    }
}

impl NgramVectorizer {
    /// Size of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn analyzer(&self) -> Analyzer {
        self.analyzer
    }

    /// Extract all n-grams of `text` in order, including ones outside the vocabulary.
    pub fn ngrams(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        match self.analyzer {
            Analyzer::Char => char_ngrams(&text, self.min_n, self.max_n),
            Analyzer::CharWb => char_wb_ngrams(&text, self.min_n, self.max_n),
            Analyzer::Word => word_ngrams(&text, self.min_n, self.max_n),
        }
    }
}

impl Vectorizer for NgramVectorizer {
    fn transform(&self, word: &str) -> Result<SparseVector, PredictionError> {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for gram in self.ngrams(word) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries = Vec::with_capacity(counts.len());
        for (idx, count) in counts {
            if idx >= self.dim {
                return Err(PredictionError::FeatureOutOfRange {
                    index: idx,
                    dim: self.dim,
                });
            }
            let weight = self.idf.as_ref().map_or(1.0, |idf| idf[idx]);
            entries.push((idx, count * weight));
        }

        let mut vector = SparseVector::new(self.dim, entries);

        let norm = match self.norm {
            Some(Norm::L1) => vector.entries.iter().map(|(_, v)| v.abs()).sum::<f32>(),
            Some(Norm::L2) => vector.norm_l2(),
            None => 0.0,
        };
        if norm > 0.0 {
            vector.scale(1.0 / norm);
        }

        Ok(vector)
    }
}

// ── N-gram extraction ──

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let chars: Vec<char> = collapse_whitespace(text).chars().collect();
    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n > chars.len() {
            break;
        }
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}

/// Character n-grams bounded by word edges.
///
/// A token shorter than `n` yields itself (padded) once and stops the
/// search for longer n-grams of that token.
fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for token in text.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(token.chars())
            .chain(std::iter::once(' '))
            .collect();
        let len = padded.len();

        for n in min_n..=max_n {
            let mut offset = 0;
            grams.push(padded[..n.min(len)].iter().collect());
            while offset + n < len {
                offset += 1;
                grams.push(padded[offset..offset + n].iter().collect());
            }
            if offset == 0 {
                break;
            }
        }
    }
    grams
}

fn word_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let tokens: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(json: &str) -> NgramVectorizer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn char_ngrams_cover_whole_string() {
        let grams = char_ngrams("abc", 1, 2);
        assert_eq!(grams, vec!["a", "b", "c", "ab", "bc"]);
    }

    #[test]
    fn char_ngrams_collapse_whitespace() {
        let grams = char_ngrams("a  b", 3, 3);
        assert_eq!(grams, vec!["a b"]);
    }

    #[test]
    fn char_ngrams_are_codepoint_based() {
        // மும்பை is 6 code points.
        let grams = char_ngrams("மும்பை", 6, 6);
        assert_eq!(grams, vec!["மும்பை"]);
    }

    #[test]
    fn char_wb_pads_tokens() {
        let grams = char_wb_ngrams("ab", 2, 3);
        assert_eq!(grams, vec![" a", "ab", "b ", " ab", "ab "]);
    }

    #[test]
    fn char_wb_short_token_stops_early() {
        // " a " has length 3, so n=4 yields the padded token once and stops.
        let grams = char_wb_ngrams("a", 4, 5);
        assert_eq!(grams, vec![" a "]);
    }

    #[test]
    fn word_ngrams_join_tokens() {
        let grams = word_ngrams("new  york city", 1, 2);
        assert_eq!(
            grams,
            vec!["new", "york", "city", "new york", "york city"]
        );
    }

    #[test]
    fn word_ngrams_skip_punctuation_and_single_chars() {
        let grams = word_ngrams("a new-york, city!", 1, 1);
        assert_eq!(grams, vec!["new", "york", "city"]);
    }

    #[test]
    fn word_tokens_keep_tamil_vowel_signs() {
        let grams = word_ngrams("சென்னை நகரம்", 1, 1);
        assert_eq!(grams, vec!["சென்னை", "நகரம்"]);
    }

    #[test]
    fn rejects_overflowing_vocabulary_index() {
        let err = serde_json::from_str::<NgramVectorizer>(
            r#"{"analyzer": "char", "ngram_range": [1, 1], "vocabulary": {"a": 18446744073709551615}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("vocabulary index out of range"));
    }

    #[test]
    fn rejects_non_finite_idf() {
        // 1e39 overflows f32 and decodes as infinity.
        let err = serde_json::from_str::<NgramVectorizer>(
            r#"{"analyzer": "char", "ngram_range": [1, 1], "vocabulary": {"a": 0}, "idf": [1e39]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn transform_counts_known_ngrams() {
        let v = vectorizer(
            r#"{
                "analyzer": "char",
                "ngram_range": [1, 1],
                "vocabulary": {"a": 0, "b": 1}
            }"#,
        );
        let x = v.transform("abaz").unwrap();
        assert_eq!(x.dim(), 2);
        assert_eq!(x.entries(), &[(0, 2.0), (1, 1.0)]);
    }

    #[test]
    fn transform_lowercases_by_default() {
        let v = vectorizer(
            r#"{"analyzer": "char", "ngram_range": [1, 1], "vocabulary": {"a": 0}}"#,
        );
        assert_eq!(v.transform("A").unwrap().nnz(), 1);

        let v = vectorizer(
            r#"{"analyzer": "char", "ngram_range": [1, 1], "lowercase": false, "vocabulary": {"a": 0}}"#,
        );
        assert_eq!(v.transform("A").unwrap().nnz(), 0);
    }

    #[test]
    fn transform_applies_idf_and_l2_norm() {
        let v = vectorizer(
            r#"{
                "analyzer": "char",
                "ngram_range": [1, 1],
                "vocabulary": {"a": 0, "b": 1},
                "idf": [3.0, 4.0],
                "norm": "l2"
            }"#,
        );
        let x = v.transform("ab").unwrap();
        assert!((x.entries()[0].1 - 0.6).abs() < 1e-6);
        assert!((x.entries()[1].1 - 0.8).abs() < 1e-6);
        assert!((x.norm_l2() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn transform_l1_norm() {
        let v = vectorizer(
            r#"{
                "analyzer": "char",
                "ngram_range": [1, 1],
                "vocabulary": {"a": 0, "b": 1},
                "norm": "l1"
            }"#,
        );
        let x = v.transform("aab").unwrap();
        let total: f32 = x.entries().iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_ngrams_give_zero_vector() {
        let v = vectorizer(
            r#"{"analyzer": "char_wb", "ngram_range": [2, 3], "vocabulary": {"zz": 0}, "norm": "l2"}"#,
        );
        let x = v.transform("சென்னை").unwrap();
        assert_eq!(x.nnz(), 0);
        assert_eq!(x.dim(), 1);
    }

    #[test]
    fn empty_word_gives_zero_vector() {
        let v = vectorizer(
            r#"{"analyzer": "char_wb", "ngram_range": [1, 2], "vocabulary": {" ": 0}}"#,
        );
        assert_eq!(v.transform("").unwrap().nnz(), 0);
    }

    #[test]
    fn rejects_bad_ngram_range() {
        let err = serde_json::from_str::<NgramVectorizer>(
            r#"{"analyzer": "char", "ngram_range": [3, 2], "vocabulary": {}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ngram_range"));
    }

    #[test]
    fn rejects_short_idf() {
        let err = serde_json::from_str::<NgramVectorizer>(
            r#"{"analyzer": "char", "ngram_range": [1, 1], "vocabulary": {"a": 0, "b": 1}, "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("idf"));
    }

    #[test]
    fn dot_checks_dimension() {
        let x = SparseVector::new(3, [(0, 1.0), (2, 2.0)]);
        assert_eq!(x.dot(&[1.0, 5.0, 0.5]).unwrap(), 2.0);
        assert_eq!(
            x.dot(&[1.0, 2.0]),
            Err(PredictionError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn sparse_vector_merges_duplicates() {
        let x = SparseVector::new(4, [(3, 1.0), (1, 1.0), (3, 2.0)]);
        assert_eq!(x.entries(), &[(1, 1.0), (3, 3.0)]);
    }
}
