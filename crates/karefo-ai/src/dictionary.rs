//! Known-word dictionary.
//!
//! Curated mapping from word to its authoritative label. A hit here bypasses
//! the classifier entirely. Keys are matched exactly: no case folding,
//! trimming, or Unicode normalization.

use std::collections::{BTreeMap, HashMap};

use karefo_core::Label;
use serde::Deserialize;

/// Word → label mapping consulted before any prediction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    words: HashMap<String, Label>,
}

/// Summary statistics for a [`Dictionary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySummary {
    pub total_words: usize,
    pub distinct_labels: usize,
    /// label → number of words carrying it, sorted by label.
    pub per_label: BTreeMap<String, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored label for an exact-match word.
    pub fn get(&self, word: &str) -> Option<&Label> {
        self.words.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn summary(&self) -> DictionarySummary {
        let mut per_label: BTreeMap<String, usize> = BTreeMap::new();
        for label in self.words.values() {
            *per_label.entry(label.to_string()).or_insert(0) += 1;
        }

        DictionarySummary {
            total_words: self.words.len(),
            distinct_labels: per_label.len(),
            per_label,
        }
    }
}

impl<W, L> FromIterator<(W, L)> for Dictionary
where
    W: Into<String>,
    L: Into<Label>,
{
    fn from_iter<I: IntoIterator<Item = (W, L)>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|(w, l)| (w.into(), l.into()))
                .collect(),
        }
    }
}
