//! Lookup result types shared by every transport.

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// The outcome of classifying a single word.
///
/// `message` is present only when the word was not in the dictionary and its
/// label has a message template. It carries the word verbatim and is plain
/// text: nothing in it is escaped for markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NerResult {
    pub word: String,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NerResult {
    pub fn new(word: impl Into<String>, label: Label, message: Option<String>) -> Self {
        Self {
            word: word.into(),
            label,
            message,
        }
    }
}

/// Body returned in place of a [`NerResult`] when the pipeline faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Wrap a fault description the way the lookup endpoint reports it.
    pub fn from_fault(detail: impl std::fmt::Display) -> Self {
        Self {
            error: format!("An error occurred: {detail}"),
        }
    }
}
