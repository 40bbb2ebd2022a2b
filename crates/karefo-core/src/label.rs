//! Named-entity labels.
//!
//! A label is whatever string the dictionary or classifier emits. The set is
//! deliberately open: new classifier classes flow through untouched, and only
//! the message templates decide which labels get an explanation.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named-entity label such as `PLACE` or `CURRENCY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Sentinel: classifier or vectorizer failed to load at startup.
    pub const MODEL_NOT_LOADED: &'static str = "MODEL_NOT_LOADED";
    /// Sentinel: vectorization or prediction failed for a single word.
    pub const PREDICTION_ERROR: &'static str = "PREDICTION_ERROR";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn model_not_loaded() -> Self {
        Self::new(Self::MODEL_NOT_LOADED)
    }

    pub fn prediction_error() -> Self {
        Self::new(Self::PREDICTION_ERROR)
    }

    /// True for the reserved failure labels, which never carry a message.
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::MODEL_NOT_LOADED | Self::PREDICTION_ERROR
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
