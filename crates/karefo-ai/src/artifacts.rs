//! Load-once artifact bundle: classifier, vectorizer, and known-word dictionary.
//!
//! The bundle is built before any lookup is served and never mutated. If any
//! artifact fails to load, the whole bundle falls back to degraded mode:
//! classifier and vectorizer absent, dictionary empty.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::classifier::{Classifier, ClassifierModel};
use crate::dictionary::Dictionary;
use crate::error::ArtifactError;
use crate::vectorizer::{NgramVectorizer, Vectorizer};

pub const CLASSIFIER_FILE: &str = "karky.nerMODEL";
pub const VECTORIZER_FILE: &str = "karky.nerVECT";
pub const DICTIONARY_FILE: &str = "karky.nerDICT";

/// Locations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub vectorizer: PathBuf,
    pub dictionary: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(CLASSIFIER_FILE),
            vectorizer: dir.join(VECTORIZER_FILE),
            dictionary: dir.join(DICTIONARY_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Immutable state shared by every resolution call.
pub struct ArtifactBundle {
    classifier: Option<Box<dyn Classifier>>,
    vectorizer: Option<Box<dyn Vectorizer>>,
    dictionary: Dictionary,
}

impl fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("classifier", &self.classifier.is_some())
            .field("vectorizer", &self.vectorizer.is_some())
            .field("dictionary_words", &self.dictionary.len())
            .finish()
    }
}

impl ArtifactBundle {
    /// Fully available bundle from in-memory parts.
    pub fn new(
        classifier: impl Classifier + 'static,
        vectorizer: impl Vectorizer + 'static,
        dictionary: Dictionary,
    ) -> Self {
        Self::from_parts(Some(Box::new(classifier)), Some(Box::new(vectorizer)), dictionary)
    }

    pub fn from_parts(
        classifier: Option<Box<dyn Classifier>>,
        vectorizer: Option<Box<dyn Vectorizer>>,
        dictionary: Dictionary,
    ) -> Self {
        Self {
            classifier,
            vectorizer,
            dictionary,
        }
    }

    /// Bundle served after a failed load.
    pub fn degraded() -> Self {
        Self::from_parts(None, None, Dictionary::default())
    }

    /// Load all three artifacts, failing on the first problem.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let classifier: ClassifierModel = read_json(&paths.classifier)?;
        let vectorizer: NgramVectorizer = read_json(&paths.vectorizer)?;
        let dictionary: Dictionary = read_json(&paths.dictionary)?;

        if classifier.dim() != vectorizer.dim() {
            return Err(ArtifactError::Invalid {
                path: paths.classifier.clone(),
                reason: format!(
                    "classifier expects {} features but vectorizer produces {}",
                    classifier.dim(),
                    vectorizer.dim()
                ),
            });
        }

        let summary = dictionary.summary();
        info!(
            classes = classifier.classes().len(),
            features = vectorizer.dim(),
            analyzer = ?vectorizer.analyzer(),
            words = summary.total_words,
            labels = summary.distinct_labels,
            "loaded classifier, vectorizer, and dictionary"
        );

        Ok(Self::new(classifier, vectorizer, dictionary))
    }

    /// Load at process start, falling back to degraded mode on any failure.
    pub fn load_or_degraded(paths: &ArtifactPaths) -> Self {
        match Self::load(paths) {
            Ok(bundle) => bundle,
            Err(e) => {
                error!(
                    error = %e,
                    "failed to load artifacts, every lookup will return MODEL_NOT_LOADED"
                );
                Self::degraded()
            }
        }
    }

    /// True when the classifier or vectorizer is unavailable.
    pub fn is_degraded(&self) -> bool {
        self.classifier.is_none() || self.vectorizer.is_none()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn vectorizer(&self) -> Option<&dyn Vectorizer> {
        self.vectorizer.as_deref()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
