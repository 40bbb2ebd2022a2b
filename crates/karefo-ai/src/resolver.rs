//! Label resolution: dictionary first, classifier fallback.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use karefo_core::Label;
use tracing::{debug, warn};

use crate::artifacts::ArtifactBundle;
use crate::classifier::Classifier;
use crate::error::{PredictionError, panic_message};
use crate::vectorizer::Vectorizer;

/// Resolves a word to a label against a shared [`ArtifactBundle`].
///
/// Resolution never fails: every fault becomes a sentinel label.
#[derive(Debug, Clone)]
pub struct Resolver {
    artifacts: Arc<ArtifactBundle>,
}

impl Resolver {
    pub fn new(artifacts: Arc<ArtifactBundle>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ArtifactBundle {
        &self.artifacts
    }

    /// Label for `word`.
    ///
    /// 1. Degraded bundle: `MODEL_NOT_LOADED`, dictionary not consulted.
    /// 2. Exact dictionary hit: the stored label, classifier skipped.
    /// 3. Otherwise the classifier's top prediction, or `PREDICTION_ERROR`
    ///    if vectorizing or predicting fails.
    pub fn resolve(&self, word: &str) -> Label {
        let (Some(classifier), Some(vectorizer)) =
            (self.artifacts.classifier(), self.artifacts.vectorizer())
        else {
            return Label::model_not_loaded();
        };

        if let Some(label) = self.artifacts.dictionary().get(word) {
            debug!(word, %label, "found in dictionary");
            return label.clone();
        }

        match predict(vectorizer, classifier, word) {
            Ok(label) => {
                debug!(word, %label, "predicted");
                label
            }
            Err(e) => {
                warn!(word, error = %e, "prediction failed");
                Label::prediction_error()
            }
        }
    }
}

/// Vectorize and classify, turning panics inside either model into errors.
fn predict(
    vectorizer: &dyn Vectorizer,
    classifier: &dyn Classifier,
    word: &str,
) -> Result<Label, PredictionError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let features = vectorizer.transform(word)?;
        debug!(word, features = features.nnz(), "vectorized");
        classifier.predict(&features)
    }))
    .unwrap_or_else(|payload| Err(PredictionError::Other(panic_message(&*payload))))
}
