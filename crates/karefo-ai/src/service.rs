//! Single-word lookup pipeline fronted by every transport.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use karefo_core::NerResult;
use tracing::error;

use crate::artifacts::ArtifactBundle;
use crate::error::{LookupError, panic_message};
use crate::messages::format_message;
use crate::resolver::Resolver;

/// Resolve a word, attach its message, and shield the caller from faults.
#[derive(Debug, Clone)]
pub struct NerService {
    resolver: Resolver,
}

impl NerService {
    pub fn new(artifacts: Arc<ArtifactBundle>) -> Self {
        Self {
            resolver: Resolver::new(artifacts),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.resolver.artifacts().is_degraded()
    }

    pub fn dictionary_len(&self) -> usize {
        self.resolver.artifacts().dictionary().len()
    }

    /// Classify `word` and build its result.
    ///
    /// Returns `Err` only for faults the resolver does not already turn into
    /// sentinel labels.
    pub fn lookup(&self, word: &str) -> Result<NerResult, LookupError> {
        guarded(|| self.compose(word))
    }

    fn compose(&self, word: &str) -> NerResult {
        let label = self.resolver.resolve(word);
        let is_known = self.resolver.artifacts().dictionary().contains(word);
        let message = format_message(word, label.as_str(), is_known);
        NerResult::new(word, label, message)
    }
}

fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, LookupError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let detail = panic_message(&*payload);
        error!(error = %detail, "lookup pipeline failed");
        LookupError::Internal(detail)
    })
}
