//! Label resolution for out-of-vocabulary words: dictionary lookup, n-gram
//! classifier fallback, and Tamil explanatory messages.

mod error;
pub use error::{ArtifactError, LookupError, PredictionError};

pub mod artifacts;
pub mod classifier;
pub mod dictionary;
pub mod messages;
pub mod resolver;
pub mod service;
pub mod vectorizer;

pub use artifacts::{ArtifactBundle, ArtifactPaths};
pub use classifier::{Classifier, ClassifierModel};
pub use dictionary::Dictionary;
pub use messages::format_message;
pub use resolver::Resolver;
pub use service::NerService;
pub use vectorizer::{NgramVectorizer, SparseVector, Vectorizer};
