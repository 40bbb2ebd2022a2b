pub mod label;
pub mod result;

pub use label::Label;
pub use result::{ErrorBody, NerResult};
