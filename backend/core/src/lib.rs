pub mod error;
pub mod traits;
pub mod types;

pub use error::OcrError;
pub use traits::{Document, OcrEngine};
pub use types::{expand_home, BackendKind, OcrSettings};
