//! Error types for the motion classifier library.
//!
//! Only the I/O shell (configuration, datasets, classifier lookup) can fail.
//! The numeric core in `geo`, `statistics`, `classifiers` and `evaluation`
//! is total over its input domain and never returns these.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset or report JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No classifier is registered under the requested name
    #[error("Unknown classifier: {0}")]
    UnknownClassifier(String),

    /// Dataset content is malformed
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
