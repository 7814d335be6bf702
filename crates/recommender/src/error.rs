//! Error types for the recommender crate.

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors that can occur while training, saving or loading a model
#[derive(Error, Debug)]
pub enum ModelError {
    /// I/O error while reading or writing an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An artifact could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading the training documents from the store failed
    #[error("Store error: {0}")]
    StoreError(#[from] DataLoadError),

    /// `fit` was called without any document
    #[error("Cannot fit a vectorizer on an empty corpus")]
    EmptyCorpus,

    /// A loaded artifact does not hold together (e.g. matrix size vs documents)
    #[error("Inconsistent model artifact: {0}")]
    InconsistentArtifact(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
