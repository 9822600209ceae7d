//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use storage::repository::StorageError;
use vocab_core::model::{CatalogError, EmptySessionError, Level};

/// Errors emitted while loading the word catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read word catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Errors emitted by `ProgressStore` when persisting state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no words available for session")]
    Empty,
    #[error("no session in progress")]
    NotActive,
    #[error("level {level} is not complete yet")]
    NotEligible { level: Level },
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl From<EmptySessionError> for SessionError {
    fn from(_: EmptySessionError) -> Self {
        SessionError::Empty
    }
}
