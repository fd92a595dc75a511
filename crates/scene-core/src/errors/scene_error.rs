//! Umbrella error for scene operations.

use super::error_code::{self, SceneErrorCode};
use super::{ConfigError, RecordError};

/// Errors surfaced by scene-graph operations.
///
/// Reconciliation never fails as a whole; per-record failures are collected
/// into a [`crate::ReconcileReport`] instead of being returned.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid record {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: RecordError,
    },

    /// Never returned by reconciliation, which clears dangling references
    /// and reports them as repairs. Kept so callers that walk references
    /// themselves share the error code.
    #[error("element {from} references missing or unusable element {to} via {via}")]
    DanglingReference { from: String, to: String, via: String },

    #[error("duplicate identifier {id} in input collection")]
    DuplicateIdentifier { id: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SceneError {
    /// Wrap a record error with the id of the offending record.
    pub fn invalid_record(id: impl Into<String>, source: RecordError) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            source,
        }
    }
}

impl SceneErrorCode for SceneError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRecord { .. } => error_code::INVALID_RECORD,
            Self::DanglingReference { .. } => error_code::DANGLING_REFERENCE,
            Self::DuplicateIdentifier { .. } => error_code::DUPLICATE_IDENTIFIER,
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type SceneResult<T> = Result<T, SceneError>;
