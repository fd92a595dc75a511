//! Malformed element records.

use super::error_code::{self, SceneErrorCode};

/// Why a single record was rejected as structurally invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record is missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` must be an integer, found {found}")]
    NonNumeric { field: String, found: String },

    #[error("element id must not be empty")]
    EmptyId,

    #[error("geometry field `{field}` is not finite")]
    NonFiniteGeometry { field: String },

    #[error("unknown element type `{type_name}`")]
    UnknownType { type_name: String },

    #[error("record could not be decoded: {message}")]
    Malformed { message: String },
}

impl SceneErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_RECORD
    }
}
