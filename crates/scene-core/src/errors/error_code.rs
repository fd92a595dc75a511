//! Stable error codes surfaced alongside human-readable messages.

pub const INVALID_RECORD: &str = "INVALID_RECORD";
pub const DANGLING_REFERENCE: &str = "DANGLING_REFERENCE";
pub const DUPLICATE_IDENTIFIER: &str = "DUPLICATE_IDENTIFIER";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait SceneErrorCode {
    fn error_code(&self) -> &'static str;
}
