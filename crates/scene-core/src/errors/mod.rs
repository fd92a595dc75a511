//! Error handling for the scene graph.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod record_error;
pub mod scene_error;

pub use config_error::ConfigError;
pub use error_code::SceneErrorCode;
pub use record_error::RecordError;
pub use scene_error::{SceneError, SceneResult};
