//! Configuration for the scene graph.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;
pub mod observability_config;
pub mod reconcile_config;
pub mod scene_config;
pub mod validation_config;

pub use observability_config::ObservabilityConfig;
pub use reconcile_config::{EqualStampPolicy, ReconcileConfig};
pub use scene_config::SceneConfig;
pub use validation_config::ValidationConfig;
