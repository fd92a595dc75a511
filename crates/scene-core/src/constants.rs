/// Scene crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version assigned to a freshly created element.
pub const INITIAL_VERSION: u64 = 1;

/// Hard ceiling on self-heal passes regardless of configuration.
pub const MAX_REPAIR_PASSES_CEILING: usize = 4096;

/// Environment variable read by the tracing subscriber.
pub const LOG_ENV_VAR: &str = "SCENE_LOG";

/// Prefix for environment overrides of config values.
pub const ENV_PREFIX: &str = "SCENE_";
