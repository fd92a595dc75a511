// Single source of truth for all default values.

// --- Reconcile ---
pub const DEFAULT_PRUNE_DANGLING: bool = true;
pub const DEFAULT_MAX_REPAIR_PASSES: usize = 64;

// --- Validation ---
pub const DEFAULT_CHECK_RECORD_SHAPE: bool = true;
pub const DEFAULT_CHECK_GROUPS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;

/// Log levels accepted by `observability.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
