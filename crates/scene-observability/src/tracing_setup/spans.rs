//! Span definitions for reconcile, self-heal, and validation passes.

/// Create a reconcile span.
#[macro_export]
macro_rules! reconcile_span {
    ($local_len:expr, $remote_len:expr) => {
        tracing::info_span!("scene.reconcile", local = $local_len, remote = $remote_len)
    };
}

/// Create a self-heal span.
#[macro_export]
macro_rules! heal_span {
    ($elements:expr) => {
        tracing::debug_span!("scene.heal", elements = $elements)
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($elements:expr) => {
        tracing::debug_span!("scene.validation", elements = $elements)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECONCILE: &str = "scene.reconcile";
    pub const HEAL: &str = "scene.heal";
    pub const VALIDATION: &str = "scene.validation";
}
