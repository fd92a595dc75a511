//! # scene-observability
//!
//! Structured logging for the scene graph: subscriber setup driven by
//! `SCENE_LOG` or [`scene_core::config::ObservabilityConfig`], span macros
//! for reconcile and validation passes, and one event function per
//! noteworthy merge outcome.

pub mod tracing_setup;

pub use tracing_setup::{events, init_from_config, init_tracing, init_tracing_with_filter};
