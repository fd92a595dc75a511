//! # scene-core
//!
//! Foundation crate for the collaborative scene graph.
//! Defines the element model, version stamps, the id-indexed collection,
//! the derived relationship graph, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod element;
pub mod errors;
pub mod models;
pub mod scene;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SceneConfig;
pub use element::{Element, ElementBase, ElementId, ElementKind, GroupId, VersionStamp};
pub use errors::{SceneError, SceneResult};
pub use models::{Invariant, ReconcileOutcome, ReconcileReport, Repair, Violation};
pub use scene::{Scene, SceneGraph, SceneIndex};
pub use traits::{IIntegrityValidator, IReconciler};
