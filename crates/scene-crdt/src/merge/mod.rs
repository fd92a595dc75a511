//! Merge pipeline: per-id winner selection, then relationship self-heal.

pub mod reconciler;
pub mod repair;
pub mod winner;

pub use reconciler::{reconcile, reconcile_all, Reconciler};
pub use repair::{heal, HealOutcome};
pub use winner::{pick, Resolution};
