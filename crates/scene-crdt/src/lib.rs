//! # scene-crdt
//!
//! Last-writer-wins reconciliation of element collections.
//!
//! Each element id is an LWW register keyed by its `(version, versionNonce)`
//! stamp. Tombstones are ordinary values of that register, so a newer delete
//! beats an older live copy and a newer restore beats an older delete.
//!
//! ## Guarantees
//! - **Idempotent**: merging a consistent scene with itself returns it unchanged.
//! - **Commutative per id**: the winning record for an id does not depend on
//!   argument order, except for equal stamps with divergent content under
//!   `EqualStampPolicy::PreferLocal` (reported as `Decision::DivergentTie`).
//! - **Associative** for scenes whose merges need no relationship repair.
//! - **Total**: malformed cross-references are pruned, malformed records are
//!   rejected per id, and a merged scene is always returned.

pub mod merge;

pub use merge::{heal, reconcile, reconcile_all, HealOutcome, Reconciler};
pub use scene_core::models::ReconcileOutcome;
