//! Structured log events for merge and repair outcomes.
//!
//! Each function emits a `tracing` event with structured fields.

use scene_core::element::{ElementId, VersionStamp};
use scene_core::models::{Repair, Side};

/// A contested id resolved by stamp order.
pub fn record_resolved(id: &ElementId, winner: Side, stamp: VersionStamp) {
    tracing::debug!(
        event = "record_resolved",
        element_id = %id,
        winner = ?winner,
        stamp = %stamp,
        "record resolved"
    );
}

/// Two peers produced different content under the same stamp.
pub fn divergent_tie(id: &ElementId, stamp: VersionStamp, kept: Side) {
    tracing::warn!(
        event = "divergent_tie",
        element_id = %id,
        stamp = %stamp,
        kept = ?kept,
        "equal stamps with divergent content"
    );
}

/// A malformed record lost regardless of its stamp.
pub fn record_rejected(id: &str, side: Side, reason: &str) {
    tracing::warn!(
        event = "record_rejected",
        element_id = %id,
        side = ?side,
        reason = %reason,
        "record rejected"
    );
}

/// A self-heal repair was applied to a live record.
pub fn repair_applied(repair: &Repair) {
    tracing::info!(
        event = "repair_applied",
        repair = ?repair,
        "repair applied"
    );
}

/// Self-heal stopped at the pass limit with violations left.
pub fn heal_exhausted(passes: usize, remaining: usize) {
    tracing::warn!(
        event = "heal_exhausted",
        passes = passes,
        remaining = remaining,
        "self-heal did not reach a fixed point"
    );
}

/// Log reconcile completion.
pub fn reconcile_completed(elements: usize, contested: usize, repairs: usize, errors: usize) {
    tracing::info!(
        event = "reconcile_completed",
        elements = elements,
        contested = contested,
        repairs = repairs,
        errors = errors,
        "reconcile completed"
    );
}
