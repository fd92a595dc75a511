//! Version progression between two observations of the same collection.
//!
//! A later observation must never carry an older stamp for an id, must bump
//! the stamp whenever content changes, must keep tombstones instead of
//! dropping ids, and a delete must change nothing but the tombstone flag.

use scene_core::element::Element;
use scene_core::models::{Invariant, Repair, Violation};
use scene_core::Scene;

pub fn check(before: &Scene, after: &Scene) -> Vec<Violation> {
    let mut violations = Vec::new();

    for old in before.iter() {
        let id = old.id();
        let Some(new) = after.get(id.as_str()) else {
            violations.push(report(
                Invariant::SoftDelete,
                old,
                format!("{id} was removed instead of tombstoned"),
            ));
            continue;
        };

        let (old_stamp, new_stamp) = (old.stamp(), new.stamp());
        if new_stamp < old_stamp {
            violations.push(report(
                Invariant::Monotonicity,
                old,
                format!("{id} stamp regressed from {old_stamp} to {new_stamp}"),
            ));
        } else if new_stamp == old_stamp && new != old {
            violations.push(report(
                Invariant::Monotonicity,
                old,
                format!("{id} changed without a version bump at {old_stamp}"),
            ));
        } else if is_single_delete(old, new) && !only_tombstone_changed(old, new) {
            violations.push(report(
                Invariant::SoftDelete,
                old,
                format!("{id} was deleted at {new_stamp} but other fields changed too"),
            ));
        }
    }

    violations
}

fn report(invariant: Invariant, element: &Element, message: String) -> Violation {
    Violation::new(invariant, vec![element.id().clone()], message, Repair::ReportOnly)
}

/// The delete was the only mutation between the two observations.
fn is_single_delete(old: &Element, new: &Element) -> bool {
    !old.is_deleted() && new.is_deleted() && old.base.version.checked_add(1) == Some(new.base.version)
}

fn only_tombstone_changed(old: &Element, new: &Element) -> bool {
    let mut expected = old.clone();
    expected.base.is_deleted = true;
    expected.base.version = new.base.version;
    expected.base.version_nonce = new.base.version_nonce;
    expected.base.updated = new.base.updated;
    &expected == new
}
