//! Applying suggested repairs and driving the self-heal loop.

use scene_core::models::{Repair, Violation};
use scene_core::scene::distinct_groups;
use scene_core::Scene;
use scene_observability::events;
use scene_validation::IntegrityValidator;

/// What a self-heal run did.
#[derive(Debug, Default)]
pub struct HealOutcome {
    /// Repairs that changed the scene, in application order.
    pub applied: Vec<Repair>,
    /// Violations still present when the loop stopped.
    pub remaining: Vec<Violation>,
    pub passes: usize,
}

impl HealOutcome {
    /// No repairable violation is left.
    pub fn converged(&self) -> bool {
        self.remaining.iter().all(|v| !v.is_repairable())
    }
}

/// Apply one repair in place. Returns whether the scene changed.
///
/// Tombstones are never touched, and versions are not bumped: a repair
/// restores consistency, it is not an edit.
pub fn apply(scene: &mut Scene, repair: &Repair) -> bool {
    let Some(target) = repair.target() else {
        return false;
    };
    let Some(element) = scene.get_mut(target.as_str()) else {
        return false;
    };
    if element.is_deleted() {
        return false;
    }

    match repair {
        Repair::PruneBoundElement { bound, .. } => {
            let before = element.base.bound_elements.len();
            element.base.bound_elements.retain(|entry| &entry.id != bound);
            element.base.bound_elements.len() != before
        }
        Repair::ClearBinding { end, .. } => element
            .kind
            .as_linear_mut()
            .and_then(|linear| linear.binding_mut(*end).take())
            .is_some(),
        Repair::ClearContainer { .. } => element
            .kind
            .as_text_mut()
            .and_then(|text| text.container_id.take())
            .is_some(),
        Repair::ClearFrame { .. } => element.base.frame_id.take().is_some(),
        Repair::DedupeGroups { .. } => dedupe_groups(&mut element.base.group_ids),
        Repair::TruncateGroups { keep, .. } => {
            let deduped = dedupe_groups(&mut element.base.group_ids);
            let groups = &mut element.base.group_ids;
            if groups.len() > *keep {
                groups.truncate(*keep);
                true
            } else {
                deduped
            }
        }
        // Ids are already unique inside a scene.
        Repair::DropDuplicate { .. } | Repair::ReportOnly => false,
    }
}

fn dedupe_groups(groups: &mut Vec<scene_core::GroupId>) -> bool {
    let distinct: Vec<_> = distinct_groups(groups).into_iter().cloned().collect();
    if distinct.len() == groups.len() {
        return false;
    }
    *groups = distinct;
    true
}

/// Validate and repair until nothing repairable is left, nothing changes,
/// or `max_passes` is reached.
pub fn heal(scene: &mut Scene, validator: &IntegrityValidator, max_passes: usize) -> HealOutcome {
    let _span = scene_observability::heal_span!(scene.len()).entered();
    let mut outcome = HealOutcome::default();

    loop {
        let violations = validator.validate_scene(scene);
        if outcome.passes >= max_passes || !violations.iter().any(Violation::is_repairable) {
            outcome.remaining = violations;
            break;
        }
        outcome.passes += 1;

        let mut changed = false;
        for violation in violations.iter().filter(|v| v.is_repairable()) {
            if apply(scene, &violation.repair) {
                events::repair_applied(&violation.repair);
                outcome.applied.push(violation.repair.clone());
                changed = true;
            }
        }
        if !changed {
            outcome.remaining = violations;
            break;
        }
    }

    if !outcome.converged() {
        let left = outcome.remaining.iter().filter(|v| v.is_repairable()).count();
        events::heal_exhausted(outcome.passes, left);
    }
    outcome
}
