//! Identifier uniqueness over a raw record sequence.

use scene_core::models::{Invariant, Repair, Violation};
use scene_core::SceneIndex;

/// One violation per discarded duplicate, suggesting the stamp-rule winner.
pub fn check(index: &SceneIndex<'_>) -> Vec<Violation> {
    index
        .duplicates()
        .iter()
        .filter_map(|repair| match repair {
            Repair::DropDuplicate { id, kept, dropped } => Some(Violation::new(
                Invariant::UniqueId,
                vec![id.clone()],
                format!("id {id} appears more than once; keeping {kept}, dropping {dropped}"),
                repair.clone(),
            )),
            _ => None,
        })
        .collect()
}
