//! Per-record shape rules that need no other record to evaluate.
//!
//! Everything here is report-only: a record at version 0 still merges by
//! its stamp, it is just flagged as never having been created through a
//! mutation.

use scene_core::element::{Element, ElementKind};
use scene_core::models::{Invariant, Repair, Violation};
use scene_core::Scene;

pub fn check(scene: &Scene) -> Vec<Violation> {
    scene.iter().filter_map(check_record).collect()
}

fn check_record(element: &Element) -> Option<Violation> {
    let id = element.id();
    let message = if let Err(e) = element.check() {
        format!("{id}: {e}")
    } else if element.base.version == 0 {
        format!("{id}: version 0 was never produced by a mutation")
    } else if let ElementKind::Freedraw(stroke) = &element.kind {
        if stroke.simulate_pressure || stroke.pressures.len() == stroke.points.len() {
            return None;
        }
        format!(
            "{id}: freedraw has {} points but {} pressures",
            stroke.points.len(),
            stroke.pressures.len()
        )
    } else {
        return None;
    };
    Some(Violation::new(
        Invariant::RecordShape,
        vec![id.clone()],
        message,
        Repair::ReportOnly,
    ))
}
