//! Frame membership: `frameId` must name a live frame-like element.

use scene_core::models::{Invariant, Repair, Violation};
use scene_core::Scene;

pub fn check(scene: &Scene) -> Vec<Violation> {
    let mut violations = Vec::new();

    for element in scene.non_deleted() {
        let Some(frame_id) = &element.base.frame_id else {
            continue;
        };
        let id = element.id();
        let problem = match scene.get_live(frame_id.as_str()) {
            None => Some("is missing or deleted"),
            Some(frame) if frame.id() == id => Some("is the element itself"),
            Some(frame) if !frame.kind.is_frame_like() => Some("is not a frame"),
            Some(_) => None,
        };
        if let Some(problem) = problem {
            violations.push(Violation::new(
                Invariant::FrameMembership,
                vec![id.clone(), frame_id.clone()],
                format!("{id} frame {frame_id} {problem}"),
                Repair::ClearFrame {
                    element: id.clone(),
                },
            ));
        }
    }

    violations
}
