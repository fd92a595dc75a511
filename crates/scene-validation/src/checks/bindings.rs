//! Binding symmetry between linear elements and the shapes they attach to.
//!
//! Checked from both directions: a live arrow's `startBinding`/`endBinding`
//! must name a live bindable element that lists the arrow, and every arrow
//! entry in a live element's `boundElements` must be backed by a binding.
//! A reference to a tombstone counts as dangling.

use scene_core::element::{BoundElementType, Element};
use scene_core::models::{Invariant, Repair, Violation};
use scene_core::{Scene, SceneGraph};

pub fn check(scene: &Scene, graph: &SceneGraph<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for element in scene.non_deleted() {
        check_outgoing(scene, element, &mut violations);
        check_listed_arrows(scene, graph, element, &mut violations);
    }

    violations
}

fn check_outgoing(scene: &Scene, element: &Element, out: &mut Vec<Violation>) {
    let id = element.id();
    for (end, binding) in element.kind.bindings() {
        let target_id = &binding.element_id;
        let problem = match scene.get_live(target_id.as_str()) {
            None => Some("is missing or deleted"),
            Some(target) if target.id() == id => Some("is the element itself"),
            Some(target) if !target.kind.is_bindable() => Some("is not bindable"),
            Some(target) if !target.base.lists_bound(id, BoundElementType::Arrow) => {
                Some("does not list the binding in boundElements")
            }
            Some(_) => None,
        };
        if let Some(problem) = problem {
            out.push(Violation::new(
                Invariant::BindingSymmetry,
                vec![id.clone(), target_id.clone()],
                format!("{id} {end:?} binding target {target_id} {problem}"),
                Repair::ClearBinding {
                    element: id.clone(),
                    end,
                },
            ));
        }
    }
}

fn check_listed_arrows(
    scene: &Scene,
    graph: &SceneGraph<'_>,
    element: &Element,
    out: &mut Vec<Violation>,
) {
    let id = element.id();
    for bound in element
        .base
        .bound_elements
        .iter()
        .filter(|bound| bound.kind == BoundElementType::Arrow)
    {
        let backed = scene
            .get_live(bound.id.as_str())
            .is_some_and(|arrow| arrow.kind.is_linear())
            && graph
                .bindings_of(id.as_str())
                .iter()
                .any(|(arrow, _)| *arrow == &bound.id);
        if !backed {
            out.push(Violation::new(
                Invariant::BindingSymmetry,
                vec![id.clone(), bound.id.clone()],
                format!(
                    "{id} lists arrow {} in boundElements but no live binding points back",
                    bound.id
                ),
                Repair::PruneBoundElement {
                    container: id.clone(),
                    bound: bound.id.clone(),
                },
            ));
        }
    }
}
