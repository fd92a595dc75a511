//! Container/text pairing.
//!
//! A live text's `containerId` must name a live text-container that lists the
//! text in `boundElements`, and a container's text entries must each be
//! claimed back. A container carries at most one bound text; the first
//! listed text that claims it wins.

use scene_core::element::{BoundElementType, Element, ElementId};
use scene_core::models::{Invariant, Repair, Violation};
use scene_core::Scene;

pub fn check(scene: &Scene) -> Vec<Violation> {
    let mut violations = Vec::new();

    for element in scene.non_deleted() {
        check_container_id(scene, element, &mut violations);
        check_listed_texts(scene, element, &mut violations);
    }

    violations
}

fn check_container_id(scene: &Scene, text: &Element, out: &mut Vec<Violation>) {
    let Some(container_id) = text.kind.container_id() else {
        return;
    };
    let id = text.id();
    let problem = match scene.get_live(container_id.as_str()) {
        None => Some("is missing or deleted".to_string()),
        Some(container) if !container.kind.is_text_container() => Some(format!(
            "is a {} which cannot hold text",
            container.type_name()
        )),
        Some(container) if !container.base.lists_bound(id, BoundElementType::Text) => {
            Some("does not list the text in boundElements".to_string())
        }
        Some(container) if held_text(scene, container).is_some_and(|held| held != id) => {
            Some("already holds another bound text".to_string())
        }
        Some(_) => None,
    };
    if let Some(problem) = problem {
        out.push(Violation::new(
            Invariant::ContainerText,
            vec![id.clone(), container_id.clone()],
            format!("text {id} container {container_id} {problem}"),
            Repair::ClearContainer { text: id.clone() },
        ));
    }
}

fn check_listed_texts(scene: &Scene, container: &Element, out: &mut Vec<Violation>) {
    let id = container.id();
    for bound in container
        .base
        .bound_elements
        .iter()
        .filter(|bound| bound.kind == BoundElementType::Text)
    {
        if !claims(scene, &bound.id, id) {
            out.push(Violation::new(
                Invariant::ContainerText,
                vec![id.clone(), bound.id.clone()],
                format!(
                    "{id} lists text {} in boundElements but the text does not claim it",
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

/// The first listed text that claims `container` back.
fn held_text<'a>(scene: &Scene, container: &'a Element) -> Option<&'a ElementId> {
    container
        .base
        .bound_elements
        .iter()
        .filter(|bound| bound.kind == BoundElementType::Text)
        .map(|bound| &bound.id)
        .find(|text| claims(scene, text, container.id()))
}

fn claims(scene: &Scene, text: &ElementId, container: &ElementId) -> bool {
    scene
        .get_live(text.as_str())
        .and_then(|text| text.kind.container_id())
        .is_some_and(|claimed| claimed == container)
}
