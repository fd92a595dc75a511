//! Relationship views derived from a scene's live records.
//!
//! The graph is rebuilt from the records, never maintained by hand, so it
//! cannot fall out of step with the fields it is derived from. Tombstones
//! and references to tombstones are invisible here.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::collection::Scene;
use crate::element::{BindingEnd, Element, ElementId, GroupId};

/// A `child ⊂ parent` nesting edge and the elements whose `groupIds` assert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEdge<'a> {
    pub child: &'a GroupId,
    pub parent: &'a GroupId,
    pub asserted_by: Vec<&'a ElementId>,
}

#[derive(Debug)]
pub struct SceneGraph<'a> {
    scene: &'a Scene,
    /// target → linear elements binding to it.
    bound_to: HashMap<&'a str, Vec<(&'a ElementId, BindingEnd)>>,
    /// container → text whose `containerId` names it.
    text_of: HashMap<&'a str, &'a ElementId>,
    frame_children: HashMap<&'a str, Vec<&'a ElementId>>,
    group_members: HashMap<&'a str, Vec<&'a ElementId>>,
    group_edges: IndexMap<(&'a GroupId, &'a GroupId), Vec<&'a ElementId>>,
}

impl<'a> SceneGraph<'a> {
    pub fn build(scene: &'a Scene) -> Self {
        let mut graph = Self {
            scene,
            bound_to: HashMap::new(),
            text_of: HashMap::new(),
            frame_children: HashMap::new(),
            group_members: HashMap::new(),
            group_edges: IndexMap::new(),
        };
        for element in scene.non_deleted() {
            graph.index_element(element);
        }
        graph
    }

    fn index_element(&mut self, element: &'a Element) {
        let id = element.id();

        for (end, binding) in element.kind.bindings() {
            if self.scene.get_live(binding.element_id.as_str()).is_some() {
                self.bound_to
                    .entry(binding.element_id.as_str())
                    .or_default()
                    .push((id, end));
            }
        }

        if let Some(container) = element.kind.container_id() {
            if self.scene.get_live(container.as_str()).is_some() {
                self.text_of.entry(container.as_str()).or_insert(id);
            }
        }

        if let Some(frame) = &element.base.frame_id {
            if self.scene.get_live(frame.as_str()).is_some() {
                self.frame_children
                    .entry(frame.as_str())
                    .or_default()
                    .push(id);
            }
        }

        let groups = distinct_groups(&element.base.group_ids);
        for &group in &groups {
            self.group_members.entry(group.as_str()).or_default().push(id);
        }
        for pair in groups.windows(2) {
            self.group_edges
                .entry((pair[0], pair[1]))
                .or_default()
                .push(id);
        }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Live linear elements whose start or end binding names `target`.
    pub fn bindings_of(&self, target: &str) -> &[(&'a ElementId, BindingEnd)] {
        self.bound_to.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first live text whose `containerId` names `container`.
    pub fn bound_text_of(&self, container: &str) -> Option<&'a ElementId> {
        self.text_of.get(container).copied()
    }

    /// The live container a live text element claims.
    pub fn container_of(&self, text: &str) -> Option<&'a ElementId> {
        let container = self.scene.get_live(text)?.kind.container_id()?;
        self.scene.get_live(container.as_str()).map(Element::id)
    }

    pub fn frame_children(&self, frame: &str) -> &[&'a ElementId] {
        self.frame_children
            .get(frame)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Live elements listing `group` anywhere in their `groupIds`.
    pub fn group_members(&self, group: &str) -> &[&'a ElementId] {
        self.group_members
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every distinct nesting edge, in order of first assertion. Repeated
    /// entries in a `groupIds` list are ignored when deriving edges.
    pub fn group_edges(&self) -> impl Iterator<Item = GroupEdge<'a>> + '_ {
        self.group_edges
            .iter()
            .map(|(&(child, parent), asserted_by)| GroupEdge {
                child,
                parent,
                asserted_by: asserted_by.clone(),
            })
    }

    /// Distinct parents asserted for `group`.
    pub fn parents_of(&self, group: &str) -> Vec<&'a GroupId> {
        self.group_edges
            .keys()
            .filter(|(child, _)| child.as_str() == group)
            .map(|&(_, parent)| parent)
            .collect()
    }

    /// The outermost group of a live element.
    pub fn outermost_group(&self, element: &str) -> Option<&'a GroupId> {
        self.scene.get_live(element)?.base.group_ids.last()
    }
}

/// `groupIds` with repeats removed, first occurrence kept.
pub fn distinct_groups(group_ids: &[GroupId]) -> Vec<&GroupId> {
    let mut seen = Vec::with_capacity(group_ids.len());
    for group in group_ids {
        if !seen.contains(&group) {
            seen.push(group);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BoundElement, ElementKind, LinearData, PointBinding, TextData};

    fn scene() -> Scene {
        let mut rect = Element::new("r1", ElementKind::Rectangle).with_groups(["g1", "g2"]);
        rect.base.bound_elements = vec![BoundElement::text("t1"), BoundElement::arrow("a1")];
        let text = Element::new(
            "t1",
            ElementKind::Text(TextData {
                container_id: Some("r1".into()),
                ..TextData::default()
            }),
        );
        let arrow = Element::new(
            "a1",
            ElementKind::Arrow(LinearData {
                start_binding: Some(PointBinding::new("r1")),
                end_binding: Some(PointBinding::new("gone")),
                ..LinearData::default()
            }),
        )
        .in_frame("f1");
        let frame = Element::new("f1", ElementKind::Frame(Default::default()));
        let gone = Element::new("gone", ElementKind::Ellipse).deleted();
        [rect, text, arrow, frame, gone].into_iter().collect()
    }

    #[test]
    fn derives_live_relationships() {
        let scene = scene();
        let graph = SceneGraph::build(&scene);
        assert_eq!(graph.bindings_of("r1"), &[(&ElementId::from("a1"), BindingEnd::Start)]);
        assert!(graph.bindings_of("gone").is_empty());
        assert_eq!(graph.bound_text_of("r1"), Some(&ElementId::from("t1")));
        assert_eq!(graph.container_of("t1"), Some(&ElementId::from("r1")));
        assert_eq!(graph.frame_children("f1"), &[&ElementId::from("a1")]);
        assert_eq!(graph.outermost_group("r1"), Some(&GroupId::from("g2")));
    }

    #[test]
    fn group_edges_follow_inner_to_outer() {
        let scene = scene();
        let graph = SceneGraph::build(&scene);
        let edges: Vec<_> = graph.group_edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].child.as_str(), "g1");
        assert_eq!(edges[0].parent.as_str(), "g2");
        assert_eq!(graph.parents_of("g1"), vec![&GroupId::from("g2")]);
        assert_eq!(graph.group_members("g2"), &[&ElementId::from("r1")]);
    }
}
