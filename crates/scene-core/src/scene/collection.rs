//! Insertion-ordered, id-indexed element collection.
//!
//! Id uniqueness is structural: a second record with an existing id replaces
//! the first in place. Deleted records stay in the collection as tombstones.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::index::SceneIndex;
use crate::element::{Element, ElementId};
use crate::errors::{SceneError, SceneResult};

/// An ordered scene: every record, live or deleted, keyed by id.
///
/// `PartialEq` compares contents by id and ignores order; use
/// [`Scene::same_order`] when order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: IndexMap<ElementId, Element>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: IndexMap::with_capacity(capacity),
        }
    }

    /// Build from a record sequence that may repeat ids. Duplicates resolve by
    /// stamp; the discarded copies are ignored here, see [`SceneIndex`] to
    /// observe them.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        let records: Vec<Element> = records.into_iter().collect();
        SceneIndex::build(&records).into_scene()
    }

    /// Insert or replace a record. A replaced record keeps its position.
    pub fn upsert(&mut self, element: Element) -> Option<Element> {
        self.elements.insert(element.base.id.clone(), element)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// The record if it exists and is not a tombstone.
    pub fn get_live(&self, id: &str) -> Option<&Element> {
        self.get(id).filter(|el| !el.is_deleted())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Position of `id` in iteration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.get_index_of(id)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, ElementId, Element> {
        self.elements.values()
    }

    /// Ids in insertion order. Cloning the iterator restarts it.
    pub fn ids(&self) -> indexmap::map::Keys<'_, ElementId, Element> {
        self.elements.keys()
    }

    pub fn non_deleted(&self) -> impl Iterator<Item = &Element> {
        self.iter().filter(|el| !el.is_deleted())
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Element> {
        self.iter().filter(|el| el.is_deleted())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Same records in the same order.
    pub fn same_order(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }

    /// Decode a persisted array of raw records.
    ///
    /// Malformed records are skipped and returned as `InvalidRecord` errors;
    /// duplicate ids resolve by stamp and are reported as `DuplicateIdentifier`.
    pub fn from_json(value: Value) -> SceneResult<(Self, Vec<SceneError>)> {
        let Value::Array(raw) = value else {
            return Err(SceneError::invalid_record(
                "<scene>",
                crate::errors::RecordError::Malformed {
                    message: "scene must be a JSON array of records".to_string(),
                },
            ));
        };

        let mut errors = Vec::new();
        let mut records = Vec::with_capacity(raw.len());
        for record in raw {
            match Element::from_json(record) {
                Ok(element) => records.push(element),
                Err(e) => errors.push(e),
            }
        }

        let index = SceneIndex::build(&records);
        errors.extend(index.duplicates().iter().filter_map(|repair| {
            repair
                .target()
                .map(|id| SceneError::DuplicateIdentifier { id: id.to_string() })
        }));
        Ok((index.into_scene(), errors))
    }

    pub fn to_json(&self) -> SceneResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl FromIterator<Element> for Scene {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Element;
    type IntoIter = indexmap::map::Values<'a, ElementId, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}

impl Serialize for Scene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements.values())
    }
}

impl<'de> Deserialize<'de> for Scene {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<Element>::deserialize(deserializer)?;
        Ok(Self::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use serde_json::json;

    #[test]
    fn upsert_keeps_position() {
        let mut scene = Scene::new();
        scene.upsert(Element::new("a", ElementKind::Rectangle));
        scene.upsert(Element::new("b", ElementKind::Ellipse));
        scene.upsert(Element::new("a", ElementKind::Diamond));
        let ids: Vec<&str> = scene.ids().map(ElementId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(scene.get("a").unwrap().type_name(), "diamond");
    }

    #[test]
    fn ids_iterator_is_restartable() {
        let scene: Scene = ["x", "y", "z"]
            .into_iter()
            .map(|id| Element::new(id, ElementKind::Rectangle))
            .collect();
        let ids = scene.ids();
        let first: Vec<_> = ids.clone().collect();
        let second: Vec<_> = ids.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn deleted_and_live_views_partition() {
        let scene: Scene = vec![
            Element::new("a", ElementKind::Rectangle),
            Element::new("b", ElementKind::Rectangle).deleted(),
        ]
        .into_iter()
        .collect();
        assert_eq!(scene.non_deleted().count(), 1);
        assert_eq!(scene.deleted().count(), 1);
        assert!(scene.get_live("b").is_none());
        assert!(scene.get("b").is_some());
    }

    #[test]
    fn from_json_collects_bad_records() {
        let raw = json!([
            {"id": "a", "type": "rectangle", "version": 1, "versionNonce": 5},
            {"id": "b", "type": "rectangle", "version": "x", "versionNonce": 5},
            {"id": "a", "type": "rectangle", "version": 3, "versionNonce": 1}
        ]);
        let (scene, errors) = Scene::from_json(raw).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get("a").unwrap().base.version, 3);
        assert_eq!(errors.len(), 2);
    }
}
