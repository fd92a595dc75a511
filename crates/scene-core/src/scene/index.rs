//! Identity index over a raw record sequence that may repeat ids.

use indexmap::IndexMap;

use super::collection::Scene;
use crate::element::{Element, ElementId};
use crate::models::Repair;

/// Borrowing id → representative-record map.
///
/// When an id repeats, the later copy replaces the earlier one only if its
/// stamp is strictly greater; equal stamps keep the first seen. Ids keep the
/// position of their first appearance either way.
#[derive(Debug, Clone, Default)]
pub struct SceneIndex<'a> {
    records: IndexMap<&'a str, &'a Element>,
    duplicates: Vec<Repair>,
}

impl<'a> SceneIndex<'a> {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn insert(&mut self, record: &'a Element) {
        let Some(existing) = self.records.get_mut(record.id().as_str()) else {
            self.records.insert(record.id().as_str(), record);
            return;
        };

        let (kept, dropped) = if record.stamp() > existing.stamp() {
            let dropped = existing.stamp();
            *existing = record;
            (record.stamp(), dropped)
        } else {
            (existing.stamp(), record.stamp())
        };
        self.duplicates.push(Repair::DropDuplicate {
            id: record.id().clone(),
            kept,
            dropped,
        });
    }

    pub fn get(&self, id: &str) -> Option<&'a Element> {
        self.records.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Ids in first-appearance order. Cloning the iterator restarts it.
    pub fn ids(&self) -> impl Iterator<Item = &'a ElementId> + Clone + '_ {
        self.records.values().copied().map(Element::id)
    }

    /// Representative records in first-appearance order.
    pub fn all(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.records.values().copied()
    }

    pub fn non_deleted(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.all().filter(|el| !el.is_deleted())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One `DropDuplicate` per discarded copy, in input order.
    pub fn duplicates(&self) -> &[Repair] {
        &self.duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Clone the representatives into an owned scene.
    pub fn into_scene(self) -> Scene {
        let mut scene = Scene::with_capacity(self.records.len());
        for record in self.records.into_values() {
            scene.upsert(record.clone());
        }
        scene
    }
}
