//! The element collection, its identity index, and the derived
//! relationship graph.

pub mod collection;
pub mod graph;
pub mod index;

pub use collection::Scene;
pub use graph::{distinct_groups, GroupEdge, SceneGraph};
pub use index::SceneIndex;
