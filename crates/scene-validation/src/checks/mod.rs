//! One module per invariant family. Each check reads the scene and its
//! derived graph and returns violations; none of them mutate.

pub mod bindings;
pub mod containers;
pub mod frames;
pub mod groups;
pub mod identity;
pub mod progression;
pub mod shape;
