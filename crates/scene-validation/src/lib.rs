//! # scene-validation
//!
//! Read-only integrity checks for element collections. Every violation names
//! the broken invariant, the offending ids, and a suggested repair that the
//! reconciler's self-heal step can apply.
//!
//! ## Check families
//! 1. **Identity**: no repeated ids in a raw record sequence
//! 2. **Bindings**: arrow bindings and `boundElements` agree in both directions
//! 3. **Containers**: a bound text and its container list each other
//! 4. **Groups**: group nesting forms a forest
//! 5. **Frames**: `frameId` names a live frame
//! 6. **Progression**: stamps only move forward and deletes are soft
//!
//! Per-record shape rules (pressure counts, zero version, non-finite
//! geometry) are reported but never repaired.

pub mod checks;
pub mod engine;

pub use engine::{validate, IntegrityValidator};
