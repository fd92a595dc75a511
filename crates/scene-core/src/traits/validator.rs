use crate::models::Violation;
use crate::scene::Scene;

/// Scene-wide invariant checking.
pub trait IIntegrityValidator: Send + Sync {
    /// Every invariant violation in the scene, each with a suggested repair.
    /// An empty result means the scene is consistent.
    fn validate(&self, scene: &Scene) -> Vec<Violation>;
}
