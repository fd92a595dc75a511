//! IntegrityValidator: implements IIntegrityValidator, runs every check
//! family over a scene and aggregates the violations.

use scene_core::config::ValidationConfig;
use scene_core::element::Element;
use scene_core::models::Violation;
use scene_core::traits::IIntegrityValidator;
use scene_core::{Scene, SceneGraph, SceneIndex};

use crate::checks::{bindings, containers, frames, groups, identity, progression, shape};

/// Read-only invariant checker.
///
/// Violations come out grouped by check family in a fixed order: record
/// shape, group forest, binding symmetry, container/text, frame membership.
/// Within a family they follow scene order.
#[derive(Debug, Clone, Default)]
pub struct IntegrityValidator {
    config: ValidationConfig,
}

impl IntegrityValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check a scene. Ids are unique by construction, so identity is not
    /// re-checked here; see [`Self::validate_records`].
    pub fn validate_scene(&self, scene: &Scene) -> Vec<Violation> {
        let _span = scene_observability::validation_span!(scene.len()).entered();
        let graph = SceneGraph::build(scene);
        let mut violations = Vec::new();

        if self.config.check_record_shape {
            violations.extend(shape::check(scene));
        }
        if self.config.check_groups {
            violations.extend(groups::check(scene, &graph));
        }
        violations.extend(bindings::check(scene, &graph));
        violations.extend(containers::check(scene));
        violations.extend(frames::check(scene));

        tracing::debug!(
            elements = scene.len(),
            violations = violations.len(),
            "scene validated"
        );
        violations
    }

    /// Check a raw record sequence that may repeat ids. Duplicates are
    /// reported first; the remaining checks run on the stamp-rule winners.
    pub fn validate_records(&self, records: &[Element]) -> Vec<Violation> {
        let index = SceneIndex::build(records);
        let mut violations = identity::check(&index);
        let scene = index.into_scene();
        violations.extend(self.validate_scene(&scene));
        violations
    }

    /// Check that `after` is a legal successor of `before`: no stamp
    /// regressions, no unversioned edits, tombstones kept, and deletes that
    /// leave every other field alone.
    pub fn check_progression(&self, before: &Scene, after: &Scene) -> Vec<Violation> {
        let violations = progression::check(before, after);
        if !violations.is_empty() {
            tracing::warn!(
                violations = violations.len(),
                "scene progression broke version ordering"
            );
        }
        violations
    }
}

impl IIntegrityValidator for IntegrityValidator {
    fn validate(&self, scene: &Scene) -> Vec<Violation> {
        self.validate_scene(scene)
    }
}

/// Validate with default settings.
pub fn validate(scene: &Scene) -> Vec<Violation> {
    IntegrityValidator::default().validate_scene(scene)
}
