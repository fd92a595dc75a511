//! Two-way scene reconciliation.
//!
//! Contested ids resolve per record through [`winner::pick`]; ids present on
//! one side only are taken as they are. The merged scene then self-heals:
//! every reference left dangling by the merge is cleared on the live side.

use scene_core::config::{ReconcileConfig, SceneConfig};
use scene_core::element::Element;
use scene_core::errors::SceneError;
use scene_core::models::{Decision, MergeDecision, ReconcileOutcome, ReconcileReport, Side};
use scene_core::traits::IReconciler;
use scene_core::{Scene, SceneIndex};
use scene_observability::events;
use scene_validation::IntegrityValidator;
use serde_json::Value;

use super::repair::heal;
use super::winner::{self, Resolution};

/// Stateless merge orchestrator for scenes.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
    validator: IntegrityValidator,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self {
            config,
            validator: IntegrityValidator::default(),
        }
    }

    pub fn with_validator(config: ReconcileConfig, validator: IntegrityValidator) -> Self {
        Self { config, validator }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::with_validator(
            config.reconcile.clone(),
            IntegrityValidator::new(config.validation.clone()),
        )
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Merge `remote` into `local`.
    ///
    /// Output order keeps local order for ids known locally, then appends
    /// remote-only ids in remote order.
    pub fn reconcile(&self, local: &Scene, remote: &Scene) -> ReconcileOutcome {
        let _span = scene_observability::reconcile_span!(local.len(), remote.len()).entered();
        let mut merged = Scene::with_capacity(local.len() + remote.len());
        let mut report = ReconcileReport::new();

        for ours in local.iter() {
            let chosen = match remote.get(ours.id().as_str()) {
                Some(theirs) => self.resolve(ours, theirs, &mut report),
                None => {
                    // Local state is kept even when malformed; there is
                    // nothing to fall back to.
                    if let Err(e) = ours.check() {
                        reject(ours, Side::Local, e, &mut report);
                    }
                    ours
                }
            };
            merged.upsert(chosen.clone());
        }

        for theirs in remote.iter().filter(|el| !local.contains(el.id().as_str())) {
            match theirs.check() {
                Ok(()) => {
                    merged.upsert(theirs.clone());
                }
                Err(e) => reject(theirs, Side::Remote, e, &mut report),
            }
        }

        if self.config.prune_dangling {
            let healed = heal(&mut merged, &self.validator, self.config.max_repair_passes);
            report.repairs = healed.applied;
        }

        events::reconcile_completed(
            merged.len(),
            report.decisions.len(),
            report.repairs.len(),
            report.error_count(),
        );
        ReconcileOutcome {
            scene: merged,
            report,
        }
    }

    fn resolve<'a>(
        &self,
        ours: &'a Element,
        theirs: &'a Element,
        report: &mut ReconcileReport,
    ) -> &'a Element {
        let Resolution {
            winner,
            decision,
            rejected,
        } = winner::pick(ours, theirs, self.config.equal_stamp_policy);
        let chosen = match winner {
            Side::Local => ours,
            Side::Remote => theirs,
        };

        match decision {
            Decision::Newer(side) => events::record_resolved(chosen.id(), side, chosen.stamp()),
            Decision::DivergentTie(kept) => events::divergent_tie(chosen.id(), chosen.stamp(), kept),
            Decision::Identical | Decision::Rejected(_) => {}
        }
        for (side, error) in rejected {
            let record = match side {
                Side::Local => ours,
                Side::Remote => theirs,
            };
            reject(record, side, error, report);
        }

        report.decisions.push(MergeDecision {
            id: chosen.id().clone(),
            stamp: chosen.stamp(),
            decision,
        });
        chosen
    }

    /// Merge raw record sequences that may repeat ids. Duplicates inside
    /// either input resolve by stamp first and are reported as
    /// `DuplicateIdentifier`.
    pub fn reconcile_records(&self, local: &[Element], remote: &[Element]) -> ReconcileOutcome {
        let mut duplicates = Vec::new();
        let mut index = |records: &[Element]| {
            let index = SceneIndex::build(records);
            duplicates.extend(index.duplicates().iter().cloned());
            index.into_scene()
        };
        let (local, remote) = (index(local), index(remote));

        let mut outcome = self.reconcile(&local, &remote);
        let report = &mut outcome.report;
        report.errors.extend(duplicates.iter().filter_map(|repair| {
            repair
                .target()
                .map(|id| SceneError::DuplicateIdentifier { id: id.to_string() })
        }));
        duplicates.append(&mut report.repairs);
        report.repairs = duplicates;
        outcome
    }

    /// Merge two persisted JSON arrays of raw records. Records that fail to
    /// decode are skipped and reported; the rest merge normally.
    pub fn reconcile_json(&self, local: Value, remote: Value) -> ReconcileOutcome {
        let mut errors = Vec::new();
        let mut decode = |value: Value| match Scene::from_json(value) {
            Ok((scene, decode_errors)) => {
                errors.extend(decode_errors);
                scene
            }
            Err(e) => {
                errors.push(e);
                Scene::new()
            }
        };
        let (local, remote) = (decode(local), decode(remote));

        let mut outcome = self.reconcile(&local, &remote);
        errors.append(&mut outcome.report.errors);
        outcome.report.errors = errors;
        outcome
    }

    /// Fold any number of scenes left to right.
    pub fn reconcile_all(&self, scenes: &[Scene]) -> ReconcileOutcome {
        let Some((first, rest)) = scenes.split_first() else {
            return ReconcileOutcome::default();
        };
        let mut acc = ReconcileOutcome {
            scene: first.clone(),
            report: ReconcileReport::new(),
        };
        for next in rest {
            let step = self.reconcile(&acc.scene, next);
            acc.report.absorb(step.report);
            acc.scene = step.scene;
        }
        acc
    }
}

impl IReconciler for Reconciler {
    fn reconcile(&self, local: &Scene, remote: &Scene) -> ReconcileOutcome {
        Reconciler::reconcile(self, local, remote)
    }
}

fn reject(
    record: &Element,
    side: Side,
    error: scene_core::errors::RecordError,
    report: &mut ReconcileReport,
) {
    events::record_rejected(record.id().as_str(), side, &error.to_string());
    report.add_error(SceneError::invalid_record(record.id().as_str(), error));
}

/// Reconcile with default settings.
pub fn reconcile(local: &Scene, remote: &Scene) -> ReconcileOutcome {
    Reconciler::default().reconcile(local, remote)
}

/// Fold any number of scenes with default settings.
pub fn reconcile_all(scenes: &[Scene]) -> ReconcileOutcome {
    Reconciler::default().reconcile_all(scenes)
}
