use serde::{Deserialize, Serialize};

use crate::element::{ElementId, VersionStamp};
use crate::errors::SceneError;
use crate::models::Repair;
use crate::scene::Scene;

/// Which input a merged record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

/// How a contested id (present in both inputs) was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum Decision {
    /// Both records are byte-for-byte equal.
    Identical,
    /// The record with the strictly greater stamp won.
    Newer(Side),
    /// Equal stamps with different content; the named side was kept.
    DivergentTie(Side),
    /// The named side's record was malformed; the other side was kept.
    Rejected(Side),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDecision {
    pub id: ElementId,
    /// Stamp of the kept record.
    pub stamp: VersionStamp,
    pub decision: Decision,
}

/// Everything a reconciliation observed besides the merged scene.
/// Accumulates non-fatal errors so a best-effort result is always returned.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub decisions: Vec<MergeDecision>,
    pub repairs: Vec<Repair>,
    pub errors: Vec<SceneError>,
}

impl ReconcileReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: SceneError) {
        self.errors.push(error);
    }

    /// No repairs were needed and no record was rejected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.repairs.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Equal-stamp ties with divergent content observed during the merge.
    pub fn divergent_ties(&self) -> impl Iterator<Item = &MergeDecision> {
        self.decisions
            .iter()
            .filter(|d| matches!(d.decision, Decision::DivergentTie(_)))
    }

    /// Fold another report into this one, e.g. across an n-way merge.
    pub fn absorb(&mut self, other: ReconcileReport) {
        self.decisions.extend(other.decisions);
        self.repairs.extend(other.repairs);
        self.errors.extend(other.errors);
    }
}

/// Result of a reconciliation: the merged scene plus everything observed
/// on the way.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub scene: Scene,
    pub report: ReconcileReport,
}

impl ReconcileOutcome {
    pub fn into_scene(self) -> Scene {
        self.scene
    }
}
