use crate::models::ReconcileOutcome;
use crate::scene::Scene;

/// Two-way merge of element collections.
pub trait IReconciler: Send + Sync {
    /// Merge `remote` into `local`. Neither input is modified; the outcome
    /// owns fresh copies of every winning record.
    fn reconcile(&self, local: &Scene, remote: &Scene) -> ReconcileOutcome;
}
