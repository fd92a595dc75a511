pub mod reconcile_report;
pub mod violation;

pub use reconcile_report::{Decision, MergeDecision, ReconcileOutcome, ReconcileReport, Side};
pub use violation::{Invariant, Repair, Violation};
