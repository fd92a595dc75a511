//! Configuration for scene reconciliation.
//!
//! # Examples
//!
//! ```
//! use scene_core::config::{EqualStampPolicy, ReconcileConfig};
//!
//! let config = ReconcileConfig::default();
//! assert!(config.prune_dangling);
//! assert_eq!(config.equal_stamp_policy, EqualStampPolicy::PreferLocal);
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;

/// What to do when two records share an identical `(version, versionNonce)`
/// stamp but differ in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualStampPolicy {
    /// Keep the local record. Matches the classic "either is acceptable" rule
    /// but lets peers that merged in different orders keep different copies.
    #[default]
    PreferLocal,
    /// Keep the record whose canonical JSON encoding sorts last, so every
    /// peer picks the same copy regardless of merge order.
    Canonical,
}

impl std::str::FromStr for EqualStampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefer_local" | "local" => Ok(Self::PreferLocal),
            "canonical" => Ok(Self::Canonical),
            other => Err(format!("unknown equal stamp policy `{other}`")),
        }
    }
}

/// Reconciler behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Clear dangling bindings, containers and frames after merging. Default: true.
    pub prune_dangling: bool,
    /// Tie-break for identical stamps with divergent content. Default: prefer_local.
    pub equal_stamp_policy: EqualStampPolicy,
    /// Upper bound on validate/repair passes during self-heal. Default: 64.
    pub max_repair_passes: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            prune_dangling: defaults::DEFAULT_PRUNE_DANGLING,
            equal_stamp_policy: EqualStampPolicy::default(),
            max_repair_passes: defaults::DEFAULT_MAX_REPAIR_PASSES,
        }
    }
}
