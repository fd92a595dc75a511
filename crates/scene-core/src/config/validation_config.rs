use serde::{Deserialize, Serialize};

use super::defaults;

/// Integrity validator toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report malformed record shapes (pressure mismatch, zero version). Default: true.
    pub check_record_shape: bool,
    /// Check that group nesting forms a forest. Default: true.
    pub check_groups: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_record_shape: defaults::DEFAULT_CHECK_RECORD_SHAPE,
            check_groups: defaults::DEFAULT_CHECK_GROUPS,
        }
    }
}
