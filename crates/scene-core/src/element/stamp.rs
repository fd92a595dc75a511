//! Version stamps: the authoritative ordering of record versions.
//!
//! # Examples
//!
//! ```
//! use scene_core::VersionStamp;
//!
//! let a = VersionStamp::new(2, 50);
//! let b = VersionStamp::new(2, 70);
//! assert!(b > a); // equal version, higher nonce wins
//! assert!(VersionStamp::new(3, 0) > b);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// `(version, versionNonce)` compared lexicographically: version first,
/// nonce as a numeric tie-break.
///
/// Field order matters: the derived `Ord` compares `version` before `nonce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionStamp {
    pub version: u64,
    pub nonce: i64,
}

impl VersionStamp {
    pub fn new(version: u64, nonce: i64) -> Self {
        Self { version, nonce }
    }

    /// Strictly newer than `other`.
    pub fn supersedes(&self, other: &Self) -> bool {
        self > other
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}#{}", self.version, self.nonce)
    }
}
