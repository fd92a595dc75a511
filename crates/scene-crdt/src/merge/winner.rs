//! Per-id winner selection between two copies of the same record.
//!
//! The greater `(version, versionNonce)` stamp wins, tombstones included.
//! A copy that fails its structural check never wins over a sound one.
//!
//! # Examples
//!
//! ```
//! use scene_core::config::EqualStampPolicy;
//! use scene_core::models::{Decision, Side};
//! use scene_core::{Element, ElementKind};
//! use scene_crdt::merge::winner::pick;
//!
//! let local = Element::new("a", ElementKind::Rectangle).with_stamp(2, 50);
//! let remote = Element::new("a", ElementKind::Rectangle).with_stamp(2, 70).deleted();
//!
//! let resolution = pick(&local, &remote, EqualStampPolicy::PreferLocal);
//! assert_eq!(resolution.decision, Decision::Newer(Side::Remote));
//! ```

use std::cmp::Ordering;

use scene_core::config::EqualStampPolicy;
use scene_core::element::Element;
use scene_core::errors::RecordError;
use scene_core::models::{Decision, Side};

/// Outcome of comparing a local and a remote copy of one id.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub winner: Side,
    pub decision: Decision,
    /// Copies that failed `Element::check`, with the reason.
    pub rejected: Vec<(Side, RecordError)>,
}

impl Resolution {
    fn new(winner: Side, decision: Decision) -> Self {
        Self {
            winner,
            decision,
            rejected: Vec::new(),
        }
    }

    pub fn chosen<'a>(&self, local: &'a Element, remote: &'a Element) -> &'a Element {
        match self.winner {
            Side::Local => local,
            Side::Remote => remote,
        }
    }
}

pub fn pick(local: &Element, remote: &Element, policy: EqualStampPolicy) -> Resolution {
    match (local.check(), remote.check()) {
        (Ok(()), Ok(())) => by_stamp(local, remote, policy),
        (Ok(()), Err(e)) => Resolution {
            rejected: vec![(Side::Remote, e)],
            ..Resolution::new(Side::Local, Decision::Rejected(Side::Remote))
        },
        (Err(e), Ok(())) => Resolution {
            rejected: vec![(Side::Local, e)],
            ..Resolution::new(Side::Remote, Decision::Rejected(Side::Local))
        },
        // Nothing sound to take; hold on to what we had.
        (Err(local_err), Err(remote_err)) => Resolution {
            rejected: vec![(Side::Local, local_err), (Side::Remote, remote_err)],
            ..Resolution::new(Side::Local, Decision::Rejected(Side::Remote))
        },
    }
}

fn by_stamp(local: &Element, remote: &Element, policy: EqualStampPolicy) -> Resolution {
    match local.stamp().cmp(&remote.stamp()) {
        Ordering::Greater => Resolution::new(Side::Local, Decision::Newer(Side::Local)),
        Ordering::Less => Resolution::new(Side::Remote, Decision::Newer(Side::Remote)),
        Ordering::Equal if local == remote => Resolution::new(Side::Local, Decision::Identical),
        Ordering::Equal => {
            let kept = match policy {
                EqualStampPolicy::PreferLocal => Side::Local,
                EqualStampPolicy::Canonical => canonical_winner(local, remote),
            };
            Resolution::new(kept, Decision::DivergentTie(kept))
        }
    }
}

/// The copy with the greater canonical encoding. Falls back to local if
/// either copy cannot be encoded.
fn canonical_winner(local: &Element, remote: &Element) -> Side {
    match (local.canonical_json(), remote.canonical_json()) {
        (Ok(l), Ok(r)) if r > l => Side::Remote,
        _ => Side::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_core::element::ElementKind;

    fn rect(version: u64, nonce: i64) -> Element {
        Element::new("a", ElementKind::Rectangle).with_stamp(version, nonce)
    }

    #[test]
    fn higher_version_wins_over_nonce() {
        let r = pick(&rect(3, 0), &rect(2, 999), EqualStampPolicy::PreferLocal);
        assert_eq!(r.winner, Side::Local);
        assert_eq!(r.decision, Decision::Newer(Side::Local));
    }

    #[test]
    fn nonce_compares_numerically() {
        let r = pick(&rect(2, -5), &rect(2, 3), EqualStampPolicy::PreferLocal);
        assert_eq!(r.winner, Side::Remote);
    }

    #[test]
    fn identical_copies_are_identical() {
        let a = rect(4, 4);
        let r = pick(&a, &a.clone(), EqualStampPolicy::Canonical);
        assert_eq!(r.decision, Decision::Identical);
    }

    #[test]
    fn canonical_tie_is_symmetric() {
        let a = rect(4, 4).with_geometry(1.0, 0.0, 0.0, 0.0);
        let b = a.clone().with_geometry(2.0, 0.0, 0.0, 0.0);
        let ab = pick(&a, &b, EqualStampPolicy::Canonical);
        let ba = pick(&b, &a, EqualStampPolicy::Canonical);
        assert_eq!(ab.chosen(&a, &b), ba.chosen(&b, &a));
        assert!(matches!(ab.decision, Decision::DivergentTie(_)));
    }

    #[test]
    fn invalid_remote_never_wins() {
        let mut remote = rect(9, 9);
        remote.base.x = f64::INFINITY;
        let r = pick(&rect(1, 1), &remote, EqualStampPolicy::PreferLocal);
        assert_eq!(r.winner, Side::Local);
        assert_eq!(r.decision, Decision::Rejected(Side::Remote));
        assert_eq!(r.rejected.len(), 1);
    }

    #[test]
    fn invalid_local_yields_to_remote() {
        let mut local = rect(5, 5);
        local.base.height = f64::NAN;
        let r = pick(&local, &rect(1, 1), EqualStampPolicy::PreferLocal);
        assert_eq!(r.winner, Side::Remote);
        assert_eq!(r.decision, Decision::Rejected(Side::Local));
    }
}
