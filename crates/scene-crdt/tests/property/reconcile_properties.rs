use proptest::prelude::*;
use scene_core::config::{EqualStampPolicy, ReconcileConfig};
use scene_core::element::Element;
use scene_core::Scene;
use scene_crdt::{reconcile, Reconciler};
use test_fixtures::{generated_scene, rect};

type Entry = (u8, u64, i64);

/// A record whose content is a pure function of its id and stamp, so equal
/// stamps always mean equal records.
fn record(id: u8, version: u64, nonce: i64) -> Element {
    let mut el = rect(&format!("el-{id}")).with_stamp(version, nonce);
    el.base.seed = 1;
    el.base.updated = 0;
    el.base.x = (version as f64) * 10.0 + nonce as f64;
    el.base.is_deleted = (version as i64 + nonce).rem_euclid(3) == 0;
    el
}

fn scene_of(entries: &[Entry]) -> Scene {
    entries.iter().map(|&(id, v, n)| record(id, v, n)).collect()
}

fn entries() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((0u8..8, 1u64..6, -3i64..4), 0..12)
}

fn free_scene() -> impl Strategy<Value = Scene> {
    prop::collection::vec((0u8..6, 1u64..4, -1i64..2, any::<bool>(), -5i32..5), 0..10).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(id, v, n, deleted, x)| {
                    let mut el = record(id, v, n);
                    el.base.is_deleted = deleted;
                    el.base.x = f64::from(x);
                    el
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn merging_a_scene_with_itself_changes_nothing(a in entries()) {
        let a = scene_of(&a);
        let merged = reconcile(&a, &a).scene;
        prop_assert!(merged.same_order(&a));
    }

    #[test]
    fn generated_scene_merged_with_itself_is_unchanged(size in 3usize..150, seed in any::<u64>()) {
        let a = generated_scene(size, seed);
        let outcome = reconcile(&a, &a);
        prop_assert!(outcome.scene.same_order(&a));
        prop_assert!(outcome.report.is_clean());
    }

    #[test]
    fn merge_is_commutative(a in entries(), b in entries()) {
        let (a, b) = (scene_of(&a), scene_of(&b));
        prop_assert_eq!(reconcile(&a, &b).scene, reconcile(&b, &a).scene);
    }

    #[test]
    fn merge_is_associative(a in entries(), b in entries(), c in entries()) {
        let (a, b, c) = (scene_of(&a), scene_of(&b), scene_of(&c));
        let left = reconcile(&reconcile(&a, &b).scene, &c).scene;
        let right = reconcile(&a, &reconcile(&b, &c).scene).scene;
        prop_assert_eq!(left, right);
    }

    #[test]
    fn canonical_policy_commutes_on_divergent_ties(a in free_scene(), b in free_scene()) {
        let reconciler = Reconciler::new(ReconcileConfig {
            equal_stamp_policy: EqualStampPolicy::Canonical,
            ..ReconcileConfig::default()
        });
        prop_assert_eq!(reconciler.reconcile(&a, &b).scene, reconciler.reconcile(&b, &a).scene);
    }

    #[test]
    fn greater_stamp_always_wins(a in entries(), b in entries()) {
        let (a, b) = (scene_of(&a), scene_of(&b));
        let merged = reconcile(&a, &b).scene;
        for ours in a.iter() {
            let id = ours.id().as_str();
            let Some(theirs) = b.get(id) else { continue };
            let expected = if ours.stamp() >= theirs.stamp() { ours } else { theirs };
            prop_assert_eq!(merged.get(id), Some(expected));
        }
    }

    #[test]
    fn tombstone_outlives_older_live_copies(
        version in 2u64..50,
        nonce in any::<i64>(),
        older in 1u64..50,
        older_nonce in any::<i64>(),
    ) {
        let older = older.min(version - 1);
        let tombstone = rect("shape").with_stamp(version, nonce).deleted();
        let mut live = tombstone.clone().with_stamp(older, older_nonce);
        live.base.is_deleted = false;

        let (a, b): (Scene, Scene) = ([tombstone].into_iter().collect(), [live].into_iter().collect());
        prop_assert!(reconcile(&a, &b).scene.get("shape").is_some_and(Element::is_deleted));
        prop_assert!(reconcile(&b, &a).scene.get("shape").is_some_and(Element::is_deleted));
    }

    #[test]
    fn remote_deletions_leave_a_consistent_scene(
        size in 6usize..120,
        seed in any::<u64>(),
        mask in prop::collection::vec(any::<bool>(), 120),
    ) {
        let local = generated_scene(size, seed);
        let remote: Scene = local
            .iter()
            .zip(&mask)
            .map(|(el, &delete)| {
                let mut el = el.clone();
                if delete {
                    el.mark_deleted();
                }
                el
            })
            .collect();

        let merged = reconcile(&local, &remote).scene;
        let violations = scene_validation::validate(&merged);
        prop_assert!(violations.is_empty(), "{:?}", violations);
        for (el, &delete) in local.iter().zip(&mask) {
            let kept = merged.get(el.id().as_str());
            prop_assert_eq!(kept.map(Element::is_deleted), Some(delete));
        }
    }
}
