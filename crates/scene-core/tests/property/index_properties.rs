use std::collections::HashMap;

use proptest::prelude::*;
use scene_core::element::{Element, ElementKind};
use scene_core::{SceneIndex, VersionStamp};

fn records(raw: &[(u8, u64, i64)]) -> Vec<Element> {
    raw.iter()
        .map(|&(id, v, n)| Element::new(format!("el-{id}"), ElementKind::Diamond).with_stamp(v, n))
        .collect()
}

proptest! {
    #[test]
    fn index_keeps_the_greatest_stamp_per_id(
        raw in prop::collection::vec((0u8..6, 1u64..5, -2i64..3), 0..20)
    ) {
        let records = records(&raw);
        let index = SceneIndex::build(&records);

        let mut best: HashMap<String, VersionStamp> = HashMap::new();
        for el in &records {
            let entry = best.entry(el.id().to_string()).or_insert(el.stamp());
            *entry = (*entry).max(el.stamp());
        }
        prop_assert_eq!(index.len(), best.len());
        for (id, stamp) in &best {
            prop_assert_eq!(index.get(id).map(Element::stamp), Some(*stamp));
        }
        prop_assert_eq!(index.duplicates().len(), records.len() - best.len());
    }

    #[test]
    fn index_keeps_first_appearance_order(
        raw in prop::collection::vec((0u8..6, 1u64..5, -2i64..3), 0..20)
    ) {
        let records = records(&raw);
        let index = SceneIndex::build(&records);

        let mut expected: Vec<&str> = Vec::new();
        for el in &records {
            if !expected.contains(&el.id().as_str()) {
                expected.push(el.id().as_str());
            }
        }
        let ids: Vec<&str> = index.ids().map(|id| id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn stamp_order_is_version_then_nonce(a in any::<(u64, i64)>(), b in any::<(u64, i64)>()) {
        let (x, y) = (VersionStamp::new(a.0, a.1), VersionStamp::new(b.0, b.1));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }
}
