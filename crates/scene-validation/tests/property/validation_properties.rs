use proptest::prelude::*;
use scene_core::models::Repair;
use scene_core::Scene;
use scene_validation::IntegrityValidator;
use test_fixtures::{generated_scene, rect};

fn grouped_scene(lists: &[Vec<u8>]) -> Scene {
    lists
        .iter()
        .enumerate()
        .map(|(i, groups)| {
            rect(&format!("r{i}")).with_groups(groups.iter().map(|g| format!("g{g}")))
        })
        .collect()
}

proptest! {
    #[test]
    fn generated_scenes_have_no_violations(size in 3usize..300, seed in any::<u64>()) {
        let scene = generated_scene(size, seed);
        let violations = IntegrityValidator::default().validate_scene(&scene);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn validation_is_deterministic(size in 3usize..120, seed in any::<u64>()) {
        let scene = generated_scene(size, seed);
        let validator = IntegrityValidator::default();
        prop_assert_eq!(validator.validate_scene(&scene), validator.validate_scene(&scene));
    }

    #[test]
    fn group_repairs_target_scene_members(
        lists in prop::collection::vec(prop::collection::vec(0u8..5, 0..5), 1..12)
    ) {
        let scene = grouped_scene(&lists);
        for violation in IntegrityValidator::default().validate_scene(&scene) {
            match &violation.repair {
                Repair::TruncateGroups { element, keep } => {
                    let len = scene.get(element.as_str()).map(|el| el.base.group_ids.len());
                    prop_assert!(len.is_some_and(|len| *keep >= 1 && *keep < len));
                }
                Repair::DedupeGroups { element } => {
                    prop_assert!(scene.contains(element.as_str()));
                }
                other => prop_assert!(false, "unexpected repair {:?}", other),
            }
        }
    }

    #[test]
    fn group_violations_do_not_depend_on_order(
        lists in prop::collection::vec(prop::collection::vec(0u8..4, 0..4), 1..10)
    ) {
        let forward = grouped_scene(&lists);
        let reversed: Scene = forward.iter().rev().cloned().collect();
        let validator = IntegrityValidator::default();

        let mut a: Vec<String> = validator
            .validate_scene(&forward)
            .into_iter()
            .map(|v| format!("{:?}", v.repair))
            .collect();
        let mut b: Vec<String> = validator
            .validate_scene(&reversed)
            .into_iter()
            .map(|v| format!("{:?}", v.repair))
            .collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }
}
