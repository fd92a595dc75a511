//! Test fixture loader and scene builders shared by the workspace's tests
//! and benchmarks.
//!
//! Golden scenarios live as JSON under `golden/`; the builders produce
//! consistent records with both sides of every relationship filled in.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_core::element::{
    BoundElement, Element, ElementKind, FrameData, FreedrawData, LinearData, PointBinding,
    TextData,
};
use scene_core::Scene;
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Decode a JSON array of raw records into a scene, panicking on any
/// malformed record.
pub fn scene_from_value(value: serde_json::Value) -> Scene {
    let (scene, errors) = Scene::from_json(value).unwrap_or_else(|e| panic!("bad scene: {e}"));
    assert!(errors.is_empty(), "fixture records failed to decode: {errors:?}");
    scene
}

// --- Builders ---

pub fn rect(id: &str) -> Element {
    Element::new(id, ElementKind::Rectangle).with_geometry(0.0, 0.0, 100.0, 60.0)
}

pub fn ellipse(id: &str) -> Element {
    Element::new(id, ElementKind::Ellipse).with_geometry(0.0, 0.0, 80.0, 80.0)
}

pub fn text(id: &str, content: &str) -> Element {
    Element::new(
        id,
        ElementKind::Text(TextData {
            text: content.to_string(),
            original_text: content.to_string(),
            ..TextData::default()
        }),
    )
}

pub fn arrow(id: &str) -> Element {
    Element::new(
        id,
        ElementKind::Arrow(LinearData {
            points: vec![[0.0, 0.0], [100.0, 0.0]],
            ..LinearData::default()
        }),
    )
}

pub fn frame(id: &str, name: &str) -> Element {
    Element::new(
        id,
        ElementKind::Frame(FrameData {
            name: Some(name.to_string()),
        }),
    )
    .with_geometry(0.0, 0.0, 800.0, 600.0)
}

pub fn freedraw(id: &str, points: usize) -> Element {
    Element::new(
        id,
        ElementKind::Freedraw(FreedrawData {
            points: (0..points).map(|i| [i as f64, i as f64]).collect(),
            pressures: vec![0.5; points],
            simulate_pressure: false,
            last_committed_point: None,
        }),
    )
}

/// Put `text` inside `container`, filling in both sides.
pub fn bind_text(container: &mut Element, text: &mut Element) {
    container
        .base
        .bound_elements
        .push(BoundElement::text(text.id().clone()));
    if let Some(data) = text.kind.as_text_mut() {
        data.container_id = Some(container.id().clone());
    }
}

/// Attach `arrow`'s start to `start` and end to `end`, filling in both sides.
pub fn bind_arrow(arrow: &mut Element, start: Option<&mut Element>, end: Option<&mut Element>) {
    let arrow_id = arrow.id().clone();
    let Some(linear) = arrow.kind.as_linear_mut() else {
        return;
    };
    if let Some(start) = start {
        linear.start_binding = Some(PointBinding::new(start.id().clone()));
        start.base.bound_elements.push(BoundElement::arrow(arrow_id.clone()));
    }
    if let Some(end) = end {
        linear.end_binding = Some(PointBinding::new(end.id().clone()));
        end.base.bound_elements.push(BoundElement::arrow(arrow_id));
    }
}

/// A consistent scene of `size` elements: labelled boxes joined by arrows,
/// grouped in pairs, every tenth element inside one frame. Deterministic for a
/// given seed.
pub fn generated_scene(size: usize, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records: Vec<Element> = Vec::with_capacity(size + 1);
    let board = frame("board", "Board").with_stamp(1, 0);

    let mut previous_box: Option<usize> = None;
    while records.len() + 3 <= size {
        let n = records.len();
        let mut shape = rect(&format!("box-{n}"))
            .with_stamp(rng.gen_range(1..20), rng.gen_range(0..i64::from(i32::MAX)))
            .with_groups([format!("pair-{}", n / 6)]);
        if n % 10 == 0 {
            shape = shape.in_frame("board");
        }
        let mut label = text(&format!("label-{n}"), "label")
            .with_stamp(rng.gen_range(1..20), rng.gen_range(0..i64::from(i32::MAX)));
        bind_text(&mut shape, &mut label);

        let mut link = arrow(&format!("link-{n}"))
            .with_stamp(rng.gen_range(1..20), rng.gen_range(0..i64::from(i32::MAX)));
        match previous_box {
            Some(prev) => bind_arrow(&mut link, Some(&mut records[prev]), Some(&mut shape)),
            None => bind_arrow(&mut link, None, Some(&mut shape)),
        }

        previous_box = Some(records.len());
        records.push(shape);
        records.push(label);
        records.push(link);
    }
    records.push(board);
    records.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_files_parse_as_json() {
        let mut total = 0;
        for dir in ["golden/reconcile", "golden/validation"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert!(total >= 6, "Expected golden fixtures, found {}", total);
    }

    #[test]
    fn bind_text_fills_both_sides() {
        let mut shape = rect("r1");
        let mut label = text("t1", "hi");
        bind_text(&mut shape, &mut label);
        assert_eq!(shape.base.bound_elements, vec![BoundElement::text("t1")]);
        assert_eq!(label.kind.container_id().map(|id| id.as_str()), Some("r1"));
    }

    #[test]
    fn generated_scene_is_deterministic() {
        let a = generated_scene(300, 7);
        let b = generated_scene(300, 7);
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x.stamp() == y.stamp()));
    }
}
