//! Smooth the hand-checked corridors in `tests/data` and compare against their expected paths.

use std::{env, fs, path::PathBuf};

use glam::Vec3A;
use navfunnel::{FunnelConfig, Portal, path_length, smooth_path_with_config};
use serde::{Deserialize, de::DeserializeOwned};

#[test]
fn smooth_reference_corridors() {
    let mut count = 0;
    for entry in fs::read_dir(reference_data_dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let name = path.file_stem().unwrap().to_str().unwrap().to_owned();
        println!("Testing {name}...");

        let corridor = load_json::<ReferenceCorridor>(&name);
        let config = if corridor.corner_cut {
            FunnelConfig::default()
        } else {
            FunnelConfig::default().without_corner_cut()
        };
        let portals: Vec<Portal> = corridor.portals.iter().map(ReferencePortal::to_portal).collect();
        let start = Vec3A::from_array(corridor.start);
        let end = Vec3A::from_array(corridor.end);

        let path = smooth_path_with_config(start, end, &portals, &config);
        let expected: Vec<Vec3A> = corridor.path.iter().copied().map(Vec3A::from_array).collect();
        assert_eq_path(&path, &expected, &name);
        count += 1;
    }
    assert!(count > 0, "No reference corridors found");
}

#[test]
fn smoothed_paths_are_not_longer_than_walking_portal_midpoints() {
    for name in ["straight", "right_turn", "zig_zag"] {
        let corridor = load_json::<ReferenceCorridor>(name);
        let portals: Vec<Portal> = corridor.portals.iter().map(ReferencePortal::to_portal).collect();
        let start = Vec3A::from_array(corridor.start);
        let end = Vec3A::from_array(corridor.end);

        let path = smooth_path_with_config(start, end, &portals, &FunnelConfig::default());

        let mut midpoints = vec![start];
        midpoints.extend(portals.iter().map(|portal| portal.edge().lerp(0.5)));
        midpoints.push(end);
        assert!(
            path_length(&path) <= path_length(&midpoints) + 1.0e-4,
            "{name}: smoothed path is longer than the midpoint path"
        );
    }
}

#[track_caller]
fn assert_eq_path(actual: &[Vec3A], expected: &[Vec3A], name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{name}: path length mismatch: {actual:?} vs {expected:?}"
    );
    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        assert!(
            actual.abs_diff_eq(*expected, 1.0e-4),
            "{name}: waypoint {i} mismatch: {actual} vs {expected}"
        );
    }
}

#[derive(Deserialize)]
struct ReferenceCorridor {
    start: [f32; 3],
    end: [f32; 3],
    #[serde(default = "corner_cut_default")]
    corner_cut: bool,
    portals: Vec<ReferencePortal>,
    path: Vec<[f32; 3]>,
}

fn corner_cut_default() -> bool {
    true
}

#[derive(Deserialize)]
struct ReferencePortal {
    left: [f32; 3],
    right: [f32; 3],
}

impl ReferencePortal {
    fn to_portal(&self) -> Portal {
        Portal::new(Vec3A::from_array(self.left), Vec3A::from_array(self.right))
    }
}

fn reference_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

#[track_caller]
fn load_json<T: DeserializeOwned>(name: &str) -> T {
    let test_path = reference_data_dir().join(format!("{name}.json"));
    let file = fs::read_to_string(&test_path).unwrap_or_else(|e| {
        panic!("Failed to read file: {}: {}", test_path.display(), e);
    });
    serde_json::from_str(&file).unwrap_or_else(|e| {
        panic!("Failed to parse JSON: {}: {}", test_path.display(), e);
    })
}
