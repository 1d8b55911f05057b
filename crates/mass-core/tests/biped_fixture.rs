use std::path::PathBuf;

use centermass_core::{evaluate, Guide};
use centermass_model::{DVec3, MassDocument, MassRegistry, Scene, TransformSource};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("biped")
}

fn load_fixture() -> (MassDocument, Scene) {
    let dir = fixture_dir();
    let document =
        MassDocument::load(dir.join("biped.mass")).expect("fixture document should load");
    let scene = Scene::load(dir.join("scene.json")).expect("fixture scene should load");
    (document, scene)
}

#[test]
fn fixture_influences_resolve_across_namespaces() {
    let (document, scene) = load_fixture();
    let mut registry = MassRegistry::new();
    let node = document.instantiate(&mut registry, &scene);

    assert_eq!(
        registry.section_names(node),
        vec!["torso", "chest", "head", "arms", "legs", "sword"]
    );
    assert_eq!(
        registry.section_influences(node, "torso"),
        vec!["hero:hips", "hero:spine"]
    );
    // `rig:tail` has no counterpart in the scene.
    assert_eq!(registry.section_influences(node, "legs").len(), 6);
    assert!(!registry.section_considered(node, "sword"));
    assert_eq!(registry.settings(node).unwrap().sphere_size, 6.0);
}

#[test]
fn fixture_center_of_mass_is_stable() {
    let (document, scene) = load_fixture();
    let mut registry = MassRegistry::new();
    let id = document.instantiate(&mut registry, &scene);
    let node = registry.node(id).unwrap();

    let evaluation = evaluate(node, &scene).expect("calculation is enabled");
    assert_eq!(evaluation.contributions.len(), 5);

    // The arms and legs are mirrored, so everything sits on x = 0.
    assert!(evaluation.center.x.abs() < 1e-9);

    // The mass-ordered lerp lands on the mass-weighted mean of section centers.
    let (weighted, total) = evaluation.contributions.iter().fold(
        (DVec3::ZERO, 0.0),
        |(sum, total), c| (sum + c.center * c.mass, total + c.mass),
    );
    let mean = weighted / total;
    assert!((evaluation.center - mean).length() < 1e-9);
    assert!((evaluation.center.y - 3585.0 / 31.7).abs() < 1e-9);

    let guide = Guide::build(&node.settings, &evaluation, scene.up_axis);
    assert!(guide.debug_lines.is_empty());
    assert_eq!(guide.sphere.unwrap().radius, 6.0);
    let line = guide.vertical_line.unwrap();
    assert_eq!(line.start.y, 0.0);
    assert!((line.end.y - evaluation.center.y * 2.0).abs() < 1e-12);
}

#[test]
fn fixture_round_trip_keeps_sections() {
    let (document, scene) = load_fixture();
    let mut registry = MassRegistry::new();
    let first = document.instantiate(&mut registry, &scene);
    let saved = MassDocument::from_node(&registry, first).unwrap();

    let second = MassDocument::from_json(&saved.to_json().unwrap())
        .unwrap()
        .instantiate(&mut registry, &scene);
    let resaved = MassDocument::from_node(&registry, second).unwrap();

    assert_eq!(resaved.sections, saved.sections);
    assert_eq!(resaved.settings, saved.settings);
    assert_eq!(resaved.name, "biped1");

    for section in &resaved.sections {
        for influence in &section.influences {
            assert!(scene.contains(influence), "{influence} should be a live transform");
        }
    }
}
