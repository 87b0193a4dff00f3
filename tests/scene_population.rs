mod common;

use std::{f32::consts::PI, sync::Arc};

use bees_knees::{
    config::SceneConfig,
    gfx::scene::{builder::TEXT_NODE_NAME, populate, Scene},
};
use rand::{rngs::StdRng, SeedableRng};

fn populated(seed: u64) -> Scene {
    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(seed);
    populate(&mut scene, common::assets(), &SceneConfig::default(), &mut rng)
        .expect("demo text builds");
    scene
}

#[test]
fn hundred_tori_share_one_geometry_and_material() {
    for seed in [0, 1, 42, 1234, u64::MAX] {
        let scene = populated(seed);
        let tori: Vec<_> = scene
            .meshes()
            .filter(|(node, _)| node.name.starts_with("torus"))
            .map(|(_, mesh)| mesh)
            .collect();

        assert_eq!(tori.len(), 100, "seed {seed}");
        let first = tori[0];
        for torus in &tori[1..] {
            assert!(Arc::ptr_eq(&torus.geometry, &first.geometry));
            assert!(Arc::ptr_eq(&torus.material, &first.material));
        }
    }
}

#[test]
fn torus_transforms_stay_in_range() {
    let scene = populated(7);
    for (node, _) in scene.meshes().filter(|(node, _)| node.name.starts_with("torus")) {
        let t = node.transform;
        for p in [t.position.x, t.position.y, t.position.z] {
            assert!((-5.0..5.0).contains(&p), "{} position {p}", node.name);
        }
        assert!((0.0..PI).contains(&t.rotation.x));
        assert!((0.0..PI).contains(&t.rotation.y));
        assert_eq!(t.rotation.z, 0.0);
        assert!((0.0..1.0).contains(&t.scale.x));
        assert_eq!(t.scale.x, t.scale.y);
        assert_eq!(t.scale.x, t.scale.z);
    }
}

#[test]
fn same_seed_gives_same_scatter() {
    let a = populated(99);
    let b = populated(99);
    let c = populated(100);

    let transforms = |scene: &Scene| {
        scene
            .nodes()
            .iter()
            .map(|node| node.transform)
            .collect::<Vec<_>>()
    };
    assert_eq!(transforms(&a), transforms(&b));
    assert_ne!(transforms(&a), transforms(&c));
}

#[test]
fn single_text_mesh_centered_on_origin() {
    let scene = populated(3);
    let texts: Vec<_> = scene
        .meshes()
        .filter(|(node, _)| node.name == TEXT_NODE_NAME)
        .collect();
    assert_eq!(texts.len(), 1);

    let (node, mesh) = texts[0];
    assert_eq!(node.transform, Default::default());

    let bounds = mesh.geometry.data().bounding_box().expect("text has vertices");
    let center = bounds.center();
    assert!(center.x.abs() < 1e-4);
    assert!(center.y.abs() < 1e-4);
    assert!(center.z.abs() < 1e-4);
    // depth plus a bevel on each side
    assert!((bounds.size().z - 0.24).abs() < 1e-4);
    assert_eq!(scene.mesh_count(), 101);
}
