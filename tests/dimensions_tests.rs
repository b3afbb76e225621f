// Host-side tests for world bounding boxes and the dimension readout.

use builder_core::*;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scaled_box(scale: Vec3) -> NodeRecord {
    NodeRecord::group(
        "box",
        Transform::from_position_scale(Vec3::ZERO, scale),
        vec![NodeRecord::mesh(
            "body",
            Geometry::unit_cube(),
            Material::default(),
            Transform::IDENTITY,
        )],
    )
}

#[test]
fn unit_cube_scaled_reports_its_scale() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let s = Vec3::new(
            rng.gen_range(0.05..5.0),
            rng.gen_range(0.05..5.0),
            rng.gen_range(0.05..5.0),
        );
        let mut scene = SceneGraph::new();
        let node = scene.instantiate(scene.root(), &scaled_box(s), NodeRole::Instance);
        let bounds = world_aabb(&scene, node).expect("mesh bounds");
        let d = Dimensions::from_aabb(&bounds);

        for (reported, expected) in [(d.length, s.x), (d.height, s.y), (d.width, s.z)] {
            assert!(
                (reported - expected as f64).abs() <= 0.005 + 1e-6,
                "reported {reported} for {expected}"
            );
        }
    }
}

#[test]
fn cupboard_readout() {
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(
        scene.root(),
        &scaled_box(Vec3::new(1.5, 1.2, 1.0)),
        NodeRole::Instance,
    );
    let d = Dimensions::from_aabb(&world_aabb(&scene, node).expect("mesh bounds"));
    assert_eq!(d.lines(), ["length: 1.5", "height: 1.2", "width: 1"]);
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(round_to(0.125, 2), 0.13);
    assert_eq!(round_to(-0.125, 2), -0.13);
    assert_eq!(round_to(0.124, 2), 0.12);
    assert_eq!(round_to(1.0, 2), 1.0);
    assert_eq!(round_to(2.5, 0), 3.0);
}

#[test]
fn nested_transforms_compose() {
    let record = NodeRecord::group(
        "outer",
        Transform::from_position_scale(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0)),
        vec![NodeRecord::group(
            "inner",
            Transform::from_position_scale(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.5, 1.0)),
            vec![NodeRecord::mesh(
                "body",
                Geometry::unit_cube(),
                Material::default(),
                Transform::IDENTITY,
            )],
        )],
    );
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(scene.root(), &record, NodeRole::Instance);
    let bounds = world_aabb(&scene, node).expect("mesh bounds");

    assert!((bounds.center() - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5);
    assert!((bounds.size() - Vec3::new(2.0, 1.0, 2.0)).length() < 1e-5);
}

#[test]
fn rotation_grows_the_world_box() {
    let mut record = scaled_box(Vec3::new(2.0, 1.0, 1.0));
    record.transform.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(scene.root(), &record, NodeRole::Instance);
    let size = world_aabb(&scene, node).expect("mesh bounds").size();

    let expected = 3.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!((size.x - expected).abs() < 1e-5);
    assert!((size.z - expected).abs() < 1e-5);
    assert!((size.y - 1.0).abs() < 1e-5);
}

#[test]
fn triangle_mesh_bounds_use_its_vertices() {
    let record = NodeRecord::mesh(
        "ramp",
        Geometry::TriangleMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 0.5, 3.0),
            ],
            indices: Vec::new(),
        },
        Material::default(),
        Transform::IDENTITY,
    );
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(scene.root(), &record, NodeRole::Instance);
    let d = Dimensions::from_aabb(&world_aabb(&scene, node).expect("mesh bounds"));
    assert_eq!((d.length, d.height, d.width), (2.0, 0.5, 3.0));
}

#[test]
fn group_without_meshes_has_no_box() {
    let mut scene = SceneGraph::new();
    let node = scene.add_node(
        scene.root(),
        SceneNode::new("empty", NodeRole::Instance, NodeKind::Group, Transform::IDENTITY),
    );
    assert_eq!(world_aabb(&scene, node), None);
    assert_eq!(Aabb::empty().size(), Vec3::ZERO);
}

#[test]
fn hidden_panel_has_no_lines() {
    let mut panel = InfoPanel::default();
    assert!(panel.lines().is_empty());

    panel.show(
        "Bed",
        Some(Dimensions {
            length: 1.9,
            height: 0.45,
            width: 1.4,
        }),
    );
    assert_eq!(panel.lines(), vec!["length: 1.9", "height: 0.45", "width: 1.4"]);

    assert_eq!(panel.revision, 1);

    panel.hide();
    assert!(!panel.visible);
    assert!(panel.lines().is_empty());
    assert!(panel.title.is_empty());
    assert_eq!(panel.revision, 2);

    panel.hide();
    assert_eq!(panel.revision, 2, "hiding a hidden panel is not a refresh");
}
