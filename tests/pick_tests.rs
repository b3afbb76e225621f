// Host-side tests for click/drag disambiguation and instance picking.

use builder_core::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn front_camera() -> Camera {
    Camera {
        pose: CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO),
        ..Camera::default()
    }
}

fn unit_box(name: &str, at: Vec3) -> NodeRecord {
    NodeRecord::group(
        name,
        Transform::from_position_scale(at, Vec3::ONE),
        vec![NodeRecord::mesh(
            "body",
            Geometry::unit_cube(),
            Material::default(),
            Transform::IDENTITY,
        )],
    )
}

fn ndc_of(camera: &Camera, p: Vec3) -> Vec2 {
    let ndc = camera.project(p).expect("point in front of the camera");
    Vec2::new(ndc.x, ndc.y)
}

#[test]
fn moved_pointer_is_never_a_click() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    registry.insert(&mut scene, "box", &unit_box("box", Vec3::ZERO));

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let down = PointerSample::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let up = PointerSample::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        if down == up {
            continue;
        }
        let outcome = resolve_pick(down, up, &camera, &scene, &registry);
        assert_eq!(outcome, PickOutcome::NotAClick);
    }
}

#[test]
fn tiny_movement_still_counts_as_drag() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    registry.insert(&mut scene, "box", &unit_box("box", Vec3::ZERO));

    let down = PointerSample::new(0.0, 0.0);
    let up = PointerSample::new(f32::EPSILON, 0.0);
    assert_eq!(
        resolve_pick(down, up, &camera, &scene, &registry),
        PickOutcome::NotAClick
    );
}

#[test]
fn stationary_click_on_empty_registry_misses() {
    let camera = front_camera();
    let scene = SceneGraph::new();
    let registry = Registry::new();
    let p = PointerSample::new(0.0, 0.0);
    assert_eq!(resolve_pick(p, p, &camera, &scene, &registry), PickOutcome::Miss);
}

#[test]
fn stationary_click_on_box_hits_its_instance() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let id = registry.insert(&mut scene, "box", &unit_box("box", Vec3::ZERO));

    let p = PointerSample::new(0.0, 0.0);
    match resolve_pick(p, p, &camera, &scene, &registry) {
        PickOutcome::Hit(hit) => {
            assert_eq!(hit.instance, id);
            // Front face sits at z = 0.5, camera at z = 10.
            assert!((hit.distance - 9.5).abs() < 1e-4, "distance {}", hit.distance);
            assert_eq!(registry.owner_of(hit.node), Some(id));
        }
        other => panic!("expected a hit, got {other:?}"),
    }
}

#[test]
fn click_beside_box_misses() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    registry.insert(&mut scene, "box", &unit_box("box", Vec3::ZERO));

    let p = PointerSample::new(0.9, 0.9);
    assert_eq!(resolve_pick(p, p, &camera, &scene, &registry), PickOutcome::Miss);
}

#[test]
fn nearest_instance_wins() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let far = registry.insert(&mut scene, "far", &unit_box("far", Vec3::new(0.0, 0.0, -3.0)));
    let near = registry.insert(&mut scene, "near", &unit_box("near", Vec3::new(0.0, 0.0, 2.0)));

    let p = PointerSample::new(0.0, 0.0);
    let PickOutcome::Hit(hit) = resolve_pick(p, p, &camera, &scene, &registry) else {
        panic!("expected a hit");
    };
    assert_eq!(hit.instance, near);
    assert_ne!(hit.instance, far);
}

#[test]
fn hit_on_nested_mesh_resolves_to_owning_instance() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let record = NodeRecord::group(
        "shelf",
        Transform::IDENTITY,
        vec![NodeRecord::group(
            "frame",
            Transform::from_position_scale(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE),
            vec![NodeRecord::mesh(
                "board",
                Geometry::unit_cube(),
                Material::default(),
                Transform::IDENTITY,
            )],
        )],
    );
    let id = registry.insert(&mut scene, "shelf", &record);
    let root = registry.get(id).map(|i| i.node).expect("registered");

    let ndc = ndc_of(&camera, Vec3::new(0.0, 1.0, 0.0));
    let p = PointerSample { ndc };
    let PickOutcome::Hit(hit) = resolve_pick(p, p, &camera, &scene, &registry) else {
        panic!("expected a hit");
    };
    assert_eq!(hit.instance, id);
    assert_ne!(hit.node, root, "the mesh two levels down is what the ray meets");
}

#[test]
fn backdrop_and_lights_are_not_pickable() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    registry.insert(&mut scene, "box", &unit_box("box", Vec3::new(20.0, 0.0, 0.0)));
    let mut bootstrap = VehicleBootstrap::new();
    bootstrap
        .ensure(
            VehicleType::Sprinter,
            &VehicleType::Sprinter.backdrop_template(),
            &mut scene,
        )
        .expect("first bootstrap succeeds");

    let p = PointerSample::new(0.0, 0.0);
    assert_eq!(resolve_pick(p, p, &camera, &scene, &registry), PickOutcome::Miss);
}

#[test]
fn coincident_instances_resolve_to_the_earlier_one() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let first = registry.insert(&mut scene, "a", &unit_box("a", Vec3::ZERO));
    registry.insert(&mut scene, "b", &unit_box("b", Vec3::ZERO));

    let p = PointerSample::new(0.0, 0.0);
    let PickOutcome::Hit(hit) = resolve_pick(p, p, &camera, &scene, &registry) else {
        panic!("expected a hit");
    };
    assert_eq!(hit.instance, first);
}

#[test]
fn meshes_outside_the_registry_table_are_not_picked() {
    let camera = front_camera();
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let id = registry.insert(&mut scene, "far", &unit_box("far", Vec3::new(0.0, 0.0, -3.0)));
    // Instance-tagged but never registered, and nearer to the camera.
    scene.instantiate(
        scene.root(),
        &unit_box("stray", Vec3::new(0.0, 0.0, 2.0)),
        NodeRole::Instance,
    );

    let p = PointerSample::new(0.0, 0.0);
    let PickOutcome::Hit(hit) = resolve_pick(p, p, &camera, &scene, &registry) else {
        panic!("expected a hit");
    };
    assert_eq!(hit.instance, id);
    assert!((hit.distance - 12.5).abs() < 1e-4, "distance {}", hit.distance);
}

#[test]
fn ray_triangle_front_and_back() {
    let tri = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let t = ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &tri);
    assert!(matches!(t, Some(t) if (t - 5.0).abs() < 1e-6));

    // No back-face culling.
    let t = ray_triangle(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &tri);
    assert!(t.is_some());

    // Behind the origin.
    assert!(ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &tri).is_none());
    // Parallel.
    assert!(ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::X, &tri).is_none());
}
