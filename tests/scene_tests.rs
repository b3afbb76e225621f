// Host-side tests for the scene graph, the whole-scene document, the
// catalog loader and the vehicle bootstrap.

use builder_core::*;
use glam::Vec3;

fn names(scene: &SceneGraph, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| scene.node(*id))
        .map(|n| n.name.clone())
        .collect()
}

#[test]
fn descendants_are_preorder() {
    let record = NodeRecord::group(
        "a",
        Transform::IDENTITY,
        vec![
            NodeRecord::group(
                "b",
                Transform::IDENTITY,
                vec![NodeRecord::group("c", Transform::IDENTITY, vec![])],
            ),
            NodeRecord::group("d", Transform::IDENTITY, vec![]),
        ],
    );
    let mut scene = SceneGraph::new();
    let a = scene.instantiate(scene.root(), &record, NodeRole::Instance);
    assert_eq!(names(&scene, &scene.descendants(a)), vec!["a", "b", "c", "d"]);
    assert_eq!(scene.to_record(a), Some(record));
}

#[test]
fn remove_subtree_drops_descendants_and_spares_root() {
    let item = ProceduralCatalog::build("cupboard").expect("catalog item");
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(scene.root(), &item, NodeRole::Instance);
    assert_eq!(scene.len(), 3);

    let removed = scene.remove_subtree(node);
    assert_eq!(removed.len(), 2);
    assert_eq!(scene.len(), 1);
    assert!(scene.children(scene.root()).is_empty());

    assert!(scene.remove_subtree(scene.root()).is_empty());
    assert!(scene.contains(scene.root()));
}

#[test]
fn insert_child_at_respects_index() {
    let mut scene = SceneGraph::new();
    let root = scene.root();
    let group =
        |name: &str| SceneNode::new(name, NodeRole::Ambient, NodeKind::Group, Transform::IDENTITY);
    scene.add_node(root, group("x"));
    scene.add_node(root, group("y"));
    scene.insert_child_at(root, 0, group("first"));
    scene.insert_child_at(root, 99, group("last"));

    assert_eq!(
        names(&scene, scene.children(root)),
        vec!["first", "x", "y", "last"]
    );
}

#[test]
fn registry_maps_every_descendant_to_its_instance() {
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let item = ProceduralCatalog::build("bed").expect("catalog item");
    let id = registry.insert(&mut scene, "bed", &item);
    let root = registry.get(id).expect("registered").node;

    for node in scene.descendants(root) {
        assert_eq!(registry.owner_of(node), Some(id));
        assert_eq!(scene.node(node).map(|n| n.role), Some(NodeRole::Instance));
    }

    let removed = registry.remove(id, &mut scene).expect("was registered");
    assert_eq!(removed.catalog_ref, "bed");
    assert!(registry.is_empty());
    assert_eq!(registry.owner_of(root), None);
    assert!(!scene.contains(root));
    assert!(registry.remove(id, &mut scene).is_none());
}

#[test]
fn instance_ids_are_not_reused() {
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let item = ProceduralCatalog::build("sink").expect("catalog item");
    let a = registry.insert(&mut scene, "sink", &item);
    registry.remove(a, &mut scene);
    let b = registry.insert(&mut scene, "sink", &item);
    assert_ne!(a, b);
}

#[test]
fn document_pools_shared_geometry_and_materials() {
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let item = ProceduralCatalog::build("cupboard").expect("catalog item");
    registry.insert(&mut scene, "cupboard", &item);
    registry.insert(&mut scene, "cupboard", &item);

    let doc = scene.to_document();
    assert_eq!(doc.geometries.len(), 1);
    assert_eq!(doc.materials.len(), 1);
    assert_eq!(doc.object.children.len(), 2);
    assert_eq!(doc.metadata.version, SCENE_DOCUMENT_VERSION);
    assert!(doc.object.children.iter().all(|c| c.role == NodeRole::Instance));

    let json = serde_json::to_string(&doc).expect("serialize");
    let back: SceneDocument = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, doc);
    assert_eq!(back.resolve(&back.object.children[0]), Some(item));
}

#[test]
fn dangling_document_references_are_dropped() {
    let doc = SceneDocument {
        metadata: DocumentMetadata {
            version: SCENE_DOCUMENT_VERSION,
            generator: SCENE_DOCUMENT_GENERATOR.to_string(),
        },
        geometries: Vec::new(),
        materials: Vec::new(),
        object: DocumentNode {
            name: "Scene".into(),
            role: NodeRole::Ambient,
            object: DocumentObject::Group,
            transform: Transform::IDENTITY,
            children: vec![DocumentNode {
                name: "ghost".into(),
                role: NodeRole::Ambient,
                object: DocumentObject::Mesh {
                    geometry: 3,
                    material: 0,
                },
                transform: Transform::IDENTITY,
                children: Vec::new(),
            }],
        },
    };
    let mut scene = SceneGraph::new();
    assert_eq!(scene.restore_ambient(&doc), 0);
    assert!(scene.children(scene.root()).is_empty());
}

#[test]
fn restore_ambient_leaves_backdrop_and_instances_alone() {
    let mut scene = SceneGraph::new();
    let mut registry = Registry::new();
    let mut bootstrap = VehicleBootstrap::new();
    let backdrop = bootstrap
        .ensure(
            VehicleType::Sprinter,
            &VehicleType::Sprinter.backdrop_template(),
            &mut scene,
        )
        .expect("bootstrap");
    let id = registry.insert(
        &mut scene,
        "fridge",
        &ProceduralCatalog::build("fridge").expect("catalog item"),
    );

    let mut lit = SceneGraph::new();
    lit.add_node(
        lit.root(),
        SceneNode::new(
            "sun",
            NodeRole::Ambient,
            NodeKind::Light(Light {
                kind: LightKind::Directional,
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            }),
            Transform::IDENTITY,
        ),
    );
    assert_eq!(scene.restore_ambient(&lit.to_document()), 1);

    let children = scene.children(scene.root()).to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(names(&scene, &children[..1]), vec!["sun"]);
    assert_eq!(children[1], backdrop);
    assert_eq!(Some(children[2]), registry.get(id).map(|i| i.node));
}

#[test]
fn vehicle_bootstrap_happens_once() {
    let mut scene = SceneGraph::new();
    let mut bootstrap = VehicleBootstrap::new();
    let template = VehicleType::Transit.backdrop_template();

    let first = bootstrap
        .ensure(VehicleType::Transit, &template, &mut scene)
        .expect("first bootstrap");
    let again = bootstrap
        .ensure(VehicleType::Transit, &template, &mut scene)
        .expect("same vehicle");
    assert_eq!(first, again);
    assert_eq!(scene.children(scene.root()).len(), 1);

    let err = bootstrap
        .ensure(
            VehicleType::Sprinter,
            &VehicleType::Sprinter.backdrop_template(),
            &mut scene,
        )
        .unwrap_err();
    assert!(matches!(err, EditorError::VehicleAlreadyChosen { .. }));
    assert_eq!(bootstrap.vehicle(), Some(VehicleType::Transit));
    assert_eq!(scene.node(first).map(|n| n.role), Some(NodeRole::Backdrop));
}

#[test]
fn backdrop_floor_sits_below_the_origin() {
    let mut scene = SceneGraph::new();
    let node = scene.instantiate(
        scene.root(),
        &VehicleType::Sprinter.backdrop_template(),
        NodeRole::Backdrop,
    );
    let bounds = world_aabb(&scene, node).expect("backdrop meshes");
    let cargo = VehicleType::Sprinter.cargo_size();
    assert!(bounds.min.y < 0.0);
    assert!((bounds.max.y - cargo.y).abs() < 1e-5);
    assert!(bounds.size().x >= cargo.x);
}

#[test]
fn vehicle_names_parse_and_serialize() {
    for v in VehicleType::ALL {
        assert_eq!(VehicleType::from_json(&v.to_json()).expect("round trip"), v);
        assert_eq!(v.name().parse::<VehicleType>().expect("name"), v);
        assert_eq!(VehicleType::from_asset_id(&v.asset_id()), Some(v));
    }
    assert_eq!("Sprinter".parse::<VehicleType>().ok(), Some(VehicleType::Sprinter));
    assert!(VehicleType::from_json("\"camper\"").is_err());
    assert!(VehicleType::from_json("sprinter").is_err());
}

#[test]
fn catalog_loader_resolves_items_and_vehicles() {
    let loader = ProceduralCatalog;
    let cupboard = pollster::block_on(loader.load("cupboard")).expect("cupboard");
    assert_eq!(cupboard.name, "Cupboard");
    assert_eq!(cupboard.transform.scale, Vec3::new(1.5, 1.2, 1.0));
    assert!((cupboard.transform.position.y - 0.6).abs() < 1e-6);

    let van = pollster::block_on(loader.load("vehicle/transit")).expect("transit");
    assert_eq!(van, VehicleType::Transit.backdrop_template());

    match pollster::block_on(loader.load("jacuzzi")) {
        Err(EditorError::UnknownAsset(id)) => assert_eq!(id, "jacuzzi"),
        other => panic!("expected UnknownAsset, got {other:?}"),
    }
    assert!(matches!(
        pollster::block_on(loader.load("vehicle/camper")),
        Err(EditorError::AssetLoad { .. })
    ));
}

#[test]
fn every_catalog_item_rests_on_the_floor() {
    for item in CATALOG {
        let mut scene = SceneGraph::new();
        let node = scene.instantiate(scene.root(), &item.template(), NodeRole::Instance);
        let bounds = world_aabb(&scene, node).expect("item meshes");
        assert!(bounds.min.y.abs() < 1e-5, "{} floats", item.id);
        assert!(find_item(item.id).is_some());
    }
}
