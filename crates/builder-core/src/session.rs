//! The editor session: one context object holding the registry, selection,
//! camera and scene, driven by discrete host events.

use crate::camera::{Camera, CameraPose, OrbitControls};
use crate::constants::camera_default_target;
use crate::error::Result;
use crate::gizmo::{DragEdge, DragOperation, GizmoMode, GizmoState, TransformWidget};
use crate::persistence::{self, KeyValueStore, Snapshot};
use crate::pick::{self, PickOutcome, PointerSample};
use crate::registry::{InstanceId, Registry};
use crate::scene::{Light, LightKind, NodeId, NodeKind, NodeRecord, NodeRole, SceneGraph, SceneNode, Transform};
use crate::selection::{Selection, SelectionController};
use crate::vehicle::{VehicleBootstrap, VehicleType};
use glam::{Quat, Vec2, Vec3};

/// Input delivered by the host, one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
    /// Wheel notches; positive zooms out.
    Wheel(f32),
    Key(String),
    SetMode(GizmoMode),
    Delete,
    /// Seconds since the previous frame.
    FrameTick(f32),
}

/// What a [`EditorSession::load`] restored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub vehicle: Option<VehicleType>,
    pub instances: usize,
    pub ambient_nodes: usize,
    pub camera_restored: bool,
}

pub struct EditorSession {
    scene: SceneGraph,
    registry: Registry,
    selection: SelectionController,
    camera: Camera,
    orbit: OrbitControls,
    vehicle: VehicleBootstrap,
    pointer_down: Option<PointerSample>,
    last_pointer: Option<Vec2>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_widget(Box::<GizmoState>::default())
    }

    pub fn with_widget(widget: Box<dyn TransformWidget>) -> Self {
        let mut session = Self {
            scene: SceneGraph::new(),
            registry: Registry::new(),
            selection: SelectionController::new(widget),
            camera: Camera::default(),
            orbit: OrbitControls::default(),
            vehicle: VehicleBootstrap::new(),
            pointer_down: None,
            last_pointer: None,
        };
        session.add_default_lights();
        session
    }

    fn add_default_lights(&mut self) {
        let root = self.scene.root();
        self.scene.add_node(
            root,
            SceneNode::new(
                "ambient",
                NodeRole::Ambient,
                NodeKind::Light(Light {
                    kind: LightKind::Ambient,
                    color: [1.0, 1.0, 1.0],
                    intensity: 0.6,
                }),
                Transform::IDENTITY,
            ),
        );
        self.scene.add_node(
            root,
            SceneNode::new(
                "sun",
                NodeRole::Ambient,
                NodeKind::Light(Light {
                    kind: LightKind::Directional,
                    color: [1.0, 0.97, 0.9],
                    intensity: 0.8,
                }),
                Transform {
                    position: Vec3::new(5.0, 10.0, 7.5),
                    rotation: Quat::IDENTITY,
                    scale: Vec3::ONE,
                },
            ),
        );
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selected(&self) -> Option<InstanceId> {
        self.selection.selected()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn vehicle(&self) -> Option<VehicleType> {
        self.vehicle.vehicle()
    }

    /// Hard cut to `pose`; the orbit controller continues from there.
    pub fn set_camera_pose(&mut self, pose: CameraPose) {
        self.camera.pose = pose;
        self.orbit.sync_from_pose(&pose);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::PointerDown(ndc) => self.pointer_down(ndc),
            EditorEvent::PointerMove(ndc) => self.pointer_move(ndc),
            EditorEvent::PointerUp(ndc) => self.pointer_up(ndc),
            EditorEvent::Wheel(notches) => self.orbit.zoom_by(notches),
            EditorEvent::Key(key) => self.key(&key),
            EditorEvent::SetMode(mode) => self.selection.set_mode(mode),
            EditorEvent::Delete => {
                self.delete_selected();
            }
            EditorEvent::FrameTick(dt) => {
                self.orbit.update(&mut self.camera, dt);
            }
        }
    }

    fn key(&mut self, key: &str) {
        if let Some(mode) = GizmoMode::from_key(key) {
            self.selection.set_mode(mode);
            return;
        }
        if matches!(key, "Delete" | "Backspace") {
            self.delete_selected();
        }
    }

    fn pointer_down(&mut self, ndc: Vec2) {
        self.pointer_down = Some(PointerSample { ndc });
        self.last_pointer = Some(ndc);

        // Grabbing the selected instance starts a gizmo drag instead of an orbit.
        let Some(instance) = self.selection.selected().and_then(|id| self.registry.get(id)) else {
            return;
        };
        let (origin, dir) = self.camera.ray_from_ndc(ndc);
        let Some((_, t)) = pick::raycast_subtree(instance.node, origin, dir, &self.scene) else {
            return;
        };
        let Some(start) = self.scene.node(instance.node).map(|n| n.transform) else {
            return;
        };
        let gadget = self.selection.gadget_mut();
        let op = DragOperation::begin(gadget.mode(), instance.node, start, origin + dir * t, ndc);
        if gadget.begin_drag(op, &mut self.orbit) == DragEdge::Started {
            log::debug!("[drag] start {:?} ({})", instance.id, op.mode.label());
        }
    }

    fn pointer_move(&mut self, ndc: Vec2) {
        let last = self.last_pointer.replace(ndc);
        if self.selection.gadget().is_dragging() {
            self.selection
                .gadget_mut()
                .drag_to(ndc, &self.camera, &mut self.scene);
        } else if let (Some(_), Some(last)) = (self.pointer_down, last) {
            self.orbit.rotate_by(ndc - last);
        }
    }

    fn pointer_up(&mut self, ndc: Vec2) {
        self.last_pointer = None;
        self.finish_drag();
        let Some(down) = self.pointer_down.take() else {
            return;
        };
        let outcome = pick::resolve_pick(
            down,
            PointerSample { ndc },
            &self.camera,
            &self.scene,
            &self.registry,
        );
        if let PickOutcome::Hit(hit) = outcome {
            log::debug!("[pick] {:?} at {:.3}", hit.instance, hit.distance);
        }
        self.selection
            .apply_pick(outcome, &mut self.registry, &self.scene);
    }

    fn finish_drag(&mut self) {
        let edge = self.selection.gadget_mut().end_drag(&mut self.orbit);
        if edge == (DragEdge::Finished { moved: true }) {
            self.selection
                .refresh_dimensions(&mut self.registry, &self.scene);
        }
    }

    /// Insert a loaded catalog node and select it.
    ///
    /// Loads finish asynchronously, so a drag on the previous selection may
    /// still be running; it ends here, before the gadget moves.
    pub fn spawn(&mut self, catalog_ref: &str, record: &NodeRecord) -> InstanceId {
        if self.selection.gadget().is_dragging() {
            // The rest of the gesture belongs to nobody.
            self.pointer_down = None;
            self.last_pointer = None;
        }
        self.finish_drag();
        let id = self.registry.insert(&mut self.scene, catalog_ref, record);
        log::info!("[spawn] {} as {:?}", catalog_ref, id);
        self.selection.select(id, &mut self.registry, &self.scene);
        id
    }

    pub fn delete_selected(&mut self) -> Option<InstanceId> {
        self.finish_drag();
        self.selection
            .delete_selected(&mut self.registry, &mut self.scene)
    }

    pub fn bootstrap_vehicle(&mut self, vehicle: VehicleType, template: &NodeRecord) -> Result<NodeId> {
        self.vehicle.ensure(vehicle, template, &mut self.scene)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            camera: self.camera.pose,
            vehicle: self.vehicle.vehicle(),
            instances: self.registry.to_records(&self.scene),
            scene: self.scene.to_document(),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        self.snapshot().write(store)
    }

    /// Restore a saved snapshot into this (fresh) session. Never selects.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> LoadReport {
        let mut report = LoadReport {
            vehicle: persistence::read_vehicle(store),
            ..LoadReport::default()
        };
        if let (Some(saved), Some(live)) = (report.vehicle, self.vehicle.vehicle()) {
            if saved != live {
                log::warn!("[load] saved vehicle {} differs from bootstrapped {}", saved, live);
            }
        }

        for record in persistence::read_instances(store) {
            self.registry
                .insert(&mut self.scene, &record.catalog, &record.node);
            report.instances += 1;
        }

        if let Some(doc) = persistence::read_scene(store) {
            report.ambient_nodes = self.scene.restore_ambient(&doc);
        }

        if let Some(pose) = persistence::read_camera(store) {
            self.set_camera_pose(pose);
            report.camera_restored = true;
        }

        log::info!(
            "[load] vehicle={:?} instances={} ambient={} camera={}",
            report.vehicle,
            report.instances,
            report.ambient_nodes,
            report.camera_restored
        );
        report
    }

    /// Clear the store, keep the vehicle choice and start over with an empty
    /// scene. Returns the vehicle whose backdrop the caller should bootstrap.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) -> Option<VehicleType> {
        let vehicle = self.vehicle.vehicle().or_else(|| persistence::read_vehicle(store));
        persistence::reset_store(store, vehicle);

        self.finish_drag();
        self.selection.reset();
        self.scene = SceneGraph::new();
        self.registry = Registry::new();
        self.vehicle = VehicleBootstrap::new();
        self.camera.pose = CameraPose::default();
        self.orbit = OrbitControls::new(camera_default_target(), &self.camera.pose);
        self.pointer_down = None;
        self.last_pointer = None;
        self.add_default_lights();
        vehicle
    }

    pub fn selection_state(&self) -> Selection {
        self.selection.state()
    }
}
