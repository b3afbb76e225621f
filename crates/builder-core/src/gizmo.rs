//! Manipulation gadget: adapter around the transform widget, plus the drag
//! math applied to the attached node.

use crate::camera::{Camera, OrbitControls};
use crate::constants::{DRAG_MIN_SCALE, DRAG_ROTATE_GAIN, DRAG_SCALE_GAIN};
use crate::scene::{NodeId, SceneGraph, Transform};
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    #[inline]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(GizmoMode::Translate),
            "e" | "E" => Some(GizmoMode::Rotate),
            "r" | "R" => Some(GizmoMode::Scale),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GizmoMode::Translate => "translate",
            GizmoMode::Rotate => "rotate",
            GizmoMode::Scale => "scale",
        }
    }
}

/// The on-screen widget the adapter drives.
pub trait TransformWidget {
    fn attach(&mut self, node: NodeId);
    fn detach(&mut self);
    fn set_mode(&mut self, mode: GizmoMode);
}

/// Headless widget: records what the host should draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GizmoState {
    pub target: Option<NodeId>,
    pub mode: GizmoMode,
    pub visible: bool,
}

impl TransformWidget for GizmoState {
    fn attach(&mut self, node: NodeId) {
        self.target = Some(node);
        self.visible = true;
    }

    fn detach(&mut self) {
        self.target = None;
        self.visible = false;
    }

    fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEdge {
    Started,
    /// `moved` is false when the pointer came back up without moving the node.
    Finished { moved: bool },
    Unchanged,
}

/// An in-progress drag on the attached node.
#[derive(Clone, Copy, Debug)]
pub struct DragOperation {
    pub mode: GizmoMode,
    pub node: NodeId,
    start_ndc: Vec2,
    start: Transform,
    plane_y: f32,
    grab_offset: Vec3,
    moved: bool,
}

impl DragOperation {
    /// `grab_point` is where the pointer ray met the node, in world space.
    pub fn begin(mode: GizmoMode, node: NodeId, start: Transform, grab_point: Vec3, ndc: Vec2) -> Self {
        Self {
            mode,
            node,
            start_ndc: ndc,
            start,
            plane_y: grab_point.y,
            grab_offset: grab_point - start.position,
            moved: false,
        }
    }

    /// Transform for the pointer at `ndc`, or `None` when the pointer ray
    /// misses the drag plane.
    pub fn transform_at(&self, ndc: Vec2, camera: &Camera) -> Option<Transform> {
        let delta = ndc - self.start_ndc;
        let mut t = self.start;
        match self.mode {
            GizmoMode::Translate => {
                let (ro, rd) = camera.ray_from_ndc(ndc);
                if rd.y.abs() <= 1e-6 {
                    return None;
                }
                let s = (self.plane_y - ro.y) / rd.y;
                if s < 0.0 {
                    return None;
                }
                let hit = ro + rd * s;
                t.position = hit - self.grab_offset;
            }
            GizmoMode::Rotate => {
                t.rotation = (Quat::from_rotation_y(delta.x * DRAG_ROTATE_GAIN) * self.start.rotation)
                    .normalize();
            }
            GizmoMode::Scale => {
                let factor = (delta.y * DRAG_SCALE_GAIN).exp();
                t.scale = (self.start.scale * factor).max(Vec3::splat(DRAG_MIN_SCALE));
            }
        }
        Some(t)
    }
}

/// Owns the widget and keeps attach/mode/drag bookkeeping consistent.
///
/// A mode set while nothing is attached is kept and applied on the next attach.
pub struct GadgetAdapter {
    widget: Box<dyn TransformWidget>,
    attached: Option<NodeId>,
    mode: GizmoMode,
    drag: Option<DragOperation>,
}

impl Default for GadgetAdapter {
    fn default() -> Self {
        Self::new(Box::<GizmoState>::default())
    }
}

impl GadgetAdapter {
    pub fn new(widget: Box<dyn TransformWidget>) -> Self {
        Self {
            widget,
            attached: None,
            mode: GizmoMode::default(),
            drag: None,
        }
    }

    pub fn attached(&self) -> Option<NodeId> {
        self.attached
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Attach to `node`. Repeating the current target is a no-op.
    pub fn attach(&mut self, node: NodeId) {
        if self.attached == Some(node) {
            return;
        }
        if self.attached.is_some() {
            self.widget.detach();
        }
        self.widget.attach(node);
        self.widget.set_mode(self.mode);
        self.attached = Some(node);
        log::debug!("[gizmo] attached to {:?} ({})", node, self.mode.label());
    }

    /// Drop the widget target. Any running drag must be ended first.
    pub fn detach(&mut self) {
        if self.attached.take().is_some() {
            self.widget.detach();
            log::debug!("[gizmo] detached");
        }
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
        if self.attached.is_some() {
            self.widget.set_mode(mode);
        }
    }

    /// Begin dragging the attached node; suspends the orbit controller.
    pub fn begin_drag(&mut self, op: DragOperation, orbit: &mut OrbitControls) -> DragEdge {
        if self.attached != Some(op.node) {
            log::warn!("[gizmo] drag requested on {:?} which is not attached", op.node);
            return DragEdge::Unchanged;
        }
        let was = self.drag.replace(op).is_some();
        orbit.set_enabled(false);
        if was {
            DragEdge::Unchanged
        } else {
            DragEdge::Started
        }
    }

    /// Apply the drag for a pointer at `ndc`. Returns whether the node moved.
    pub fn drag_to(&mut self, ndc: Vec2, camera: &Camera, scene: &mut SceneGraph) -> bool {
        let Some(op) = self.drag.as_mut() else {
            return false;
        };
        let Some(t) = op.transform_at(ndc, camera) else {
            return false;
        };
        let Some(node) = scene.node_mut(op.node) else {
            return false;
        };
        node.transform = t;
        op.moved = true;
        true
    }

    /// Stop dragging and resume the orbit controller.
    pub fn end_drag(&mut self, orbit: &mut OrbitControls) -> DragEdge {
        orbit.set_enabled(true);
        match self.drag.take() {
            Some(op) => DragEdge::Finished { moved: op.moved },
            None => DragEdge::Unchanged,
        }
    }
}
