//! Single-selection state machine. Owns the gadget adapter and the info panel.
//!
//! Invariant: a `Selected` instance is always present in the registry. Any
//! attempt to select an instance the registry does not hold panics, since it
//! means the selection and the registry have drifted apart.

use crate::dimensions::{world_aabb, Dimensions, InfoPanel};
use crate::gizmo::{GadgetAdapter, GizmoMode, TransformWidget};
use crate::pick::PickOutcome;
use crate::registry::{InstanceId, Registry};
use crate::scene::SceneGraph;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected(InstanceId),
}

#[derive(Default)]
pub struct SelectionController {
    state: Selection,
    gadget: GadgetAdapter,
    panel: InfoPanel,
}

impl SelectionController {
    pub fn new(widget: Box<dyn TransformWidget>) -> Self {
        Self {
            state: Selection::Idle,
            gadget: GadgetAdapter::new(widget),
            panel: InfoPanel::default(),
        }
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn selected(&self) -> Option<InstanceId> {
        match self.state {
            Selection::Idle => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn gadget(&self) -> &GadgetAdapter {
        &self.gadget
    }

    pub fn gadget_mut(&mut self) -> &mut GadgetAdapter {
        &mut self.gadget
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn apply_pick(&mut self, outcome: PickOutcome, registry: &mut Registry, scene: &SceneGraph) {
        match outcome {
            PickOutcome::NotAClick => {}
            PickOutcome::Miss => self.clear(),
            PickOutcome::Hit(hit) => self.select(hit.instance, registry, scene),
        }
    }

    /// Select `id`, attaching the gadget to its root node. Re-selecting the
    /// current instance changes nothing.
    pub fn select(&mut self, id: InstanceId, registry: &mut Registry, scene: &SceneGraph) {
        if self.state == Selection::Selected(id) {
            return;
        }
        let Some(node) = registry.get(id).map(|i| i.node) else {
            panic!("cannot attach gadget: instance {id:?} is not in the registry");
        };
        self.gadget.detach();
        self.gadget.attach(node);
        self.state = Selection::Selected(id);
        self.refresh_dimensions(registry, scene);
        log::info!("[select] {:?}", id);
    }

    /// Drop the selection (if any), detach the gadget and hide the panel.
    pub fn clear(&mut self) {
        if let Selection::Selected(id) = self.state {
            log::info!("[select] cleared {:?}", id);
        }
        self.state = Selection::Idle;
        self.gadget.detach();
        self.panel.hide();
    }

    /// Remove the selected instance from the registry and the scene.
    /// No-op while idle.
    pub fn delete_selected(&mut self, registry: &mut Registry, scene: &mut SceneGraph) -> Option<InstanceId> {
        let Selection::Selected(id) = self.state else {
            return None;
        };
        self.clear();
        registry.remove(id, scene);
        log::info!("[delete] {:?}, {} instances left", id, registry.len());
        Some(id)
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        self.gadget.set_mode(mode);
        log::info!("[gizmo] mode={}", mode.label());
    }

    /// Re-measure the selection and refresh the panel and the cached box.
    pub fn refresh_dimensions(&mut self, registry: &mut Registry, scene: &SceneGraph) {
        let Selection::Selected(id) = self.state else {
            return;
        };
        let Some(instance) = registry.get(id) else {
            panic!("selection {id:?} is not in the registry");
        };
        let bounds = world_aabb(scene, instance.node);
        let title = scene
            .node(instance.node)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| instance.catalog_ref.clone());
        registry.set_cached_bounds(id, bounds);
        self.panel.show(title, bounds.as_ref().map(Dimensions::from_aabb));
    }

    /// Back to a fresh session's state: idle, detached, default mode.
    pub fn reset(&mut self) {
        self.clear();
        self.gadget.set_mode(GizmoMode::default());
    }
}
