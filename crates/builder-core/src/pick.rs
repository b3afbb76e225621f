//! Click/drag disambiguation and ray picking against placed instances.

use crate::camera::Camera;
use crate::registry::{InstanceId, Registry};
use crate::scene::{NodeId, NodeRole, SceneGraph};
use glam::{Vec2, Vec3};

/// One pointer event, in normalized device coordinates ([-1, 1] on both axes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub ndc: Vec2,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            ndc: Vec2::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub instance: InstanceId,
    /// The mesh node that was hit; may be any descendant of the instance root.
    pub node: NodeId,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickOutcome {
    /// The pointer moved between down and up: a camera drag, not a selection.
    NotAClick,
    Miss,
    Hit(PickHit),
}

/// Resolve a pointer-down/pointer-up pair.
///
/// Only an exactly stationary pair counts as a click; any movement returns
/// [`PickOutcome::NotAClick`] without casting a ray.
pub fn resolve_pick(
    down: PointerSample,
    up: PointerSample,
    camera: &Camera,
    scene: &SceneGraph,
    registry: &Registry,
) -> PickOutcome {
    if down.ndc != up.ndc {
        return PickOutcome::NotAClick;
    }
    if registry.is_empty() {
        return PickOutcome::Miss;
    }
    let (origin, dir) = camera.ray_from_ndc(up.ndc);
    match raycast_instances(origin, dir, scene, registry) {
        Some(hit) => PickOutcome::Hit(hit),
        None => PickOutcome::Miss,
    }
}

/// Nearest hit over every instance mesh in the scene, resolved to its owner
/// through the registry's node table. Nodes are visited in scene order, so
/// on equal distance the earlier instance (and the earlier node) wins.
pub fn raycast_instances(
    origin: Vec3,
    dir: Vec3,
    scene: &SceneGraph,
    registry: &Registry,
) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for node in scene.descendants(scene.root()) {
        if scene.node(node).map(|n| n.role) != Some(NodeRole::Instance) {
            continue;
        }
        let Some(t) = scene.raycast_node(node, origin, dir) else {
            continue;
        };
        if best.is_some_and(|b| t >= b.distance) {
            continue;
        }
        let Some(instance) = registry.owner_of(node) else {
            log::warn!("[pick] {:?} has no owning instance", node);
            continue;
        };
        best = Some(PickHit {
            instance,
            node,
            distance: t,
        });
    }
    best
}

/// Nearest mesh hit within the subtree rooted at `root`.
pub fn raycast_subtree(
    root: NodeId,
    origin: Vec3,
    dir: Vec3,
    scene: &SceneGraph,
) -> Option<(NodeId, f32)> {
    let mut best: Option<(NodeId, f32)> = None;
    for id in scene.descendants(root) {
        if let Some(t) = scene.raycast_node(id, origin, dir) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
    }
    best
}
