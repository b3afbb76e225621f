//! Minimal scene graph mirroring the renderer's node tree.
//!
//! Nodes are addressed by opaque [`NodeId`] handles. The graph only carries
//! what the editor state needs: hierarchy, TRS transforms, local-space
//! geometry for picking and measuring, and enough material/light data to
//! rebuild a node from a serialized record.

use crate::constants::RAY_EPSILON;
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Opaque handle into a [`SceneGraph`]. Never reused within one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Self::IDENTITY
        }
    }

    /// Local-to-parent matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Corner index bits: 1 = +x, 2 = +y, 4 = +z
const CUBOID_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 3],
    [0, 3, 2],
    [4, 5, 7],
    [4, 7, 6],
    [0, 2, 6],
    [0, 6, 4],
    [1, 3, 7],
    [1, 7, 5],
    [0, 1, 5],
    [0, 5, 4],
    [2, 3, 7],
    [2, 7, 6],
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Axis-aligned box centered on the local origin.
    Cuboid { size: Vec3 },
    /// Indexed triangle list. An empty index list means consecutive triples.
    TriangleMesh {
        positions: Vec<Vec3>,
        #[serde(default)]
        indices: Vec<u32>,
    },
}

impl Geometry {
    pub fn unit_cube() -> Self {
        Geometry::Cuboid { size: Vec3::ONE }
    }

    pub fn vertices(&self) -> Vec<Vec3> {
        match self {
            Geometry::Cuboid { size } => cuboid_corners(*size).to_vec(),
            Geometry::TriangleMesh { positions, .. } => positions.clone(),
        }
    }

    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        match self {
            Geometry::Cuboid { size } => {
                let c = cuboid_corners(*size);
                CUBOID_TRIANGLES
                    .iter()
                    .map(|[a, b, d]| [c[*a], c[*b], c[*d]])
                    .collect()
            }
            Geometry::TriangleMesh { positions, indices } if indices.is_empty() => positions
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            Geometry::TriangleMesh { positions, indices } => indices
                .chunks_exact(3)
                .filter_map(|t| {
                    Some([
                        *positions.get(t[0] as usize)?,
                        *positions.get(t[1] as usize)?,
                        *positions.get(t[2] as usize)?,
                    ])
                })
                .collect(),
        }
    }
}

fn cuboid_corners(size: Vec3) -> [Vec3; 8] {
    let h = size * 0.5;
    let mut out = [Vec3::ZERO; 8];
    for (i, c) in out.iter_mut().enumerate() {
        *c = Vec3::new(
            if i & 1 != 0 { h.x } else { -h.x },
            if i & 2 != 0 { h.y } else { -h.y },
            if i & 4 != 0 { h.z } else { -h.z },
        );
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: [f32; 3],
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.8, 0.8, 0.8],
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Mesh { geometry: Geometry, material: Material },
    Light(Light),
}

/// Who owns a subtree: the session (lights), the vehicle bootstrap, or a
/// placed instance in the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    #[default]
    Ambient,
    Backdrop,
    Instance,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub role: NodeRole,
    pub kind: NodeKind,
    pub transform: Transform,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, role: NodeRole, kind: NodeKind, transform: Transform) -> Self {
        Self {
            name: name.into(),
            role,
            kind,
            transform,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Self-contained serialized form of one subtree: type tags, inline
/// geometry/material and TRS for every node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn group(name: impl Into<String>, transform: Transform, children: Vec<NodeRecord>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Group,
            transform,
            children,
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Mesh { geometry, material },
            transform,
            children: Vec::new(),
        }
    }
}

pub struct SceneGraph {
    nodes: FnvHashMap<NodeId, SceneNode>,
    root: NodeId,
    next_id: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = FnvHashMap::default();
        nodes.insert(
            root,
            SceneNode::new("Scene", NodeRole::Ambient, NodeKind::Group, Transform::IDENTITY),
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let index = self.children(parent).len();
        self.insert_child_at(parent, index, node)
    }

    /// Insert `node` as child number `index` of `parent` (clamped to the end).
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, mut node: SceneNode) -> NodeId {
        assert!(
            self.nodes.contains_key(&parent),
            "parent node {parent:?} is not part of the scene graph"
        );
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.insert(id, node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            let at = index.min(p.children.len());
            p.children.insert(at, id);
        }
        id
    }

    /// Rebuild a serialized subtree under `parent`; every created node gets `role`.
    pub fn instantiate(&mut self, parent: NodeId, record: &NodeRecord, role: NodeRole) -> NodeId {
        let index = self.children(parent).len();
        self.instantiate_at(parent, index, record, role)
    }

    pub fn instantiate_at(
        &mut self,
        parent: NodeId,
        index: usize,
        record: &NodeRecord,
        role: NodeRole,
    ) -> NodeId {
        let node = SceneNode::new(record.name.clone(), role, record.kind.clone(), record.transform);
        let id = self.insert_child_at(parent, index, node);
        for child in &record.children {
            self.instantiate(id, child, role);
        }
        id
    }

    /// Detach and drop `id` with all of its descendants. The root is never removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root {
            log::warn!("[scene] refusing to remove the root node");
            return Vec::new();
        }
        let removed = self.descendants(id);
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != id);
        }
        for r in &removed {
            self.nodes.remove(r);
        }
        removed
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.children(cur).iter().rev().copied());
        }
        out
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(node) = cur.and_then(|c| self.nodes.get(&c)) {
            m = node.transform.matrix() * m;
            cur = node.parent;
        }
        m
    }

    pub fn to_record(&self, id: NodeId) -> Option<NodeRecord> {
        let node = self.nodes.get(&id)?;
        Some(NodeRecord {
            name: node.name.clone(),
            kind: node.kind.clone(),
            transform: node.transform,
            children: node
                .children
                .iter()
                .filter_map(|c| self.to_record(*c))
                .collect(),
        })
    }

    /// Nearest intersection distance of a world-space ray with the mesh of `id`.
    ///
    /// The ray is tested in the node's local space; affine maps preserve the
    /// ray parameter, so the result is a world-space distance when `dir` is
    /// normalized.
    pub fn raycast_node(&self, id: NodeId, origin: Vec3, dir: Vec3) -> Option<f32> {
        let node = self.nodes.get(&id)?;
        let NodeKind::Mesh { geometry, .. } = &node.kind else {
            return None;
        };
        let inv = self.world_matrix(id).inverse();
        if !inv.is_finite() {
            return None;
        }
        let lo = inv.transform_point3(origin);
        let ld = inv.transform_vector3(dir);
        geometry
            .triangles()
            .iter()
            .filter_map(|tri| ray_triangle(lo, ld, tri))
            .fold(None, |best: Option<f32>, t| match best {
                Some(b) if b <= t => Some(b),
                _ => Some(t),
            })
    }
}

/// Möller–Trumbore ray/triangle test without back-face culling.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < RAY_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
