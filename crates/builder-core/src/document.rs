//! Whole-scene document: a second serialization of the live graph, independent
//! of the per-instance records. Geometry and materials are pooled into shared
//! tables and referenced by index; every node keeps its role.

use crate::constants::{SCENE_DOCUMENT_GENERATOR, SCENE_DOCUMENT_VERSION};
use crate::scene::{
    Geometry, Light, Material, NodeId, NodeKind, NodeRecord, NodeRole, SceneGraph, Transform,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub version: u32,
    pub generator: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentObject {
    Group,
    Mesh { geometry: usize, material: usize },
    Light(Light),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub name: String,
    #[serde(default)]
    pub role: NodeRole,
    pub object: DocumentObject,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub geometries: Vec<Geometry>,
    #[serde(default)]
    pub materials: Vec<Material>,
    pub object: DocumentNode,
}

impl SceneDocument {
    /// Serialize the whole graph under the root, including backdrop and lights.
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let mut geometries = Vec::new();
        let mut materials = Vec::new();
        let object = document_node(scene, scene.root(), &mut geometries, &mut materials)
            .unwrap_or_else(|| DocumentNode {
                name: "Scene".to_string(),
                role: NodeRole::Ambient,
                object: DocumentObject::Group,
                transform: Transform::IDENTITY,
                children: Vec::new(),
            });
        Self {
            metadata: DocumentMetadata {
                version: SCENE_DOCUMENT_VERSION,
                generator: SCENE_DOCUMENT_GENERATOR.to_string(),
            },
            geometries,
            materials,
            object,
        }
    }

    /// Resolve table references back into a self-contained record.
    /// Nodes with dangling references are dropped with a warning.
    pub fn resolve(&self, node: &DocumentNode) -> Option<NodeRecord> {
        let kind = match &node.object {
            DocumentObject::Group => NodeKind::Group,
            DocumentObject::Light(light) => NodeKind::Light(*light),
            DocumentObject::Mesh { geometry, material } => {
                match (self.geometries.get(*geometry), self.materials.get(*material)) {
                    (Some(g), Some(m)) => NodeKind::Mesh {
                        geometry: g.clone(),
                        material: *m,
                    },
                    _ => {
                        log::warn!(
                            "[document] node `{}` references missing geometry {} / material {}",
                            node.name,
                            geometry,
                            material
                        );
                        return None;
                    }
                }
            }
        };
        Some(NodeRecord {
            name: node.name.clone(),
            kind,
            transform: node.transform,
            children: node.children.iter().filter_map(|c| self.resolve(c)).collect(),
        })
    }

    /// Root children the session owns directly (lights and helpers).
    pub fn ambient_children(&self) -> impl Iterator<Item = &DocumentNode> {
        self.object
            .children
            .iter()
            .filter(|c| c.role == NodeRole::Ambient)
    }
}

fn document_node(
    scene: &SceneGraph,
    id: NodeId,
    geometries: &mut Vec<Geometry>,
    materials: &mut Vec<Material>,
) -> Option<DocumentNode> {
    let node = scene.node(id)?;
    let object = match &node.kind {
        NodeKind::Group => DocumentObject::Group,
        NodeKind::Light(light) => DocumentObject::Light(*light),
        NodeKind::Mesh { geometry, material } => DocumentObject::Mesh {
            geometry: intern(geometries, geometry),
            material: intern(materials, material),
        },
    };
    Some(DocumentNode {
        name: node.name.clone(),
        role: node.role,
        object,
        transform: node.transform,
        children: node
            .children()
            .iter()
            .filter_map(|c| document_node(scene, *c, geometries, materials))
            .collect(),
    })
}

fn intern<T: Clone + PartialEq>(table: &mut Vec<T>, value: &T) -> usize {
    match table.iter().position(|v| v == value) {
        Some(i) => i,
        None => {
            table.push(value.clone());
            table.len() - 1
        }
    }
}

impl SceneGraph {
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument::from_scene(self)
    }

    /// Replace the root's ambient children with those of `doc`, placed at the
    /// front of the root in document order. Backdrop and instance subtrees in
    /// the document are left to the vehicle bootstrap and the registry.
    pub fn restore_ambient(&mut self, doc: &SceneDocument) -> usize {
        let root = self.root();
        let stale: Vec<NodeId> = self
            .children(root)
            .iter()
            .copied()
            .filter(|c| self.node(*c).is_some_and(|n| n.role == NodeRole::Ambient))
            .collect();
        for id in stale {
            self.remove_subtree(id);
        }
        let mut restored = 0;
        for child in doc.ambient_children() {
            if let Some(record) = doc.resolve(child) {
                self.instantiate_at(root, restored, &record, NodeRole::Ambient);
                restored += 1;
            }
        }
        restored
    }
}
