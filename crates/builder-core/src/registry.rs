//! Placed-instance registry and the node → instance side table used by picking.

use crate::dimensions::Aabb;
use crate::scene::{NodeId, NodeRecord, NodeRole, SceneGraph};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct PlacedInstance {
    pub id: InstanceId,
    /// Root node of the instance subtree; the gadget attaches here.
    pub node: NodeId,
    pub catalog_ref: String,
    /// Last measured world box; refreshed on selection and drag completion.
    pub cached_bounds: Option<Aabb>,
}

/// Persisted form of one placed instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub catalog: String,
    pub node: NodeRecord,
}

#[derive(Default)]
pub struct Registry {
    instances: Vec<PlacedInstance>,
    owners: FnvHashMap<NodeId, InstanceId>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.iter()
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Instance owning `node`, for any node inside an instance subtree.
    pub fn owner_of(&self, node: NodeId) -> Option<InstanceId> {
        self.owners.get(&node).copied()
    }

    /// Build the subtree for `record` under the scene root and register it.
    pub fn insert(
        &mut self,
        scene: &mut SceneGraph,
        catalog_ref: &str,
        record: &NodeRecord,
    ) -> InstanceId {
        let node = scene.instantiate(scene.root(), record, NodeRole::Instance);
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        for n in scene.descendants(node) {
            self.owners.insert(n, id);
        }
        self.instances.push(PlacedInstance {
            id,
            node,
            catalog_ref: catalog_ref.to_string(),
            cached_bounds: None,
        });
        log::debug!("[registry] inserted {:?} ({}) at node {:?}", id, catalog_ref, node);
        id
    }

    /// Remove the instance and its subtree from the scene.
    pub fn remove(&mut self, id: InstanceId, scene: &mut SceneGraph) -> Option<PlacedInstance> {
        let index = self.instances.iter().position(|i| i.id == id)?;
        let instance = self.instances.remove(index);
        for n in scene.remove_subtree(instance.node) {
            self.owners.remove(&n);
        }
        self.owners.retain(|_, owner| *owner != id);
        log::debug!("[registry] removed {:?} ({})", id, instance.catalog_ref);
        Some(instance)
    }

    pub fn set_cached_bounds(&mut self, id: InstanceId, bounds: Option<Aabb>) {
        if let Some(i) = self.instances.iter_mut().find(|i| i.id == id) {
            i.cached_bounds = bounds;
        }
    }

    pub fn to_records(&self, scene: &SceneGraph) -> Vec<InstanceRecord> {
        self.instances
            .iter()
            .filter_map(|i| {
                Some(InstanceRecord {
                    catalog: i.catalog_ref.clone(),
                    node: scene.to_record(i.node)?,
                })
            })
            .collect()
    }
}
