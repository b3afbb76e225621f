//! Snapshot save/load against a string key-value store.
//!
//! Every key is optional on read: a missing or unreadable entry restores as
//! "nothing" for that piece, so a never-saved store loads as an empty scene.

use crate::camera::CameraPose;
use crate::constants::{
    KEY_CAMERA_POSITION, KEY_CAMERA_ROTATION, KEY_CAR_TYPE, KEY_LOCAL_MODELS, KEY_SAVED_SCENE,
};
use crate::document::SceneDocument;
use crate::error::Result;
use crate::registry::InstanceRecord;
use crate::vehicle::VehicleType;
use fnv::FnvHashMap;
use glam::Vec3;

/// Synchronous string store (browser `localStorage` on the web).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Everything a save writes.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub camera: CameraPose,
    pub vehicle: Option<VehicleType>,
    pub instances: Vec<InstanceRecord>,
    pub scene: SceneDocument,
}

impl Snapshot {
    /// Write every piece under its fixed key. Serialization happens before the
    /// first write, so a failure leaves the store untouched.
    pub fn write(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let models = serde_json::to_string(&self.instances)?;
        let scene = serde_json::to_string(&self.scene)?;

        for (key, v) in KEY_CAMERA_POSITION.iter().zip(self.camera.position.to_array()) {
            store.set(key, &v.to_string());
        }
        for (key, v) in KEY_CAMERA_ROTATION.iter().zip(self.camera.rotation.to_array()) {
            store.set(key, &v.to_string());
        }
        store.set(KEY_LOCAL_MODELS, &models);
        store.set(KEY_SAVED_SCENE, &scene);
        if let Some(v) = self.vehicle {
            store.set(KEY_CAR_TYPE, &v.to_json());
        }
        log::info!(
            "[save] {} instances, {} scene bytes",
            self.instances.len(),
            scene.len()
        );
        Ok(())
    }
}

pub fn read_vehicle(store: &dyn KeyValueStore) -> Option<VehicleType> {
    let raw = store.get(KEY_CAR_TYPE)?;
    match VehicleType::from_json(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[load] ignoring {}: {}", KEY_CAR_TYPE, e);
            None
        }
    }
}

pub fn read_instances(store: &dyn KeyValueStore) -> Vec<InstanceRecord> {
    let Some(raw) = store.get(KEY_LOCAL_MODELS) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("[load] ignoring malformed {}: {}", KEY_LOCAL_MODELS, e);
        Vec::new()
    })
}

pub fn read_scene(store: &dyn KeyValueStore) -> Option<SceneDocument> {
    let raw = store.get(KEY_SAVED_SCENE)?;
    serde_json::from_str(&raw)
        .map_err(|e| log::warn!("[load] ignoring malformed {}: {}", KEY_SAVED_SCENE, e))
        .ok()
}

/// All six scalars must be present and numeric, otherwise the default camera stays.
pub fn read_camera(store: &dyn KeyValueStore) -> Option<CameraPose> {
    Some(CameraPose {
        position: read_vec3(store, &KEY_CAMERA_POSITION)?,
        rotation: read_vec3(store, &KEY_CAMERA_ROTATION)?,
    })
}

fn read_vec3(store: &dyn KeyValueStore, keys: &[&str; 3]) -> Option<Vec3> {
    let mut out = [0.0f32; 3];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = store.get(key)?.trim().parse().ok()?;
    }
    Some(Vec3::from_array(out))
}

/// Wipe the store, keeping only the vehicle choice.
pub fn reset_store(store: &mut dyn KeyValueStore, vehicle: Option<VehicleType>) {
    store.clear();
    if let Some(v) = vehicle {
        store.set(KEY_CAR_TYPE, &v.to_json());
    }
    log::info!("[reset] store cleared, vehicle={:?}", vehicle);
}
