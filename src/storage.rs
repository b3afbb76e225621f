use builder_core::KeyValueStore;
use web_sys as web;

/// `localStorage` behind the core's store trait. Write failures (quota,
/// private mode) are logged and dropped.
pub struct LocalStore {
    storage: web::Storage,
}

impl LocalStore {
    pub fn open() -> Option<Self> {
        let storage = web::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("[storage] failed to write {}: {:?}", key, e);
        }
    }

    fn remove(&mut self, key: &str) {
        _ = self.storage.remove_item(key);
    }

    fn clear(&mut self) {
        if let Err(e) = self.storage.clear() {
            log::warn!("[storage] failed to clear: {:?}", e);
        }
    }
}
