use super::KeyValueStore;
use ideaboard_errors::AppError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// JSON-object file on disk. Read once at `open`, written through on every change.
pub struct FileStore {
    path: PathBuf,
    slots: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let slots = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(slots) => slots,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable store at {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(AppError::Storage(format!("{}: {}", path.display(), e))),
        };

        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, slots: &BTreeMap<String, String>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(slots)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
        }

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| AppError::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| AppError::Storage(e.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut slots = self.lock();
        slots.insert(key.to_string(), value.to_string());
        self.persist(&slots)
    }

    fn remove(&self, key: &str) {
        let mut slots = self.lock();
        if slots.remove(key).is_some() {
            if let Err(e) = self.persist(&slots) {
                tracing::warn!("Failed to persist removal of {}: {}", key, e);
            }
        }
    }
}
