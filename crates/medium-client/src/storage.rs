use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the login token is stored under.
pub const TOKEN_KEY: &str = "token";

/// String key/value persistence for client state, in the manner of a
/// browser's local storage.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|e| io::Error::other(format!("storage lock poisoned: {}", e)))
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// A JSON object on disk. Survives restarts; a missing or unreadable file
/// reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        std::fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    fn update<F>(&self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| io::Error::other(format!("storage lock poisoned: {}", e)))?;
        let mut values = self.load();
        f(&mut values);
        let bytes = serde_json::to_vec_pretty(&values).map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, bytes)
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY), None);

        storage.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let path = std::env::temp_dir()
            .join(format!("medium_client_storage_{}", std::process::id()))
            .join("local.json");

        FileStorage::new(&path).set(TOKEN_KEY, "persisted").unwrap();
        FileStorage::new(&path).set("other", "kept").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("persisted"));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(FileStorage::new(&path).get(TOKEN_KEY), None);
        assert_eq!(FileStorage::new(&path).get("other").as_deref(), Some("kept"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let path = std::env::temp_dir().join(format!("medium_client_corrupt_{}.json", std::process::id()));
        std::fs::write(&path, b"not json").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(TOKEN_KEY), None);
        storage.set(TOKEN_KEY, "fresh").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("fresh"));

        let _ = std::fs::remove_file(&path);
    }
}
