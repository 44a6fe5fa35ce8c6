use super::{KeyValueStore, StoreError, StoredValue};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const STORE_FILE_NAME: &str = "store.json";

/// JSON-file backed store.
///
/// The whole map is kept in memory and rewritten on every mutation. A mutation
/// only becomes visible once the file has been replaced, so a failed write
/// leaves both the file and the in-memory view unchanged. The file holds the
/// session token, so on Unix it is created with `0600` permissions.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, StoredValue>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        log::debug!(
            "Opened store {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Default location: `~/.config/catalog/store.json` on Unix-like systems,
    /// the platform config directory elsewhere.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        if cfg!(unix) {
            if let Some(mut home_path) = dirs::home_dir() {
                home_path.push(".config");
                home_path.push("catalog");
                home_path.push(STORE_FILE_NAME);
                return Ok(home_path);
            }
        }

        dirs::config_dir()
            .map(|mut path| {
                path.push("catalog");
                path.push(STORE_FILE_NAME);
                path
            })
            .ok_or_else(|| StoreError::Location("Unable to determine config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, StoredValue>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write next to the target and rename so a crash never leaves half a file.
        let tmp_path = self.path.with_extension("json.tmp");
        let written = write_private(&tmp_path, content.as_bytes()).and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
        });
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    /// Persists `next` and installs it as the current map only once it is on disk.
    fn commit(
        &self,
        entries: &mut BTreeMap<String, StoredValue>,
        next: BTreeMap<String, StoredValue>,
    ) -> Result<(), StoreError> {
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

/// Creates `path` readable by the owner only, replacing any leftover file.
fn write_private(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(io_error(e)),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(io_error)?;
    file.write_all(content).map_err(io_error)?;
    file.sync_all().map_err(io_error)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.commit(&mut entries, next)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.commit(&mut entries, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_points_into_catalog_dir() {
        let path = FileStore::default_path().unwrap();
        assert!(path.to_string_lossy().contains("catalog"));
        assert!(path.ends_with(STORE_FILE_NAME));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set_string("auth_token", "abc").unwrap();
        store.set_bool("favorite_7", true).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_string("auth_token").unwrap().as_deref(),
            Some("abc")
        );
        assert!(reopened.get_bool("favorite_7").unwrap());
        assert!(!reopened.get_bool("favorite_8").unwrap());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    /// Turns the store file into a non-empty directory so the final rename fails.
    fn block_target(path: &Path) {
        fs::remove_file(path).ok();
        fs::create_dir(path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
    }

    #[test]
    fn failed_set_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set_string("auth_token", "old").unwrap();

        block_target(&path);

        let result = store.set_string("auth_token", "new");
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.get_string("auth_token").unwrap().as_deref(), Some("old"));

        let result = store.set_bool("favorite_3", true);
        assert!(result.is_err());
        assert!(!store.get_bool("favorite_3").unwrap());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_remove_keeps_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set_string("auth_token", "abc").unwrap();

        block_target(&path);

        assert!(store.remove("auth_token").is_err());
        assert_eq!(store.get_string("auth_token").unwrap().as_deref(), Some("abc"));
        // Removing a missing key never touches the file.
        assert!(store.remove("favorite_1").is_ok());
    }

    #[test]
    fn stale_temp_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(path.with_extension("json.tmp"), "leftover").unwrap();

        let store = FileStore::open(&path).unwrap();
        store.set_string("auth_token", "abc").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_string("auth_token").unwrap().as_deref(), Some("abc"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn store_file_is_private_from_creation() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set_string("auth_token", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
