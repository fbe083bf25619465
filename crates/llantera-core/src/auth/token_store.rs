//! Bearer token persistence
//!
//! The persisted token is the only process-wide shared slot. Writes come
//! from explicit login/logout actions; last writer wins.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::Result;

/// Single read/write slot for the bearer token
pub trait TokenStore: Send + Sync {
    /// Persist the token, replacing any previous one
    fn save(&self, token: &str) -> Result<()>;

    /// Current token, if any
    fn read(&self) -> Option<String>;

    /// Remove the token
    fn clear(&self) -> Result<()>;

    fn has_token(&self) -> bool {
        self.read().is_some()
    }
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
        Ok(())
    }
}

/// File-backed store, survives restarts
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured token path
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(crate::config::get_token_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        log::debug!("Saved session token to {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Could not read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert!(store.read().is_none());
        assert!(!store.has_token());

        store.save("abc").unwrap();
        assert_eq!(store.read().as_deref(), Some("abc"));

        store.save("def").unwrap();
        assert_eq!(store.read().as_deref(), Some("def"));

        store.clear().unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("token");

        FileTokenStore::new(&path).save("eyJ.token.sig").unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.read().as_deref(), Some("eyJ.token.sig"));
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        store.clear().unwrap();
        store.save("t").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        assert!(FileTokenStore::new(path).read().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.save("secret").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
