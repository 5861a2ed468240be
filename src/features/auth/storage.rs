//! Durable key/value storage for the session. Each key holds one JSON string;
//! a missing key means "no session". The file backend keeps one file per key in
//! the session directory, written atomically and readable only by the owner.

use crate::app_lib::AppError;
use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
    sync::{Mutex, PoisonError},
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Key holding the JSON-serialized token pair.
pub const TOKENS_KEY: &str = "cl_tokens";
/// Key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "cl_user";

pub trait SessionStorage: Send + Sync {
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;

    /// # Errors
    /// Returns an error if the value cannot be written.
    fn store(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removing a missing key is not an error.
    /// # Errors
    /// Returns an error if an existing value cannot be removed.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Session storage backed by one file per key.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            AppError::Storage(format!(
                "Failed to create session directory {}: {err}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        // Unique per writer; created owner-only on unix.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|err| {
            AppError::Storage(format!(
                "Failed to create a temporary file in {}: {err}",
                self.dir.display()
            ))
        })?;

        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| {
                AppError::Storage(format!("Failed to write {}: {err}", tmp.path().display()))
            })?;

        tmp.persist(&path).map_err(|err| {
            AppError::Storage(format!("Failed to replace {}: {}", path.display(), err.error))
        })?;

        debug!(key, "session key stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "session key removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to remove {}: {err}",
                path.display()
            ))),
        }
    }
}

/// In-process storage, for tests and for sessions that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
