//! In-memory persistence for tests and embedders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::errors::{Result, ShelterError};

use super::Persistence;

/// A map of name -> content held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        // A poisoned map is still a consistent map: writes are single inserts.
        self.files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Persistence for MemoryStorage {
    fn exists(&self, name: &Path) -> bool {
        self.files().contains_key(name)
    }

    fn read(&self, name: &Path) -> Result<String> {
        self.files()
            .get(name)
            .cloned()
            .ok_or_else(|| ShelterError::NotFound(name.to_path_buf()))
    }

    fn write(&self, content: &str, name: &Path) -> Result<()> {
        self.files()
            .insert(name.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let storage = MemoryStorage::new();
        let name = Path::new("vault");
        assert!(storage.is_empty());
        assert!(matches!(storage.read(name), Err(ShelterError::NotFound(_))));

        storage.write("abc", name).unwrap();
        assert!(storage.exists(name));
        assert_eq!(storage.read(name).unwrap(), "abc");
        assert_eq!(storage.len(), 1);
    }
}
