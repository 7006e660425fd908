//! File-backed persistence.
//!
//! Writes never touch the target in place: content goes to a temporary
//! file in the same directory (created owner-only by `tempfile`), is
//! flushed and synced, then renamed over the target.  Readers therefore
//! see either the old content or the new content, never a torn file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::{Result, ShelterError};

use super::lock::{self, LockMode, VaultLock};
use super::Persistence;

/// UTF-8 text files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl Persistence for FileStorage {
    fn exists(&self, name: &Path) -> bool {
        name.exists()
    }

    fn read(&self, name: &Path) -> Result<String> {
        fs::read_to_string(name).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ShelterError::NotFound(name.to_path_buf()),
            _ => ShelterError::Io(e),
        })
    }

    fn write(&self, content: &str, name: &Path) -> Result<()> {
        let parent = lock::parent_dir(name);

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(name).map_err(|e| ShelterError::Io(e.error))?;

        debug!(path = %name.display(), bytes = content.len(), "file replaced");
        Ok(())
    }

    fn lock(&self, name: &Path, mode: LockMode) -> Result<VaultLock> {
        match lock::acquire(name, mode) {
            Ok(guard) => Ok(guard),
            // Reading a vault from a read-only directory must still work.
            Err(ShelterError::Io(e))
                if mode == LockMode::Shared && e.kind() == ErrorKind::PermissionDenied =>
            {
                warn!(path = %name.display(), "cannot create lock file, reading unlocked");
                Ok(VaultLock::none())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing");
        assert!(matches!(
            FileStorage.read(&path),
            Err(ShelterError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("v");
        assert!(!FileStorage.exists(&path));

        FileStorage.write("first", &path).unwrap();
        assert!(FileStorage.exists(&path));
        assert_eq!(FileStorage.read(&path).unwrap(), "first");

        FileStorage.write("second", &path).unwrap();
        assert_eq!(FileStorage.read(&path).unwrap(), "second");
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("v");
        FileStorage.write("content", &path).unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("v")]);
    }

    #[test]
    fn write_into_missing_directory_fails_and_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("v");
        assert!(matches!(
            FileStorage.write("content", &path),
            Err(ShelterError::Io(_))
        ));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("v");
        FileStorage.write("content", &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
