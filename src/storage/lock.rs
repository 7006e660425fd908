//! Advisory per-vault locks.
//!
//! A vault is replaced by rename on every write, so the lock cannot live
//! on the vault file itself.  Instead a sidecar `.<name>.lock` file next to
//! the vault carries an OS file lock (`flock` on Unix, `LockFileEx` on
//! Windows): shared for reads, exclusive for writes.  The lock is released
//! when the guard (and its file handle) is dropped.  Sidecar files are left
//! in place afterwards.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;

use crate::errors::Result;

/// Whether the holder only reads the vault or also rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// Guard holding an advisory lock until dropped.
#[derive(Debug)]
pub struct VaultLock {
    file: Option<File>,
}

impl VaultLock {
    /// A guard that holds nothing.
    pub fn none() -> Self {
        Self { file: None }
    }

    /// Whether this guard actually holds an OS lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

/// Path of the sidecar lock file for `vault_path`.
pub fn lock_path_for(vault_path: &Path) -> PathBuf {
    parent_dir(vault_path).join(format!(
        ".{}.lock",
        vault_path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Directory containing `path`, `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Open the sidecar lock file and block until the lock is granted.
pub fn acquire(vault_path: &Path, mode: LockMode) -> Result<VaultLock> {
    let lock_path = lock_path_for(vault_path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&lock_path)?;

    match mode {
        LockMode::Shared => FileExt::lock_shared(&file)?,
        LockMode::Exclusive => FileExt::lock_exclusive(&file)?,
    }
    tracing::trace!(path = %lock_path.display(), ?mode, "vault lock acquired");

    Ok(VaultLock { file: Some(file) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_path_is_hidden_sibling() {
        let path = Path::new("/tmp/vaults/main.vault");
        assert_eq!(
            lock_path_for(path),
            PathBuf::from("/tmp/vaults/.main.vault.lock")
        );
    }

    #[test]
    fn bare_file_name_locks_in_current_dir() {
        assert_eq!(lock_path_for(Path::new("v")), PathBuf::from("./.v.lock"));
    }

    #[test]
    fn shared_locks_can_be_held_together() {
        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("v");
        let first = acquire(&vault, LockMode::Shared).unwrap();
        let second = acquire(&vault, LockMode::Shared).unwrap();
        assert!(first.is_held() && second.is_held());
        assert!(lock_path_for(&vault).exists());
    }

    #[test]
    fn exclusive_lock_waits_for_holder() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;

        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("v");
        let acquired = AtomicBool::new(false);

        let held = acquire(&vault, LockMode::Exclusive).unwrap();
        std::thread::scope(|scope| {
            let waiter = scope.spawn(|| {
                let _guard = acquire(&vault, LockMode::Exclusive).unwrap();
                acquired.store(true, Ordering::SeqCst);
            });

            std::thread::sleep(Duration::from_millis(100));
            assert!(!acquired.load(Ordering::SeqCst));

            drop(held);
            waiter.join().unwrap();
        });
        assert!(acquired.load(Ordering::SeqCst));
    }

    #[test]
    fn exclusive_lock_is_reacquirable_after_drop() {
        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("v");
        drop(acquire(&vault, LockMode::Exclusive).unwrap());
        assert!(acquire(&vault, LockMode::Exclusive).unwrap().is_held());
    }
}
