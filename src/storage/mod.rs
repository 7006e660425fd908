//! Storage module — opaque text persistence for vault files.
//!
//! This module provides:
//! - The `Persistence` capability (exists / read / write / lock)
//! - `FileStorage`: atomic temp-file + rename writes with `flock` locks (`file`)
//! - `MemoryStorage`: an in-process map for tests and embedders (`memory`)
//! - Advisory lock guards (`lock`)

pub mod file;
pub mod lock;
pub mod memory;

use std::path::Path;

use crate::errors::Result;

pub use file::FileStorage;
pub use lock::{LockMode, VaultLock};
pub use memory::MemoryStorage;

/// Storage for single named text resources.
///
/// Implementations know nothing about the vault structure; content is an
/// opaque string.
pub trait Persistence {
    /// Returns `true` if a resource exists under `name`.
    fn exists(&self, name: &Path) -> bool;

    /// Read the full content of `name`.
    ///
    /// Fails with `NotFound` when absent and `Io` when unreadable.
    fn read(&self, name: &Path) -> Result<String>;

    /// Replace the content of `name`.
    ///
    /// Either the previous content is fully replaced or it is left
    /// untouched and an error is returned.
    fn write(&self, content: &str, name: &Path) -> Result<()>;

    /// Take an advisory lock on `name` for the lifetime of the guard.
    fn lock(&self, _name: &Path, _mode: LockMode) -> Result<VaultLock> {
        Ok(VaultLock::none())
    }
}

impl<T: Persistence + ?Sized> Persistence for &T {
    fn exists(&self, name: &Path) -> bool {
        (**self).exists(name)
    }

    fn read(&self, name: &Path) -> Result<String> {
        (**self).read(name)
    }

    fn write(&self, content: &str, name: &Path) -> Result<()> {
        (**self).write(content, name)
    }

    fn lock(&self, name: &Path, mode: LockMode) -> Result<VaultLock> {
        (**self).lock(name, mode)
    }
}
