//! Shell session state.
//!
//! The selected vault lives here and is handed to the credential store
//! on every call; the store itself never remembers a vault.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::errors::{Result, ShelterError};
use crate::vault::CredentialStore;

/// State carried between commands of one pwshelter run.
pub struct Session {
    settings: Settings,
    store: CredentialStore,
    selected: Option<PathBuf>,
    clipboard: Option<arboard::Clipboard>,
}

impl Session {
    pub fn new(settings: Settings, selected: Option<PathBuf>) -> Self {
        let store = CredentialStore::from_settings(&settings);
        Self {
            settings,
            store,
            selected,
            clipboard: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// The selected vault path, whether or not it exists yet.
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Select an existing vault.
    pub fn select(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(ShelterError::NotFound(path));
        }
        self.selected = Some(path);
        Ok(())
    }

    /// Select a vault that was just created.
    pub(crate) fn select_created(&mut self, path: PathBuf) {
        self.selected = Some(path);
    }

    /// The selected vault, which must exist.
    ///
    /// Checked before prompting so a typo does not cost a password entry.
    pub fn vault_path(&self) -> Result<PathBuf> {
        let path = self
            .selected
            .clone()
            .ok_or(ShelterError::NoVaultSelected)?;
        if !path.exists() {
            return Err(ShelterError::NotFound(path));
        }
        Ok(path)
    }

    /// Put `text` on the system clipboard.
    ///
    /// The clipboard handle is kept for the whole session; on X11 and
    /// Wayland the owning process serves the content.
    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ShelterError::ClipboardError(e.to_string()))?,
        };
        self.clipboard
            .insert(clipboard)
            .set_text(text)
            .map_err(|e| ShelterError::ClipboardError(e.to_string()))
    }
}
