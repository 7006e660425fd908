//! High-level vault operations used by shell commands.
//!
//! `CredentialStore` wraps a `Persistence` and a `Cipher`.  It holds no
//! vault state: every call reads the encrypted file, decrypts it, works
//! on the decoded document, and (for mutations) re-encrypts and replaces
//! the whole file.  The vault path is passed into every call.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, instrument};
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{AesGcmCipher, Cipher};
use crate::errors::{Result, ShelterError};
use crate::storage::{FileStorage, LockMode, Persistence};

use super::document::VaultDocument;

/// The credential store.  Create one with `CredentialStore::new` (or
/// `from_settings` for the on-disk default), then pass a vault path to
/// each operation.
pub struct CredentialStore<P = FileStorage, C = AesGcmCipher> {
    persistence: P,
    cipher: C,
}

impl CredentialStore<FileStorage, AesGcmCipher> {
    /// File storage with the Argon2 parameters from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(FileStorage, AesGcmCipher::new(settings.argon2_params()))
    }
}

impl<P: Persistence, C: Cipher> CredentialStore<P, C> {
    pub fn new(persistence: P, cipher: C) -> Self {
        Self {
            persistence,
            cipher,
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    // ------------------------------------------------------------------
    // Vault lifecycle
    // ------------------------------------------------------------------

    /// Create a new vault holding the empty document.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn create_vault(&self, path: &Path, master_password: &str) -> Result<()> {
        self.ensure_absent(path)?;
        let _lock = self.persistence.lock(path, LockMode::Exclusive)?;
        // Another process may have created it while we waited.
        self.ensure_absent(path)?;

        self.save(path, &VaultDocument::new(), master_password)?;
        info!("vault created");
        Ok(())
    }

    /// Re-encrypt the vault under a new master password.
    ///
    /// The decrypted document is carried over byte for byte.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn change_master_password(
        &self,
        path: &Path,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.ensure_exists(path)?;
        let _lock = self.persistence.lock(path, LockMode::Exclusive)?;
        let ciphertext = self.persistence.read(path)?;
        let plaintext = Zeroizing::new(self.cipher.decrypt(&ciphertext, old_password)?);

        let rewrapped = self.cipher.encrypt(&plaintext, new_password)?;
        self.persistence.write(&rewrapped, path)?;
        info!("master password changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All sources, sorted.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn list_sources(&self, path: &Path, master_password: &str) -> Result<Vec<String>> {
        Ok(self.read(path, master_password)?.sources())
    }

    /// Every source with its sorted account names.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn list_all_accounts(
        &self,
        path: &Path,
        master_password: &str,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        Ok(self.read(path, master_password)?.all_accounts())
    }

    /// Sorted account names under `source`.
    #[instrument(skip_all, fields(path = %path.display(), source = %source))]
    pub fn list_accounts(
        &self,
        path: &Path,
        source: &str,
        master_password: &str,
    ) -> Result<Vec<String>> {
        self.read(path, master_password)?.accounts(source)
    }

    /// Decrypt and return one stored password.
    #[instrument(skip_all, fields(path = %path.display(), source = %source, account = %account))]
    pub fn get_password(
        &self,
        path: &Path,
        source: &str,
        account: &str,
        master_password: &str,
    ) -> Result<Zeroizing<String>> {
        self.read(path, master_password)?.password(source, account)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add a new account, creating its source if needed.
    #[instrument(skip_all, fields(path = %path.display(), source = %source, account = %account))]
    pub fn add_account(
        &self,
        path: &Path,
        source: &str,
        account: &str,
        password: &str,
        master_password: &str,
    ) -> Result<()> {
        self.update(path, master_password, |doc| doc.add(source, account, password))?;
        info!("account added");
        Ok(())
    }

    /// Replace the password of an existing account.
    #[instrument(skip_all, fields(path = %path.display(), source = %source, account = %account))]
    pub fn change_password(
        &self,
        path: &Path,
        source: &str,
        account: &str,
        new_password: &str,
        master_password: &str,
    ) -> Result<()> {
        self.update(path, master_password, |doc| {
            doc.change(source, account, new_password)
        })?;
        info!("password changed");
        Ok(())
    }

    /// Delete an account; its source goes too when it becomes empty.
    #[instrument(skip_all, fields(path = %path.display(), source = %source, account = %account))]
    pub fn delete_account(
        &self,
        path: &Path,
        source: &str,
        account: &str,
        master_password: &str,
    ) -> Result<()> {
        self.update(path, master_password, |doc| doc.remove(source, account))?;
        info!("account deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Arbitrary files
    // ------------------------------------------------------------------

    /// Encrypt any text file into `output`.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn encrypt_file(&self, input: &Path, output: &Path, password: &str) -> Result<()> {
        let plaintext = Zeroizing::new(self.persistence.read(input)?);
        let ciphertext = self.cipher.encrypt(&plaintext, password)?;
        self.persistence.write(&ciphertext, output)
    }

    /// Decrypt a file produced by `encrypt_file` (or a vault) into `output`.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn decrypt_file(&self, input: &Path, output: &Path, password: &str) -> Result<()> {
        let ciphertext = self.persistence.read(input)?;
        let plaintext = Zeroizing::new(self.cipher.decrypt(&ciphertext, password)?);
        self.persistence.write(&plaintext, output)
    }

    // ------------------------------------------------------------------
    // Load / save cycle
    // ------------------------------------------------------------------

    /// Decrypt and decode under a shared lock.
    fn read(&self, path: &Path, master_password: &str) -> Result<VaultDocument> {
        self.ensure_exists(path)?;
        let _lock = self.persistence.lock(path, LockMode::Shared)?;
        self.load(path, master_password)
    }

    /// Decrypt, apply `mutate`, and write back under an exclusive lock.
    ///
    /// Nothing is written unless every step before the write succeeds.
    fn update<F>(&self, path: &Path, master_password: &str, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut VaultDocument) -> Result<()>,
    {
        self.ensure_exists(path)?;
        let _lock = self.persistence.lock(path, LockMode::Exclusive)?;
        let mut doc = self.load(path, master_password)?;
        mutate(&mut doc)?;
        self.save(path, &doc, master_password)
    }

    /// Fail with `NotFound` before a lock file is created for nothing.
    fn ensure_exists(&self, path: &Path) -> Result<()> {
        if self.persistence.exists(path) {
            Ok(())
        } else {
            Err(ShelterError::NotFound(path.to_path_buf()))
        }
    }

    fn ensure_absent(&self, path: &Path) -> Result<()> {
        if self.persistence.exists(path) {
            Err(ShelterError::AlreadyExists(path.to_path_buf()))
        } else {
            Ok(())
        }
    }

    fn load(&self, path: &Path, master_password: &str) -> Result<VaultDocument> {
        let ciphertext = self.persistence.read(path)?;
        let plaintext = Zeroizing::new(self.cipher.decrypt(&ciphertext, master_password)?);
        let doc = VaultDocument::from_json(&plaintext)?;
        debug!("vault decrypted");
        Ok(doc)
    }

    fn save(&self, path: &Path, doc: &VaultDocument, master_password: &str) -> Result<()> {
        let plaintext = doc.to_json()?;
        let ciphertext = self.cipher.encrypt(&plaintext, master_password)?;
        self.persistence.write(&ciphertext, path)
    }
}
