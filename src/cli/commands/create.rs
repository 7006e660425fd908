//! `pwshelter create` — create a new, empty vault and select it.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_new_master_password, Session};
use crate::errors::{Result, ShelterError};

/// Execute the `create` command.
pub fn execute(session: &mut Session, file: Option<&Path>) -> Result<()> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => session
            .selected()
            .map(Path::to_path_buf)
            .ok_or(ShelterError::NoVaultSelected)?,
    };

    // 1. Refuse before prompting if the file is already there.
    if path.exists() {
        output::tip("Use `select <file>` to open an existing vault.");
        return Err(ShelterError::AlreadyExists(path));
    }

    // 2. Create the parent directory if it doesn't exist.
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created directory: {}", dir.display()));
        }
    }

    // 3. Prompt for the master password (with confirmation) and write the vault.
    let master = prompt_new_master_password()?;
    session.store().create_vault(&path, &master)?;

    output::success(&format!("Vault created at {}", path.display()));
    session.select_created(path);

    output::tip("Run `add <source> <account>` to add an account.");
    Ok(())
}
