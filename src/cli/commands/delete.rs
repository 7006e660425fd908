//! `pwshelter delete` — remove an account from the vault.

use crate::cli::output;
use crate::cli::{confirm, prompt_master_password, Session};
use crate::errors::Result;
use crate::vault::validate_name;

/// Execute the `delete` command.
pub fn execute(session: &mut Session, source: &str, account: &str, force: bool) -> Result<()> {
    validate_name("source", source)?;
    validate_name("account", account)?;
    let path = session.vault_path()?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete account '{account}' from '{source}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let master = prompt_master_password()?;
    session
        .store()
        .delete_account(&path, source, account, &master)?;

    output::success(&format!("Deleted account '{account}' from '{source}'"));
    Ok(())
}
