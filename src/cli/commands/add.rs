//! `pwshelter add` — add a new account to the vault.

use crate::cli::output;
use crate::cli::{prompt_master_password, prompt_new_password, Session};
use crate::errors::Result;
use crate::vault::validate_name;

/// Execute the `add` command.
pub fn execute(session: &mut Session, source: &str, account: &str) -> Result<()> {
    validate_name("source", source)?;
    validate_name("account", account)?;
    let path = session.vault_path()?;

    let password = prompt_new_password(&format!("Password for {account} at {source}"), 1)?;
    let master = prompt_master_password()?;

    session
        .store()
        .add_account(&path, source, account, &password, &master)?;

    output::success(&format!("Account '{account}' added to '{source}'"));
    Ok(())
}
