//! `pwshelter change` — replace an account password.

use crate::cli::output;
use crate::cli::{prompt_master_password, prompt_new_password, Session};
use crate::errors::Result;
use crate::vault::validate_name;

/// Execute the `change` command.
pub fn execute(session: &mut Session, source: &str, account: &str) -> Result<()> {
    validate_name("source", source)?;
    validate_name("account", account)?;
    let path = session.vault_path()?;

    let password = prompt_new_password(&format!("New password for {account} at {source}"), 1)?;
    let master = prompt_master_password()?;

    session
        .store()
        .change_password(&path, source, account, &password, &master)?;

    output::success("Password was changed");
    Ok(())
}
