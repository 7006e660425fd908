//! `pwshelter sources` / `all-accounts` / `accounts` — read-only listings.

use crate::cli::output;
use crate::cli::{prompt_master_password, Session};
use crate::errors::Result;
use crate::vault::validate_name;

/// Execute the `sources` command.
pub fn sources(session: &mut Session) -> Result<()> {
    let path = session.vault_path()?;
    let master = prompt_master_password()?;

    let sources = session.store().list_sources(&path, &master)?;
    output::print_names(&sources, "No sources in this vault yet.");
    Ok(())
}

/// Execute the `all-accounts` command.
pub fn all_accounts(session: &mut Session) -> Result<()> {
    let path = session.vault_path()?;
    let master = prompt_master_password()?;

    let all = session.store().list_all_accounts(&path, &master)?;
    output::print_accounts_table(&all);
    Ok(())
}

/// Execute the `accounts` command.
pub fn accounts(session: &mut Session, source: &str) -> Result<()> {
    validate_name("source", source)?;
    let path = session.vault_path()?;
    let master = prompt_master_password()?;

    let accounts = session.store().list_accounts(&path, source, &master)?;
    output::print_names(&accounts, "No accounts under this source.");
    Ok(())
}
