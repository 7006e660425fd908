//! `pwshelter password` — retrieve one account password.

use crate::cli::output;
use crate::cli::{prompt_master_password, Session};
use crate::errors::Result;
use crate::vault::validate_name;

/// Execute the `password` command.
///
/// Copies to the clipboard unless `print` is set or the clipboard is
/// disabled in `.pwshelter.toml`.
pub fn execute(session: &mut Session, source: &str, account: &str, print: bool) -> Result<()> {
    validate_name("source", source)?;
    validate_name("account", account)?;
    let path = session.vault_path()?;
    let master = prompt_master_password()?;

    let password = session
        .store()
        .get_password(&path, source, account, &master)?;

    if print || !session.settings().clipboard {
        println!("{}", password.as_str());
    } else {
        session.copy_to_clipboard(&password)?;
        output::success("Password was copied to clipboard");
    }
    Ok(())
}
