//! `pwshelter change-master` — change the vault master password.
//!
//! The document is decrypted with the old password and re-encrypted
//! under the new one (fresh salt and nonce), then written atomically.

use crate::cli::output;
use crate::cli::{prompt_new_master_password, prompt_password, Session};
use crate::errors::Result;

/// Execute the `change-master` command.
pub fn execute(session: &mut Session) -> Result<()> {
    let path = session.vault_path()?;

    let old_master = prompt_password("Old master password")?;
    let new_master = prompt_new_master_password()?;

    session
        .store()
        .change_master_password(&path, &old_master, &new_master)?;

    output::success("Master password was changed");
    Ok(())
}
