//! `pwshelter encrypt` / `pwshelter decrypt` — password-protect any text
//! file, independent of the vault structure.

use std::path::Path;

use crate::cli::output;
use crate::cli::{confirm, prompt_new_password, prompt_password, Session};
use crate::errors::{Result, ShelterError};

/// Execute the `encrypt` command.
pub fn encrypt(session: &mut Session, input: &Path, output_path: &Path) -> Result<()> {
    check_paths(input, output_path)?;

    let password = prompt_new_password("File password", 1)?;
    session
        .store()
        .encrypt_file(input, output_path, &password)?;

    output::success(&format!(
        "Encrypted {} to {}",
        input.display(),
        output_path.display()
    ));
    Ok(())
}

/// Execute the `decrypt` command.
pub fn decrypt(session: &mut Session, input: &Path, output_path: &Path) -> Result<()> {
    check_paths(input, output_path)?;

    let password = prompt_password("File password")?;
    session
        .store()
        .decrypt_file(input, output_path, &password)?;

    output::success(&format!(
        "Decrypted {} to {}",
        input.display(),
        output_path.display()
    ));
    output::warning(&format!(
        "{} now holds plaintext; delete it when done.",
        output_path.display()
    ));
    Ok(())
}

/// The input must exist; an existing output is only replaced after
/// confirmation.
fn check_paths(input: &Path, output_path: &Path) -> Result<()> {
    if !input.exists() {
        return Err(ShelterError::NotFound(input.to_path_buf()));
    }
    if output_path.exists()
        && !confirm(&format!("Overwrite {}?", output_path.display()))?
    {
        return Err(ShelterError::UserCancelled);
    }
    Ok(())
}
