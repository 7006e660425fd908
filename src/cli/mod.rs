//! CLI module — Clap argument parsers, the shell session, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, ShelterError};

pub use session::Session;

/// Minimum master password length to prevent trivially weak passwords.
pub const MIN_MASTER_PASSWORD_LEN: usize = 8;

/// pwshelter: encrypted password shelter.
#[derive(Parser)]
#[command(
    name = "pwshelter",
    about = "Encrypted password shelter",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault file to operate on (default: `default_vault` from .pwshelter.toml)
    #[arg(long, value_name = "VAULT", global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

/// Top-level subcommands.  Without one, the interactive shell starts.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    #[command(flatten)]
    Vault(VaultCommand),
}

/// Commands that work on a vault or on files, available both from the
/// command line and inside the shell.
#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VaultCommand {
    /// Create a new vault file
    Create {
        /// Path of the new vault (default: the selected vault)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Encrypt any text file with a password
    Encrypt {
        /// File to read
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the ciphertext to
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Decrypt a file produced by `encrypt`
    Decrypt {
        /// File to read
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// File to write the plaintext to
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Show the source list
    Sources,

    /// Show every source with its accounts
    AllAccounts,

    /// Show the accounts of a source
    Accounts {
        /// Source name (e.g. gmail)
        source: String,
    },

    /// Copy an account password to the clipboard
    Password {
        source: String,
        account: String,
        /// Print the password to stdout instead of copying it
        #[arg(long)]
        print: bool,
    },

    /// Add a new account
    Add { source: String, account: String },

    /// Change an account password
    Change { source: String, account: String },

    /// Delete an account
    Delete {
        source: String,
        account: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault's master password
    ChangeMaster,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(
    name = "pwshelter",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Shell-only commands plus every `VaultCommand`.
#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    #[command(flatten)]
    Vault(VaultCommand),

    /// Select an existing vault file
    Select {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show this help
    Help,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Parse the program arguments and run the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Some(Commands::Completions { shell }) => return commands::completions::execute(shell),
        other => other,
    };

    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let selected = cli.file.or_else(|| settings.default_vault.clone());
    let mut session = Session::new(settings, selected);

    match command {
        None | Some(Commands::Shell) => commands::shell::run(&mut session),
        Some(Commands::Vault(command)) => commands::dispatch(&mut session, &command),
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Prompt for an existing password (no confirmation).
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| ShelterError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for the vault master password.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    prompt_password("Master password")
}

/// Prompt for a new password with confirmation, re-asking until it is
/// at least `min_len` characters long.
pub fn prompt_new_password(prompt: &str, min_len: usize) -> Result<Zeroizing<String>> {
    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(prompt)
                .with_confirmation("Repeat password", "Passwords do not match, try again")
                .interact()
                .map_err(|e| ShelterError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

/// Prompt for a new master password (confirmed, minimum length enforced).
pub fn prompt_new_master_password() -> Result<Zeroizing<String>> {
    prompt_new_password("New master password", MIN_MASTER_PASSWORD_LEN)
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ShelterError::CommandFailed(format!("confirm prompt: {e}")))
}
