//! Command implementations.  Each `execute` takes the session explicitly.

pub mod add;
pub mod change;
pub mod change_master;
pub mod completions;
pub mod create;
pub mod delete;
pub mod list;
pub mod password;
pub mod shell;
pub mod transcode;

use crate::cli::{Session, VaultCommand};
use crate::errors::Result;

/// Run one vault command against the session.
pub fn dispatch(session: &mut Session, command: &VaultCommand) -> Result<()> {
    match command {
        VaultCommand::Create { file } => create::execute(session, file.as_deref()),
        VaultCommand::Encrypt { input, output } => transcode::encrypt(session, input, output),
        VaultCommand::Decrypt { input, output } => transcode::decrypt(session, input, output),
        VaultCommand::Sources => list::sources(session),
        VaultCommand::AllAccounts => list::all_accounts(session),
        VaultCommand::Accounts { source } => list::accounts(session, source),
        VaultCommand::Password {
            source,
            account,
            print,
        } => password::execute(session, source, account, *print),
        VaultCommand::Add { source, account } => add::execute(session, source, account),
        VaultCommand::Change { source, account } => change::execute(session, source, account),
        VaultCommand::Delete {
            source,
            account,
            force,
        } => delete::execute(session, source, account, *force),
        VaultCommand::ChangeMaster => change_master::execute(session),
    }
}
