//! `pwshelter shell` — the interactive command loop.
//!
//! Each line is parsed with `ShellLine`; errors are reported and the loop
//! keeps going.  `exit` or end of input leaves the shell.

use std::io::{self, Write};

use clap::{CommandFactory, Parser};
use console::style;

use crate::cli::output;
use crate::cli::{commands, Session, ShellCommand, ShellLine};
use crate::errors::Result;

/// Execute the `shell` command.
pub fn run(session: &mut Session) -> Result<()> {
    output::banner(session.selected());
    output::tip("Type `help` to list commands.");

    loop {
        print!("{} ", style(">>").bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match handle_line(session, &line) {
            Flow::Continue => {}
            Flow::Exit => break,
        }
    }

    output::info("Bye");
    Ok(())
}

/// Whether the loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn handle_line(session: &mut Session, line: &str) -> Flow {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Flow::Continue;
    }

    let command = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            // Clap renders its own usage hints for bad input and `--help`.
            if let Err(io_err) = e.print() {
                output::error(&format!("{e} ({io_err})"));
            }
            return Flow::Continue;
        }
    };

    let result = match command {
        ShellCommand::Exit => return Flow::Exit,
        ShellCommand::Help => {
            print_help(session);
            Ok(())
        }
        ShellCommand::Select { file } => session.select(file).map(|()| {
            output::success("Vault was selected");
        }),
        ShellCommand::Vault(command) => commands::dispatch(session, &command),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
    }
    Flow::Continue
}

fn print_help(session: &Session) {
    match session.selected() {
        Some(path) => output::info(&format!("Vault: {}", path.display())),
        None => output::info("No vault selected. Select a file or create a new one."),
    }
    println!("{}", ShellLine::command().render_help());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn session() -> Session {
        Session::new(Settings::default(), None)
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(handle_line(&mut session(), "   \n"), Flow::Continue);
    }

    #[test]
    fn exit_and_quit_leave() {
        assert_eq!(handle_line(&mut session(), "exit\n"), Flow::Exit);
        assert_eq!(handle_line(&mut session(), "quit"), Flow::Exit);
    }

    #[test]
    fn errors_keep_the_loop_running() {
        let mut session = session();
        assert_eq!(handle_line(&mut session, "bogus"), Flow::Continue);
        assert_eq!(handle_line(&mut session, "sources"), Flow::Continue);
        assert_eq!(
            handle_line(&mut session, "select /definitely/not/here.vault"),
            Flow::Continue
        );
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn clap_help_and_usage_errors_keep_the_loop_running() {
        let mut session = session();
        assert_eq!(handle_line(&mut session, "add --help"), Flow::Continue);
        assert_eq!(handle_line(&mut session, "password gmail"), Flow::Continue);
    }
}
