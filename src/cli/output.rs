//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::collections::BTreeMap;
use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the shell banner with the selected vault, if any.
pub fn banner(selected: Option<&Path>) {
    println!(
        "{}",
        style(format!("pwshelter {}", env!("CARGO_PKG_VERSION"))).bold()
    );
    match selected {
        Some(path) => info(&format!("Vault: {}", path.display())),
        None => tip("Select a vault with `select <file>` or create one with `create <file>`."),
    }
}

/// Print one name per line, or `empty_msg` when there are none.
pub fn print_names(names: &[String], empty_msg: &str) {
    if names.is_empty() {
        info(empty_msg);
        return;
    }
    for name in names {
        println!("{name}");
    }
}

/// Print a table of sources and their accounts.
pub fn print_accounts_table(all: &BTreeMap<String, Vec<String>>) {
    if all.is_empty() {
        info("No accounts in this vault yet.");
        tip("Run `add <source> <account>` to add your first account.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Accounts"]);

    for (source, accounts) in all {
        table.add_row(vec![source.clone(), accounts.join("\n")]);
    }

    println!("{table}");
}
