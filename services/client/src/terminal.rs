//! Line-oriented front-end: renders the view as text and parses commands.

use std::fmt::Write as _;

use crate::api::DirectoryApi;
use crate::view::DirectoryView;

pub const HELP: &str = "commands: name <text> | email <text> | submit | edit <n> | cancel | delete <n> | list | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Email(String),
    Submit,
    Edit(usize),
    Cancel,
    Delete(usize),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs a row number starting at 1")]
    BadIndex(String),
}

impl Command {
    /// Parse one input line. Row numbers are 1-based as displayed.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let row = |verb: &str| -> Result<usize, CommandError> {
            rest.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| CommandError::BadIndex(verb.to_string()))
        };
        match word {
            "name" => Ok(Command::Name(rest.to_string())),
            "email" => Ok(Command::Email(rest.to_string())),
            "submit" | "save" => Ok(Command::Submit),
            "edit" => Ok(Command::Edit(row("edit")?)),
            "cancel" => Ok(Command::Cancel),
            "delete" | "rm" => Ok(Command::Delete(row("delete")?)),
            "list" | "" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Apply `command` to the view. Returns false when the session should end.
pub async fn apply<A: DirectoryApi>(view: &mut DirectoryView<A>, command: Command) -> bool {
    match command {
        Command::Name(name) => view.set_name(name),
        Command::Email(email) => view.set_email(email),
        Command::Submit => view.submit().await,
        Command::Edit(index) => {
            if !view.begin_edit(index) {
                tracing::warn!(row = index + 1, "no such row");
            }
        }
        Command::Cancel => view.cancel_edit(),
        Command::Delete(index) => {
            if !view.delete(index).await {
                tracing::warn!(row = index + 1, "no such row");
            }
        }
        Command::List | Command::Help => {}
        Command::Quit => return false,
    }
    true
}

pub fn render<A: DirectoryApi>(view: &DirectoryView<A>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "User Management");
    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {error}");
    }
    let form = view.form();
    let _ = writeln!(out, "Name:  {}", form.name);
    let _ = writeln!(out, "Email: {}", form.email);
    match view.editing_id() {
        Some(id) => {
            let _ = writeln!(out, "[submit: Update User #{id}] [cancel]");
        }
        None => {
            let _ = writeln!(out, "[submit: Add User]");
        }
    }
    if view.users().is_empty() {
        let _ = writeln!(out, "(no users)");
    }
    for (row, user) in view.users().iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {} ({})", row + 1, user.name, user.email);
    }
    out
}
