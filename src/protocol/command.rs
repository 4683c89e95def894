//! Command definitions
//!
//! Represents commands typed into the shell.

use std::str::FromStr;

use crate::error::{DirectoryError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Add,
    Find,
    FindNumber,
    List,
    Update,
    Delete,
    Group,
    Search,
    Clear,
    Compact,
    Help,
    Quit,
}

impl CommandType {
    /// Verb and argument names, used for usage messages
    pub fn usage(&self) -> &'static str {
        match self {
            CommandType::Add => "add NAME NUMBER GROUP",
            CommandType::Find => "find NAME",
            CommandType::FindNumber => "number NUMBER",
            CommandType::List => "list",
            CommandType::Update => "update NAME NUMBER",
            CommandType::Delete => "delete NAME",
            CommandType::Group => "group GROUP",
            CommandType::Search => "search FRAGMENT",
            CommandType::Clear => "clear",
            CommandType::Compact => "compact",
            CommandType::Help => "help",
            CommandType::Quit => "quit",
        }
    }

    /// Every command type, in help order
    pub fn all() -> &'static [CommandType] {
        &[
            CommandType::Add,
            CommandType::Find,
            CommandType::FindNumber,
            CommandType::List,
            CommandType::Update,
            CommandType::Delete,
            CommandType::Group,
            CommandType::Search,
            CommandType::Clear,
            CommandType::Compact,
            CommandType::Help,
            CommandType::Quit,
        ]
    }

    fn from_verb(verb: &str) -> Option<Self> {
        let command_type = match verb.to_ascii_lowercase().as_str() {
            "add" => CommandType::Add,
            "find" => CommandType::Find,
            "number" => CommandType::FindNumber,
            "list" => CommandType::List,
            "update" => CommandType::Update,
            "delete" => CommandType::Delete,
            "group" => CommandType::Group,
            "search" => CommandType::Search,
            "clear" => CommandType::Clear,
            "compact" => CommandType::Compact,
            "help" => CommandType::Help,
            "quit" | "exit" => CommandType::Quit,
            _ => return None,
        };
        Some(command_type)
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a contact
    Add {
        name: String,
        number: String,
        group: String,
    },

    /// Look up a contact by name
    Find { name: String },

    /// Look up a contact by number (linear scan)
    FindNumber { number: String },

    /// List every contact
    List,

    /// Change a contact's number
    Update { name: String, number: String },

    /// Remove a contact
    Delete { name: String },

    /// List the contacts in a group
    Group { group: String },

    /// List contacts whose name contains a fragment
    Search { fragment: String },

    /// Remove every contact
    Clear,

    /// Rewrite the data file
    Compact,

    Help,

    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command_type = CommandType::from_verb(verb)
            .ok_or_else(|| DirectoryError::Command(format!("unknown command {:?}", verb)))?;
        let args: Vec<String> = words.map(str::to_string).collect();

        let command = match (command_type, args.as_slice()) {
            (CommandType::Add, [name, number, group]) => Command::Add {
                name: name.clone(),
                number: number.clone(),
                group: group.clone(),
            },
            (CommandType::Find, [name]) => Command::Find { name: name.clone() },
            (CommandType::FindNumber, [number]) => Command::FindNumber {
                number: number.clone(),
            },
            (CommandType::List, []) => Command::List,
            (CommandType::Update, [name, number]) => Command::Update {
                name: name.clone(),
                number: number.clone(),
            },
            (CommandType::Delete, [name]) => Command::Delete { name: name.clone() },
            (CommandType::Group, [group]) => Command::Group {
                group: group.clone(),
            },
            (CommandType::Search, [fragment]) => Command::Search {
                fragment: fragment.clone(),
            },
            (CommandType::Clear, []) => Command::Clear,
            (CommandType::Compact, []) => Command::Compact,
            (CommandType::Help, []) => Command::Help,
            (CommandType::Quit, []) => Command::Quit,
            (command_type, _) => {
                return Err(DirectoryError::Command(format!(
                    "usage: {}",
                    command_type.usage()
                )))
            }
        };

        Ok(Some(command))
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Add { .. } => CommandType::Add,
            Command::Find { .. } => CommandType::Find,
            Command::FindNumber { .. } => CommandType::FindNumber,
            Command::List => CommandType::List,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::Group { .. } => CommandType::Group,
            Command::Search { .. } => CommandType::Search,
            Command::Clear => CommandType::Clear,
            Command::Compact => CommandType::Compact,
            Command::Help => CommandType::Help,
            Command::Quit => CommandType::Quit,
        }
    }
}

impl FromStr for Command {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)?.ok_or_else(|| DirectoryError::Command("empty command".to_string()))
    }
}
