//! Response definitions
//!
//! Represents results shown to the shell user.

use std::fmt;

use crate::index::Contact;

use super::CommandType;

/// The result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Added(Contact),

    /// Insert refused; the name is taken
    AlreadyExists(String),

    Found(Contact),

    NotFound,

    /// Every contact, ascending by name
    Listing(Vec<Contact>),

    Updated { name: String, number: String },

    Deleted(String),

    GroupMembers { group: String, members: Vec<Contact> },

    PartialMatches(Vec<Contact>),

    Cleared,

    /// Number of records written
    Compacted(usize),

    Help,

    Goodbye,
}

impl Response {
    /// Whether the shell should stop after this response
    pub fn is_terminal(&self) -> bool {
        matches!(self, Response::Goodbye)
    }
}

struct Line<'a>(&'a Contact);

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} (Group: {})", self.0.name, self.0.number, self.0.group)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Added(c) => write!(f, "Contact added: {}", Line(c)),
            Response::AlreadyExists(name) => write!(f, "Contact already exists: {}", name),
            Response::Found(c) => write!(f, "Contact found: {}", Line(c)),
            Response::NotFound => write!(f, "Contact not found"),
            Response::Listing(contacts) if contacts.is_empty() => {
                write!(f, "Directory is empty")
            }
            Response::Listing(contacts) => {
                write!(f, "Telephone Directory:")?;
                for c in contacts {
                    write!(f, "\n{}", Line(c))?;
                }
                Ok(())
            }
            Response::Updated { name, number } => {
                write!(f, "Contact updated: {} - {}", name, number)
            }
            Response::Deleted(name) => write!(f, "Contact deleted: {}", name),
            Response::GroupMembers { group, members } => {
                write!(f, "Contacts in Group '{}':", group)?;
                for c in members {
                    write!(f, "\n{}", Line(c))?;
                }
                Ok(())
            }
            Response::PartialMatches(matches) => {
                write!(f, "Partial matches found:")?;
                for c in matches {
                    write!(f, "\n{}", Line(c))?;
                }
                Ok(())
            }
            Response::Cleared => write!(f, "Directory cleared successfully."),
            Response::Compacted(count) => write!(f, "Contact file rewritten with {} records", count),
            Response::Help => {
                write!(f, "Commands:")?;
                for command_type in CommandType::all() {
                    write!(f, "\n  {}", command_type.usage())?;
                }
                Ok(())
            }
            Response::Goodbye => write!(f, "Exiting... Thank you!"),
        }
    }
}
