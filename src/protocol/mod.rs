//! Protocol Module
//!
//! The line-oriented command language spoken by the interactive shell.
//!
//! ### Commands
//! ```text
//! add NAME NUMBER GROUP     insert a contact
//! find NAME                 point lookup by name
//! number NUMBER             linear scan by number
//! list                      every contact, ascending by name
//! update NAME NUMBER        change a contact's number
//! delete NAME               remove a contact
//! group GROUP               contacts in a group
//! search FRAGMENT           names containing FRAGMENT
//! clear                     remove everything
//! compact                   rewrite the data file in name order
//! help                      show this list
//! quit | exit               leave the shell
//! ```
//!
//! Verbs are case-insensitive; arguments are whitespace separated.

mod command;
mod response;

pub use command::{Command, CommandType};
pub use response::Response;
