//! Storage Module
//!
//! Persistence mirror for the contact index.
//!
//! ## Responsibilities
//! - Rebuild input on startup (every stored record, in file order)
//! - Reflect each accepted index mutation in durable storage
//! - Whole-file rewrite for compaction
//!
//! A mirror never sees tree structure; it only receives the payload of a
//! mutation the index has already committed.
//!
//! ## File Format (text)
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Alice 555-2 Work\n                   │
//! │ Bob 555-1 Friends\n                  │
//! │ ... one record per line              │
//! └──────────────────────────────────────┘
//! ```
//! Three whitespace-separated fields: name, number, group.

mod null;
mod record;
mod text_file;

pub use null::NullMirror;
pub use record::{format_record, parse_line, validate_field};
pub use text_file::TextFileMirror;

use std::io;

use crate::error::Result;
use crate::index::Contact;

/// Statistics from loading a mirror at startup
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Well-formed records read from storage
    pub records_read: u64,

    /// Malformed lines that were skipped
    pub lines_skipped: u64,

    /// Records whose name was already loaded (first occurrence wins)
    pub duplicates: u64,
}

/// Durable storage that follows the index
///
/// Every `record_*` call happens after the index has applied the change.
/// A failure leaves storage behind the index; nothing is rolled back.
pub trait Mirror {
    /// Read every stored record in storage order
    fn load(&mut self) -> Result<(Vec<Contact>, LoadReport)>;

    /// A new contact was inserted
    fn record_insert(&mut self, contact: &Contact) -> io::Result<()>;

    /// The number of `name` changed; its group and all other records stay as they are
    fn record_update(&mut self, name: &str, number: &str) -> io::Result<()>;

    /// `name` was removed
    fn record_delete(&mut self, name: &str) -> io::Result<()>;

    /// Every contact was removed
    fn record_clear(&mut self) -> io::Result<()>;

    /// Replace all stored records with `contacts`, in the given order
    fn rewrite(&mut self, contacts: &mut dyn Iterator<Item = &Contact>) -> io::Result<()>;

    /// Force buffered state to durable storage
    fn sync(&mut self) -> io::Result<()>;
}
