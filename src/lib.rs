//! # contactdex
//!
//! A contact directory with:
//! - An AVL-balanced index keyed by name (O(log n) insert/lookup/update/delete)
//! - Ordered enumeration and linear scans by group, number and name fragment
//! - A flat text file mirroring every accepted mutation
//! - An interactive shell and a one-shot CLI
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI / Shell (Command, Response)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Directory                             │
//! │              (validate → index → mirror)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ContactIndex │          │   Mirror    │
//!   │  (AVL tree) │          │ (text file) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! The index never touches the file and the mirror never sees the tree;
//! the directory passes each operation's outcome from one to the other.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod storage;
pub mod protocol;
pub mod directory;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DirectoryError, Result};
pub use config::Config;
pub use directory::Directory;
pub use index::{Contact, ContactIndex, DeleteOutcome, InsertOutcome, UpdateOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of contactdex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
