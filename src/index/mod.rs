//! Index Module
//!
//! Ordered in-memory index of contacts, keyed by name.
//!
//! ## Responsibilities
//! - Logarithmic insert, lookup, update and delete by name
//! - Ascending-name enumeration (and the linear scans built on it)
//! - Keeping the AVL height-balance invariant after every mutation
//!
//! ## Data Structure Choice
//! An AVL tree of owned boxes. Every node exclusively owns its children;
//! mutating operations take a subtree by value and hand back its (possibly
//! new) root, so rotations never need aliasing.
//!
//! ```text
//!          Bob(2)
//!         /      \
//!    Alice(1)   Carl(1)
//! ```
//!
//! The index knows nothing about files. Callers learn what happened from
//! the returned outcome and forward accepted mutations to a
//! [`crate::storage::Mirror`].

mod node;
mod tree;

pub use tree::{ContactIndex, Iter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contact record as stored in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique key
    pub name: String,

    /// Phone number (mutable via `update_number`)
    pub number: String,

    /// Group label, fixed at insertion
    pub group: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            group: group.into(),
        }
    }
}

/// Result of `ContactIndex::insert`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The key was present; the stored payload was left untouched
    AlreadyExists,
}

/// Result of `ContactIndex::update_number`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Result of `ContactIndex::remove`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// A broken structural invariant, reported by `ContactIndex::check_invariants`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("keys out of order: {left:?} is not below {right:?}")]
    Order { left: String, right: String },

    #[error("node {name:?} has balance factor {balance}")]
    Balance { name: String, balance: i64 },

    #[error("node {name:?} caches height {cached}, actual {actual}")]
    Height {
        name: String,
        cached: usize,
        actual: usize,
    },

    #[error("len is {recorded} but the tree holds {counted} nodes")]
    Count { recorded: usize, counted: usize },
}
