//! Directory Module
//!
//! Couples the contact index with its persistence mirror.
//!
//! ## Responsibilities
//! - Rebuild the index from the mirror on open
//! - Validate input before it reaches the index
//! - Forward accepted mutations to the mirror
//! - Route shell commands

use std::io;

use crate::config::Config;
use crate::error::{DirectoryError, Result};
use crate::index::{Contact, ContactIndex, DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::protocol::{Command, Response};
use crate::storage::{validate_field, LoadReport, Mirror, NullMirror, TextFileMirror};

/// A contact directory
///
/// ## Mutation order
/// validate → index → mirror.
///
/// The mirror is only told about mutations the index accepted. If the
/// mirror then fails the index keeps the change and the call returns
/// [`DirectoryError::MirrorDiverged`].
///
/// ## Concurrency
/// None. A directory belongs to one caller; wrap it in a lock to share it.
pub struct Directory<M: Mirror = TextFileMirror> {
    /// In-memory ordered index
    index: ContactIndex,

    /// Durable copy of the index's logical content
    mirror: M,

    /// What the initial load found
    load_report: LoadReport,
}

impl Directory<TextFileMirror> {
    /// Open or create a directory backed by the configured text file
    ///
    /// On startup:
    /// 1. Open/create the data file
    /// 2. Read every record in file order
    /// 3. Insert each into the index (first occurrence of a name wins)
    pub fn open(config: Config) -> Result<Self> {
        let mirror = TextFileMirror::open(&config)?;
        Self::with_mirror(mirror)
    }
}

impl Directory<NullMirror> {
    /// A directory that persists nothing
    pub fn in_memory() -> Self {
        Self {
            index: ContactIndex::new(),
            mirror: NullMirror,
            load_report: LoadReport::default(),
        }
    }
}

impl<M: Mirror> Directory<M> {
    /// Build a directory over any mirror, replaying its stored records
    pub fn with_mirror(mut mirror: M) -> Result<Self> {
        let (records, mut load_report) = mirror.load()?;

        let mut index = ContactIndex::new();
        for contact in records {
            if index.insert_contact(contact) == InsertOutcome::AlreadyExists {
                load_report.duplicates += 1;
            }
        }

        if load_report.records_read > 0 || load_report.lines_skipped > 0 {
            tracing::info!(
                "Loaded {} contacts ({} records read, {} lines skipped, {} duplicates)",
                index.len(),
                load_report.records_read,
                load_report.lines_skipped,
                load_report.duplicates
            );
        }

        Ok(Self {
            index,
            mirror,
            load_report,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a contact. An existing name is left as it is.
    pub fn add(&mut self, name: &str, number: &str, group: &str) -> Result<InsertOutcome> {
        validate_field("name", name)?;
        validate_field("number", number)?;
        validate_field("group", group)?;

        let contact = Contact::new(name, number, group);
        let outcome = self.index.insert_contact(contact.clone());
        if outcome == InsertOutcome::Inserted {
            tracing::debug!("Inserted {}", name);
            let result = self.mirror.record_insert(&contact);
            Self::check_mirror("insert", result)?;
        }
        Ok(outcome)
    }

    /// Change the number of an existing contact
    pub fn update_number(&mut self, name: &str, number: &str) -> Result<UpdateOutcome> {
        validate_field("number", number)?;

        let outcome = self.index.update_number(name, number);
        if outcome == UpdateOutcome::Updated {
            tracing::debug!("Updated number of {}", name);
            let result = self.mirror.record_update(name, number);
            Self::check_mirror("update", result)?;
        }
        Ok(outcome)
    }

    /// Remove a contact by name
    pub fn remove(&mut self, name: &str) -> Result<DeleteOutcome> {
        let outcome = self.index.remove(name);
        if outcome == DeleteOutcome::Deleted {
            tracing::debug!("Deleted {}", name);
            let result = self.mirror.record_delete(name);
            Self::check_mirror("delete", result)?;
        }
        Ok(outcome)
    }

    /// Remove every contact and truncate storage
    pub fn clear(&mut self) -> Result<()> {
        let count = self.index.len();
        self.index.clear();
        tracing::debug!("Cleared {} contacts", count);
        let result = self.mirror.record_clear();
        Self::check_mirror("clear", result)
    }

    /// Rewrite storage from the index, in name order.
    ///
    /// Drops duplicate and malformed lines left over from earlier runs.
    pub fn compact(&mut self) -> Result<()> {
        let result = self.mirror.rewrite(&mut self.index.iter());
        Self::check_mirror("compact", result)?;
        self.load_report = LoadReport::default();
        tracing::info!("Compacted contact file to {} records", self.index.len());
        Ok(())
    }

    /// Sync storage and consume the directory
    pub fn close(mut self) -> Result<()> {
        self.mirror.sync()?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.index.get(name)
    }

    /// Linear scan by number
    pub fn find_by_number(&self, number: &str) -> Option<&Contact> {
        self.index.find_by_number(number)
    }

    /// Every contact in name order
    pub fn list(&self) -> Vec<&Contact> {
        self.index.iter().collect()
    }

    pub fn filter_group(&self, group: &str) -> Vec<&Contact> {
        self.index.filter_group(group).collect()
    }

    pub fn search_partial(&self, fragment: &str) -> Vec<&Contact> {
        self.index.search_partial(fragment).collect()
    }

    // =========================================================================
    // Command Routing
    // =========================================================================

    /// Execute a shell command
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        let response = match command {
            Command::Add {
                name,
                number,
                group,
            } => match self.add(&name, &number, &group)? {
                InsertOutcome::Inserted => Response::Added(Contact::new(name, number, group)),
                InsertOutcome::AlreadyExists => Response::AlreadyExists(name),
            },
            Command::Find { name } => match self.get(&name) {
                Some(contact) => Response::Found(contact.clone()),
                None => Response::NotFound,
            },
            Command::FindNumber { number } => match self.find_by_number(&number) {
                Some(contact) => Response::Found(contact.clone()),
                None => Response::NotFound,
            },
            Command::List => Response::Listing(self.list().into_iter().cloned().collect()),
            Command::Update { name, number } => match self.update_number(&name, &number)? {
                UpdateOutcome::Updated => Response::Updated { name, number },
                UpdateOutcome::NotFound => Response::NotFound,
            },
            Command::Delete { name } => match self.remove(&name)? {
                DeleteOutcome::Deleted => Response::Deleted(name),
                DeleteOutcome::NotFound => Response::NotFound,
            },
            Command::Group { group } => {
                let members = self.filter_group(&group).into_iter().cloned().collect();
                Response::GroupMembers { group, members }
            }
            Command::Search { fragment } => {
                Response::PartialMatches(self.search_partial(&fragment).into_iter().cloned().collect())
            }
            Command::Clear => {
                self.clear()?;
                Response::Cleared
            }
            Command::Compact => {
                self.compact()?;
                Response::Compacted(self.len())
            }
            Command::Help => Response::Help,
            Command::Quit => Response::Goodbye,
        };
        Ok(response)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Read access to the underlying index
    pub fn index(&self) -> &ContactIndex {
        &self.index
    }

    /// What the initial load found (reset by `compact`)
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_mirror(operation: &'static str, result: io::Result<()>) -> Result<()> {
        result.map_err(|source| {
            tracing::error!("Failed to persist {}: {}", operation, source);
            DirectoryError::MirrorDiverged { operation, source }
        })
    }
}
