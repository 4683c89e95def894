//! Mirror that stores nothing

use std::io;

use crate::error::Result;
use crate::index::Contact;

use super::{LoadReport, Mirror};

/// Accepts every mutation and persists none of them.
///
/// Backs `Directory::in_memory`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMirror;

impl Mirror for NullMirror {
    fn load(&mut self) -> Result<(Vec<Contact>, LoadReport)> {
        Ok((Vec::new(), LoadReport::default()))
    }

    fn record_insert(&mut self, _contact: &Contact) -> io::Result<()> {
        Ok(())
    }

    fn record_update(&mut self, _name: &str, _number: &str) -> io::Result<()> {
        Ok(())
    }

    fn record_delete(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn record_clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn rewrite(&mut self, _contacts: &mut dyn Iterator<Item = &Contact>) -> io::Result<()> {
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}
