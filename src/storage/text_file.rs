//! Text file mirror
//!
//! Appends inserts; rewrites the whole file through a temp file for
//! updates, deletes and compaction; truncates on clear.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, SyncStrategy};
use crate::error::{DirectoryError, Result};
use crate::index::Contact;

use super::record::{format_record, parse_line};
use super::{LoadReport, Mirror};

/// Mirror backed by a flat `name number group` text file
#[derive(Debug)]
pub struct TextFileMirror {
    /// The data file
    path: PathBuf,

    /// Scratch file renamed over `path` after a rewrite
    temp_path: PathBuf,

    sync_strategy: SyncStrategy,
}

impl TextFileMirror {
    /// Open the mirror described by `config`.
    ///
    /// A missing file is created empty when `create_if_missing` is set,
    /// otherwise it is a configuration error.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.data_file.clone();

        if !path.exists() {
            if !config.create_if_missing {
                return Err(DirectoryError::Config(format!(
                    "data file {} does not exist",
                    path.display()
                )));
            }

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            tracing::info!("Created new contact file {}", path.display());
        }

        Ok(Self {
            temp_path: config.temp_file(),
            path,
            sync_strategy: config.sync_strategy,
        })
    }

    /// Get the data file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Stream every line through `edit` into the temp file, then rename it
    /// over the data file.
    ///
    /// `edit` sees each well-formed record and returns what to write
    /// (`None` drops it). Malformed or undecodable lines are carried over
    /// byte for byte.
    fn rewrite_with<F>(&mut self, mut edit: F) -> io::Result<()>
    where
        F: FnMut(Contact) -> Option<Contact>,
    {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut writer = BufWriter::new(File::create(&self.temp_path)?);
        let mut raw = Vec::new();
        let mut line_no = 0;

        while read_raw_line(&mut reader, &mut raw)? {
            line_no += 1;
            let parsed = std::str::from_utf8(&raw)
                .ok()
                .and_then(|line| parse_line(line, line_no).ok());

            match parsed {
                Some(Some(contact)) => {
                    if let Some(c) = edit(contact) {
                        writer.write_all(format_record(&c.name, &c.number, &c.group).as_bytes())?;
                    }
                }
                Some(None) => {}
                None => {
                    writer.write_all(&raw)?;
                    writer.write_all(b"\n")?;
                }
            }
        }

        self.replace_with_temp(writer)
    }

    /// Whether the data file is non-empty and its last byte is not `\n`
    fn missing_final_newline(&self) -> io::Result<bool> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if file.metadata()?.len() == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }

    fn replace_with_temp(&mut self, writer: BufWriter<File>) -> io::Result<()> {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_all()?;
        }
        drop(file);

        fs::rename(&self.temp_path, &self.path)
    }

    fn maybe_sync(&self, file: &File) -> io::Result<()> {
        match self.sync_strategy {
            SyncStrategy::EveryWrite => file.sync_data(),
            SyncStrategy::OnClose => Ok(()),
        }
    }
}

impl Mirror for TextFileMirror {
    fn load(&mut self) -> Result<(Vec<Contact>, LoadReport)> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut contacts = Vec::new();
        let mut report = LoadReport::default();
        let mut raw = Vec::new();
        let mut line_no = 0;

        while read_raw_line(&mut reader, &mut raw)? {
            line_no += 1;
            let parsed = match std::str::from_utf8(&raw) {
                Ok(line) => parse_line(line, line_no),
                Err(_) => Err(DirectoryError::InvalidRecord {
                    line: line_no,
                    reason: "not valid UTF-8".to_string(),
                }),
            };

            match parsed {
                Ok(Some(contact)) => {
                    report.records_read += 1;
                    contacts.push(contact);
                }
                Ok(None) => {}
                Err(e) => {
                    report.lines_skipped += 1;
                    tracing::warn!("Skipping record in {}: {}", self.path.display(), e);
                }
            }
        }

        Ok((contacts, report))
    }

    fn record_insert(&mut self, contact: &Contact) -> io::Result<()> {
        // A torn or hand-edited last line must not swallow the new record
        let separator = self.missing_final_newline()?;
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        if separator {
            file.write_all(b"\n")?;
        }
        file.write_all(format_record(&contact.name, &contact.number, &contact.group).as_bytes())?;
        self.maybe_sync(&file)
    }

    fn record_update(&mut self, name: &str, number: &str) -> io::Result<()> {
        self.rewrite_with(|mut contact| {
            if contact.name == name {
                contact.number = number.to_string();
            }
            Some(contact)
        })
    }

    fn record_delete(&mut self, name: &str) -> io::Result<()> {
        self.rewrite_with(|contact| (contact.name != name).then_some(contact))
    }

    fn record_clear(&mut self) -> io::Result<()> {
        let file = File::create(&self.path)?;
        self.maybe_sync(&file)
    }

    fn rewrite(&mut self, contacts: &mut dyn Iterator<Item = &Contact>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.temp_path)?);
        for c in contacts {
            writer.write_all(format_record(&c.name, &c.number, &c.group).as_bytes())?;
        }
        self.replace_with_temp(writer)
    }

    fn sync(&mut self) -> io::Result<()> {
        OpenOptions::new().append(true).open(&self.path)?.sync_all()
    }
}

/// Read one line into `buf` without its `\n` (or `\r\n`).
///
/// Returns `false` at end of file.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}
