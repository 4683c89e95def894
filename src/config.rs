//! Configuration for contactdex
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a directory instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Flat text file mirroring the index, one `name number group` per line.
    /// Rewrites go through a sibling `{data_file}.tmp` that is renamed over it.
    pub data_file: PathBuf,

    /// Create the data file (and its parent directory) when it is missing
    pub create_if_missing: bool,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to fsync the data file
    pub sync_strategy: SyncStrategy,
}

/// File sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every accepted mutation (safest, slowest)
    EveryWrite,

    /// fsync only on explicit sync / close
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./contacts.txt"),
            create_if_missing: true,
            sync_strategy: SyncStrategy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the scratch file used for whole-file rewrites
    pub fn temp_file(&self) -> PathBuf {
        let mut name = self
            .data_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "contacts.txt".into());
        name.push(".tmp");
        self.data_file.with_file_name(name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Create the data file when missing (default: true)
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
