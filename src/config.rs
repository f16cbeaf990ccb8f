// File: src/config.rs
//! Layered configuration. `defaults/lingo.default.toml` is embedded in the
//! binary; user files and CLI overrides are stacked on top with [`Loader`].

use crate::error::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/lingo.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct LingoConfig {
    pub files: FilesConfig,
    pub lock_release: LockReleaseConfig,
    pub search: SearchConfig,
}

/// Where each persisted artifact lives.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    pub record: PathBuf,
    pub document: PathBuf,
    pub irregulars: PathBuf,
    pub lexicon: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockReleaseConfig {
    pub commands: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub max_suggestions: usize,
    pub max_edit_distance: usize,
}

impl LingoConfig {
    /// The embedded defaults alone.
    pub fn defaults() -> Result<Self> {
        Loader::new().build()
    }

    /// Rebases every relative file path onto `dir`.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        let files = &mut self.files;
        for path in [
            &mut files.record,
            &mut files.document,
            &mut files.irregulars,
            &mut files.lexicon,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LingoConfig> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
