// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = VocabError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VocabError {
    /// A blank sentence or search term.
    #[error("Input is empty")]
    EmptyInput,

    /// A file the user asked to view does not exist yet.
    #[error("File not found: {}", path.display())]
    MissingResource { path: PathBuf },

    /// The atomic write still failed after releasing external locks.
    #[error("Could not save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed vocabulary record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed compiled lexicon: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}
