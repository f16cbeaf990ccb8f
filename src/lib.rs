// src/lib.rs

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod fuzzy;
pub mod irregular;
pub mod learning;
pub mod lexicon;
pub mod notebook;
pub mod persistence;
pub mod record;

pub use crate::config::LingoConfig;
pub use crate::error::{Result, VocabError};
pub use crate::notebook::{AddOutcome, Notebook, SearchOutcome};
