// File: src/document.rs
use crate::core::resolver::BaseFormResolver;
use crate::core::tokenizer::{annotation_spans, tokenize};
use crate::core::types::BaseForm;
use crate::error::Result;
use crate::lexicon::LexicalLookup;
use crate::persistence::{write_atomic, LockRelease};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

pub const TITLE: &str = "# Highlighted Vocabulary Notes";

static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\.").unwrap());
static CHUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// A piece of a sentence, emphasized when it carries a new word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub emphasized: bool,
}

/// Splits `sentence` on whitespace and marks every chunk holding a token
/// that resolves to one of `new_words`. Text inside `[...]` never counts,
/// so tokens here are exactly the ones the classifier saw.
pub fn highlight_runs<L: LexicalLookup + ?Sized>(
    sentence: &str,
    new_words: &HashSet<BaseForm>,
    resolver: &BaseFormResolver<'_, L>,
) -> Vec<Run> {
    let annotations = annotation_spans(sentence);
    CHUNK
        .find_iter(sentence)
        .map(|chunk| {
            let visible: String = chunk
                .as_str()
                .char_indices()
                .filter(|(i, _)| {
                    let at = chunk.start() + i;
                    !annotations.iter().any(|span| span.contains(&at))
                })
                .map(|(_, c)| c)
                .collect();
            let emphasized = tokenize(&visible)
                .iter()
                .any(|token| new_words.contains(&resolver.resolve_token(token)));
            Run {
                text: chunk.as_str().to_string(),
                emphasized,
            }
        })
        .collect()
}

/// Bold plus highlight in Markdown.
fn render_runs(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| {
            if run.emphasized {
                format!("**=={}==**", run.text)
            } else {
                run.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbered sentence paragraphs under a fixed title.
#[derive(Debug, Clone, Default)]
pub struct HighlightedDocument {
    paragraphs: Vec<String>,
}

impl HighlightedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the Markdown file; a file that does not exist yet is an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join("\n"));
                    current.clear();
                }
            } else if line.trim() != TITLE {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
        }
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// One past the largest `<n>.` prefix in use.
    pub fn next_number(&self) -> u64 {
        self.paragraphs
            .iter()
            .filter_map(|p| NUMBER_PREFIX.captures(p))
            .filter_map(|c| c[1].parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Appends the sentence as the next numbered paragraph and returns its number.
    pub fn append_sentence(&mut self, runs: &[Run]) -> u64 {
        let number = self.next_number();
        self.paragraphs
            .push(format!("{number}. {}", render_runs(runs)));
        number
    }

    pub fn render(&self) -> String {
        let mut out = String::from(TITLE);
        out.push('\n');
        for paragraph in &self.paragraphs {
            out.push('\n');
            out.push_str(paragraph);
            out.push('\n');
        }
        out
    }

    pub fn save(&self, path: &Path, lock: &dyn LockRelease) -> Result<()> {
        let text = self.render();
        write_atomic(path, lock, |writer| Ok(writer.write_all(text.as_bytes())?))
    }
}
