// File: src/record.rs
use crate::core::classifier::KnownWords;
use crate::core::types::BaseForm;
use crate::error::Result;
use crate::persistence::{write_atomic, LockRelease};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const HEADER: [&str; 5] = ["No.", "New Word", "Sentence", "Explanation", "Date/Time"];

/// One line of the vocabulary notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "No.")]
    pub number: u64,
    /// Empty when the sentence brought no new word.
    #[serde(rename = "New Word")]
    pub word: String,
    #[serde(rename = "Sentence")]
    pub sentence: String,
    #[serde(rename = "Explanation")]
    pub explanation: String,
    #[serde(rename = "Date/Time")]
    pub timestamp: String,
}

/// Append-only table of every new word with the sentence it came from.
#[derive(Debug, Clone, Default)]
pub struct VocabularyRecord {
    rows: Vec<RecordRow>,
}

impl VocabularyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the CSV at `path`; a file that does not exist yet is an empty record.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::Reader::from_reader(file);
        let rows = reader.deserialize().collect::<Result<Vec<RecordRow>, csv::Error>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The set of base forms ever recorded, rebuilt from the word column.
    pub fn known_words(&self) -> KnownWords {
        self.rows
            .iter()
            .filter(|row| !row.word.trim().is_empty())
            .map(|row| BaseForm::new(&row.word))
            .collect()
    }

    pub fn find(&self, base: &BaseForm) -> Option<&RecordRow> {
        self.rows
            .iter()
            .find(|row| row.word.trim().eq_ignore_ascii_case(base.as_str()))
    }

    /// Appends one row per `(word, explanation)`, or a single row with an
    /// empty word when there is nothing new. Numbers continue from the
    /// current row count.
    pub fn append_sentence(
        &mut self,
        sentence: &str,
        entries: &[(BaseForm, String)],
        now: NaiveDateTime,
    ) -> &[RecordRow] {
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let start = self.rows.len();
        let mut next_no = start as u64 + 1;
        let mut push = |word: String, explanation: String| {
            self.rows.push(RecordRow {
                number: next_no,
                word,
                sentence: sentence.to_string(),
                explanation,
                timestamp: timestamp.clone(),
            });
            next_no += 1;
        };
        if entries.is_empty() {
            push(String::new(), String::new());
        }
        for (word, explanation) in entries {
            push(word.as_str().to_string(), explanation.clone());
        }
        &self.rows[start..]
    }

    pub fn save(&self, path: &Path, lock: &dyn LockRelease) -> Result<()> {
        write_atomic(path, lock, |writer| {
            let mut csv = csv::Writer::from_writer(writer);
            // Written by hand so an empty record still has its header.
            csv.write_record(HEADER)?;
            for row in &self.rows {
                csv.write_record([
                    row.number.to_string().as_str(),
                    row.word.as_str(),
                    row.sentence.as_str(),
                    row.explanation.as_str(),
                    row.timestamp.as_str(),
                ])?;
            }
            csv.flush()?;
            Ok(())
        })
    }
}
