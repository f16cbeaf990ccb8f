// File: src/irregular.rs
use crate::core::types::{BaseForm, IrregularEntry, VerbForms};
use crate::error::Result;
use crate::persistence::{write_atomic, LockRelease};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Added { id: u64 },
    AlreadyPresent { id: u64 },
}

/// The learned irregular-verb table. Entries are only ever appended; `base`
/// is unique case-insensitively and ids are never handed out twice.
#[derive(Debug, Clone, Default)]
pub struct IrregularVerbStore {
    entries: Vec<IrregularEntry>,
    /// lowercase base -> index into `entries`
    by_base: HashMap<String, usize>,
    /// lowercase inflected form -> index into `entries`
    by_form: HashMap<String, usize>,
    /// Largest id ever read or assigned, including dropped duplicates.
    last_id: u64,
    path: Option<PathBuf>,
}

impl IrregularVerbStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the JSON array at `path`. An absent or unreadable file gives an
    /// empty store; a corrupt one is logged and also treated as empty.
    pub fn open(path: &Path) -> Self {
        let mut store = Self::from_entries(read_entries(path));
        store.path = Some(path.to_path_buf());
        store
    }

    pub fn from_entries(entries: Vec<IrregularEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.last_id = store.last_id.max(entry.id);
            if store.by_base.contains_key(&entry.base.to_lowercase()) {
                tracing::warn!(base = %entry.base, id = entry.id, "duplicate irregular entry ignored");
                continue;
            }
            store.index(entry);
        }
        store
    }

    /// Re-reads the backing file, discarding in-memory state.
    pub fn reload(&mut self) {
        if let Some(path) = self.path.clone() {
            *self = Self::open(&path);
        }
    }

    pub fn entries(&self) -> &[IrregularEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_base(&self, base: &str) -> bool {
        self.by_base.contains_key(&base.trim().to_lowercase())
    }

    pub fn lookup_by_base(&self, base: &str) -> Option<&VerbForms> {
        self.by_base
            .get(&base.trim().to_lowercase())
            .map(|&i| &self.entries[i].forms)
    }

    /// Base of the entry that lists `form` among its inflections.
    pub fn lookup_base_of_form(&self, form: &str) -> Option<BaseForm> {
        self.by_form
            .get(&form.trim().to_lowercase())
            .map(|&i| BaseForm::new(&self.entries[i].base))
    }

    /// Adds a verb unless its base is already known. Never overwrites.
    pub fn insert(&mut self, base: &BaseForm, forms: VerbForms) -> InsertOutcome {
        if let Some(&i) = self.by_base.get(base.as_str()) {
            return InsertOutcome::AlreadyPresent {
                id: self.entries[i].id,
            };
        }
        let id = self.last_id + 1;
        self.index(IrregularEntry {
            id,
            base: base.as_str().to_string(),
            forms,
        });
        InsertOutcome::Added { id }
    }

    /// Writes the table back to the file it was opened from.
    pub fn save(&self, lock: &dyn LockRelease) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path, lock),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path, lock: &dyn LockRelease) -> Result<()> {
        write_atomic(path, lock, |writer| {
            serde_json::to_writer_pretty(&mut *writer, &self.entries)?;
            writer.write_all(b"\n")?;
            Ok(())
        })
    }

    fn index(&mut self, entry: IrregularEntry) {
        let idx = self.entries.len();
        self.last_id = self.last_id.max(entry.id);
        self.by_base.insert(entry.base.to_lowercase(), idx);
        for form in entry.forms.iter() {
            let form = form.to_lowercase();
            // The first entry to claim a form keeps it.
            if !form.is_empty() && !self.by_base.contains_key(&form) {
                self.by_form.entry(form).or_insert(idx);
            }
        }
        self.entries.push(entry);
    }
}

fn read_entries(path: &Path) -> Vec<IrregularEntry> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "irregular verb file unreadable, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "irregular verb file malformed, starting empty");
            Vec::new()
        }
    }
}
