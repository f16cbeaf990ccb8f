// File: src/notebook.rs
use crate::config::{FilesConfig, LingoConfig, SearchConfig};
use crate::core::classifier::classify;
use crate::core::conjugation::EnglishPluralizer;
use crate::core::explain::ExplanationGenerator;
use crate::core::resolver::BaseFormResolver;
use crate::core::types::{BaseForm, Token};
use crate::document::{highlight_runs, HighlightedDocument};
use crate::error::{Result, VocabError};
use crate::fuzzy::symspell::SymSpell;
use crate::irregular::{InsertOutcome, IrregularVerbStore};
use crate::learning::LearningEngine;
use crate::lexicon::{LexicalLookup, Lexicon};
use crate::persistence::{CommandLockRelease, LockRelease, NoLockRelease};
use crate::record::{RecordRow, VocabularyRecord};
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Result of adding one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Paragraph number in the highlighted document.
    pub number: u64,
    pub new_words: Vec<(Token, BaseForm)>,
    /// Verbs added to the irregular table while processing the sentence.
    pub learned_irregulars: Vec<BaseForm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(RecordRow),
    NotFound {
        base: BaseForm,
        suggestions: Vec<String>,
    },
}

/// The user-facing actions, wired to their files. Every action re-reads
/// what it needs from disk, so the files stay the only source of truth.
pub struct Notebook<L: LexicalLookup = Lexicon> {
    files: FilesConfig,
    search: SearchConfig,
    lexicon: L,
    store: IrregularVerbStore,
    lock: Box<dyn LockRelease>,
    learning_engine: LearningEngine,
}

impl Notebook<Lexicon> {
    pub fn open(config: &LingoConfig) -> Result<Self> {
        let lexicon = Lexicon::open(&config.files.lexicon)?;
        let lock: Box<dyn LockRelease> = if config.lock_release.commands.is_empty() {
            Box::new(NoLockRelease)
        } else {
            Box::new(CommandLockRelease::new(config.lock_release.commands.clone()))
        };
        Ok(Self::with_parts(config, lexicon, lock))
    }
}

impl<L: LexicalLookup> Notebook<L> {
    pub fn with_parts(config: &LingoConfig, lexicon: L, lock: Box<dyn LockRelease>) -> Self {
        Self {
            store: IrregularVerbStore::open(&config.files.irregulars),
            files: config.files.clone(),
            search: config.search.clone(),
            lexicon,
            lock,
            learning_engine: LearningEngine::new(),
        }
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn irregulars(&self) -> &IrregularVerbStore {
        &self.store
    }

    /// Re-reads the irregular-verb table from disk.
    pub fn reload(&mut self) {
        self.store.reload();
    }

    pub fn add_sentence(&mut self, text: &str) -> Result<AddOutcome> {
        self.add_sentence_at(text, Local::now().naive_local())
    }

    pub fn add_sentence_at(&mut self, text: &str, now: NaiveDateTime) -> Result<AddOutcome> {
        let sentence = text.trim();
        if sentence.is_empty() {
            return Err(VocabError::EmptyInput);
        }
        self.reload();
        let mut record = VocabularyRecord::load(&self.files.record)?;
        let known = record.known_words();

        let candidates = classify(sentence, &known, &self.resolver());
        let learned_irregulars = self.learn_irregulars(&candidates);
        // Learning can move a token to a different base ("went" -> "go").
        let new_words = if learned_irregulars.is_empty() {
            candidates
        } else {
            classify(sentence, &known, &self.resolver())
        };

        let pluralizer = EnglishPluralizer::new(&self.lexicon);
        let explainer = ExplanationGenerator::new(&self.store, &self.lexicon, &pluralizer);
        let entries: Vec<(BaseForm, String)> = new_words
            .iter()
            .map(|(_, base)| (base.clone(), explainer.explain(base)))
            .collect();

        record.append_sentence(sentence, &entries, now);
        record.save(&self.files.record, self.lock.as_ref())?;

        let highlighted: HashSet<BaseForm> = new_words.iter().map(|(_, b)| b.clone()).collect();
        let runs = highlight_runs(sentence, &highlighted, &self.resolver());
        let mut document = HighlightedDocument::load(&self.files.document)?;
        let number = document.append_sentence(&runs);
        document.save(&self.files.document, self.lock.as_ref())?;

        tracing::info!(number, new = new_words.len(), "sentence added");
        Ok(AddOutcome {
            number,
            new_words,
            learned_irregulars,
        })
    }

    /// Looks the word's base form up in the record. On a miss, suggests
    /// recorded words that are a few edits away.
    pub fn search_word(&mut self, text: &str) -> Result<SearchOutcome> {
        let query = text.trim();
        if query.is_empty() {
            return Err(VocabError::EmptyInput);
        }
        self.reload();
        let path = &self.files.record;
        if !path.exists() {
            return Err(VocabError::MissingResource { path: path.clone() });
        }
        let record = VocabularyRecord::load(path)?;
        let base = self.resolver().resolve(query);
        if let Some(row) = record.find(&base) {
            return Ok(SearchOutcome::Found(row.clone()));
        }

        let mut known: Vec<String> = record
            .known_words()
            .into_iter()
            .map(BaseForm::into_string)
            .collect();
        known.sort();
        let suggestions = SymSpell::from_words(&known, self.search.max_edit_distance)
            .suggest(base.as_str(), self.search.max_suggestions);
        Ok(SearchOutcome::NotFound { base, suggestions })
    }

    pub fn open_vocabulary_record(&self) -> Result<String> {
        read_for_view(&self.files.record)
    }

    pub fn open_highlighted_document(&self) -> Result<String> {
        read_for_view(&self.files.document)
    }

    fn resolver(&self) -> BaseFormResolver<'_, L> {
        BaseFormResolver::new(&self.store, &self.lexicon)
    }

    /// Runs the detector over new tokens and persists any additions. A
    /// failure here is logged and never stops the sentence from being saved.
    fn learn_irregulars(&mut self, candidates: &[(Token, BaseForm)]) -> Vec<BaseForm> {
        let mut learned = Vec::new();
        for (token, _) in candidates {
            if let Some((base, InsertOutcome::Added { .. })) =
                self.learning_engine.learn(&mut self.store, &self.lexicon, token)
            {
                learned.push(base);
            }
        }
        if !learned.is_empty() {
            if let Err(e) = self.store.save(self.lock.as_ref()) {
                tracing::warn!(error = %e, "could not save irregular verbs");
            }
        }
        learned
    }
}

fn read_for_view(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VocabError::MissingResource {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}
