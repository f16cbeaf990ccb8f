// File: src/lexicon.rs
use crate::core::types::{PartOfSpeech, Sense};
use crate::error::Result;
use crate::persistence::{write_atomic, NoLockRelease};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read-only access to a general-purpose English dictionary.
/// A word that is not found is simply absent, never an error.
pub trait LexicalLookup {
    /// All senses recorded for a lowercase word.
    fn senses(&self, word: &str) -> &[Sense];

    /// Base form for an irregular verb form such as "went".
    fn exception_lemma(&self, _form: &str) -> Option<&str> {
        None
    }

    /// Plural for a noun the rules get wrong.
    fn plural_exception(&self, _noun: &str) -> Option<&str> {
        None
    }

    fn contains(&self, word: &str) -> bool {
        !self.senses(word).is_empty()
    }

    fn has_pos(&self, word: &str, pos: PartOfSpeech) -> bool {
        self.senses(word).iter().any(|s| s.pos == pos)
    }

    fn is_noun(&self, word: &str) -> bool {
        self.has_pos(word, PartOfSpeech::Noun)
    }

    fn is_verb(&self, word: &str) -> bool {
        self.has_pos(word, PartOfSpeech::Verb)
    }

    fn first_definition(&self, word: &str) -> Option<&str> {
        self.senses(word).first().map(|s| s.definition.as_str())
    }
}

/// Detachment rules for verbs, tried in order.
const VERB_DETACHMENTS: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("ied", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Dictionary lemma of a word read as a verb, independent of any learned
/// irregular table. Picks the shortest known verb among the word itself, its
/// exception lemma and its detached stems; the word itself when none is known.
pub fn verb_lemma<L: LexicalLookup + ?Sized>(lexicon: &L, word: &str) -> String {
    let word = word.trim().to_lowercase();
    let mut candidates: Vec<String> = Vec::new();
    if lexicon.is_verb(&word) {
        candidates.push(word.clone());
    }
    if let Some(lemma) = lexicon.exception_lemma(&word) {
        candidates.push(lemma.to_string());
    }
    for (suffix, replacement) in VERB_DETACHMENTS {
        if let Some(stem) = word.strip_suffix(suffix) {
            let candidate = format!("{stem}{replacement}");
            if !candidate.is_empty() && lexicon.is_verb(&candidate) {
                candidates.push(candidate);
            } else if replacement.is_empty() && (*suffix == "ed" || *suffix == "ing") {
                // "stopped" -> "stop"
                if let Some(undoubled) = undouble(stem) {
                    if lexicon.is_verb(undoubled) {
                        candidates.push(undoubled.to_string());
                    }
                }
            }
        }
    }
    candidates
        .into_iter()
        .min_by_key(|c| c.len())
        .unwrap_or(word)
}

fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    (n >= 3 && bytes[n - 1] == bytes[n - 2] && bytes[n - 1].is_ascii_alphabetic())
        .then(|| &stem[..n - 1])
}

/// A file-backed dictionary, loaded fully into memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    entries: HashMap<String, Vec<Sense>>,
    #[serde(default)]
    verb_exceptions: HashMap<String, String>,
    #[serde(default)]
    noun_plurals: HashMap<String, String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a lexicon, choosing the compiled form for `.bin` paths.
    /// A missing file gives an empty lexicon so lookups fall back gracefully.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "lexicon not found, definitions disabled");
            return Ok(Self::new());
        }
        let lexicon = if path.extension().is_some_and(|ext| ext == "bin") {
            Self::load_compiled(path)?
        } else {
            Self::load_json(path)?
        };
        tracing::debug!(entries = lexicon.entries.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let raw: Lexicon = serde_json::from_reader(reader)?;
        Ok(raw.normalized())
    }

    pub fn load_compiled(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }

    /// Writes the compact binary snapshot read back by [`Lexicon::load_compiled`].
    pub fn save_compiled(&self, path: &Path) -> Result<()> {
        write_atomic(path, &NoLockRelease, |writer| {
            bincode::serialize_into(writer, self)?;
            Ok(())
        })
    }

    pub fn insert(&mut self, word: &str, pos: PartOfSpeech, definition: &str) {
        self.entries.entry(word.to_lowercase()).or_default().push(Sense {
            pos,
            definition: definition.to_string(),
        });
    }

    pub fn insert_verb_exception(&mut self, form: &str, base: &str) {
        self.verb_exceptions
            .insert(form.to_lowercase(), base.to_lowercase());
    }

    pub fn insert_plural(&mut self, noun: &str, plural: &str) {
        self.noun_plurals
            .insert(noun.to_lowercase(), plural.to_lowercase());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges keys that differ only by case, keeping sense order.
    fn normalized(self) -> Self {
        let mut out = Lexicon::new();
        for (word, senses) in self.entries {
            out.entries
                .entry(word.to_lowercase())
                .or_default()
                .extend(senses);
        }
        for (form, base) in self.verb_exceptions {
            out.insert_verb_exception(&form, &base);
        }
        for (noun, plural) in self.noun_plurals {
            out.insert_plural(&noun, &plural);
        }
        out
    }
}

impl LexicalLookup for Lexicon {
    fn senses(&self, word: &str) -> &[Sense] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    fn exception_lemma(&self, form: &str) -> Option<&str> {
        self.verb_exceptions.get(form).map(String::as_str)
    }

    fn plural_exception(&self, noun: &str) -> Option<&str> {
        self.noun_plurals.get(noun).map(String::as_str)
    }
}
