// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A maximal run of ASCII letters and apostrophes, kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(surface: impl Into<String>) -> Self {
        Self(surface.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase canonical dictionary form of a word ("go" for "went").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseForm(String);

impl BaseForm {
    /// Lowercases and trims; this is the only way a base form is built.
    pub fn new(word: &str) -> Self {
        Self(word.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BaseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four inflected slots recorded for a verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbForms {
    pub past: String,
    pub past_participle: String,
    pub ing: String,
    pub s: String,
}

impl VerbForms {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.past.as_str(),
            self.past_participle.as_str(),
            self.ing.as_str(),
            self.s.as_str(),
        ]
        .into_iter()
    }
}

/// One row of the irregular-verb fact base. Field order matches the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrregularEntry {
    pub id: u64,
    pub base: String,
    #[serde(flatten)]
    pub forms: VerbForms,
}

/// What the irregular-verb detector concluded about a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Inflected, not explained by the regular rules, and the lemma is a verb.
    Irregular { base: BaseForm, forms: VerbForms },
    Regular,
    BaseFormAlready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a", alias = "s")]
    Adjective,
    #[serde(rename = "r")]
    Adverb,
    #[serde(other)]
    Other,
}

/// A single dictionary sense returned by the lexical lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub pos: PartOfSpeech,
    pub definition: String,
}
