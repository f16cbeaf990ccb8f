// src/core/resolver.rs
use crate::core::types::{BaseForm, Token};
use crate::irregular::IrregularVerbStore;
use crate::lexicon::LexicalLookup;

/// Suffixes tried longest first.
const SUFFIXES: &[&str] = &["ing", "ed", "es", "s"];
const MIN_STEM_LEN: usize = 2;

/// Maps inflected tokens to their dictionary form using the learned
/// irregular table first and suffix stripping second.
pub struct BaseFormResolver<'a, L: LexicalLookup + ?Sized> {
    store: &'a IrregularVerbStore,
    lexicon: &'a L,
}

impl<'a, L: LexicalLookup + ?Sized> BaseFormResolver<'a, L> {
    pub fn new(store: &'a IrregularVerbStore, lexicon: &'a L) -> Self {
        Self { store, lexicon }
    }

    pub fn resolve_token(&self, token: &Token) -> BaseForm {
        self.resolve(token.as_str())
    }

    pub fn resolve(&self, word: &str) -> BaseForm {
        let word = BaseForm::new(word);
        let w = word.as_str();

        if self.store.contains_base(w) {
            return word;
        }
        if let Some(base) = self.store.lookup_base_of_form(w) {
            return base;
        }
        // A dictionary headword is already a base form. Stripping it further
        // ("need" -> "ne") would make resolution non-idempotent.
        if self.lexicon.contains(w) {
            return word;
        }
        for suffix in SUFFIXES {
            let Some(stem) = w.strip_suffix(suffix) else {
                continue;
            };
            if stem.chars().count() >= MIN_STEM_LEN && self.lexicon.contains(stem) {
                tracing::trace!(word = w, stem, "suffix stripped");
                // The stem may itself be a learned irregular form.
                return self.resolve(stem);
            }
        }
        word
    }
}
