// File: src/learning.rs
use crate::core::conjugation::regular_forms;
use crate::core::types::{BaseForm, Detection, Token, VerbForms};
use crate::irregular::{InsertOutcome, IrregularVerbStore};
use crate::lexicon::{verb_lemma, LexicalLookup};

/// Decides whether a token is an irregular verb inflection worth learning.
pub struct IrregularVerbDetector<'a, L: LexicalLookup + ?Sized> {
    lexicon: &'a L,
}

impl<'a, L: LexicalLookup + ?Sized> IrregularVerbDetector<'a, L> {
    pub fn new(lexicon: &'a L) -> Self {
        Self { lexicon }
    }

    pub fn detect(&self, token: &str) -> Detection {
        let word = token.trim().to_lowercase();
        let lemma = verb_lemma(self.lexicon, &word);
        if lemma == word {
            return Detection::BaseFormAlready;
        }

        let expected = regular_forms(&lemma);
        let explained = word == expected.past || word == expected.past_participle;
        if explained || !self.lexicon.is_verb(&lemma) {
            return Detection::Regular;
        }

        Detection::Irregular {
            forms: observed_forms(&word, &lemma, expected),
            base: BaseForm::new(&lemma),
        }
    }
}

/// Puts the observed token into the slot it most likely fills and keeps the
/// rule-built forms everywhere else. A single observation cannot tell a past
/// from a participle ("went" vs "gone"), so both slots get the token; the
/// store never overwrites, so whichever form is seen first sticks.
fn observed_forms(word: &str, lemma: &str, mut forms: VerbForms) -> VerbForms {
    if word.ends_with("ing") {
        forms.ing = word.to_string();
    } else if word.ends_with('s') && word.starts_with(lemma) {
        forms.s = word.to_string();
    } else {
        forms.past = word.to_string();
        forms.past_participle = word.to_string();
    }
    forms
}

/// Feeds tokens from accepted sentences into the irregular-verb store.
pub struct LearningEngine;

impl LearningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Detects and, for irregulars, inserts. Returns the store outcome when
    /// the token was irregular.
    pub fn learn<L: LexicalLookup + ?Sized>(
        &self,
        store: &mut IrregularVerbStore,
        lexicon: &L,
        token: &Token,
    ) -> Option<(BaseForm, InsertOutcome)> {
        match IrregularVerbDetector::new(lexicon).detect(token.as_str()) {
            Detection::Irregular { base, forms } => {
                let outcome = store.insert(&base, forms);
                match &outcome {
                    InsertOutcome::Added { id } => {
                        tracing::info!(%base, id, "learned irregular verb")
                    }
                    InsertOutcome::AlreadyPresent { id } => {
                        tracing::debug!(%base, id, "irregular verb already known")
                    }
                }
                Some((base, outcome))
            }
            Detection::Regular | Detection::BaseFormAlready => {
                tracing::debug!(token = %token, "nothing to learn");
                None
            }
        }
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}
