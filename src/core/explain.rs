// src/core/explain.rs
use crate::core::conjugation::{regular_forms, Pluralizer};
use crate::core::resolver::BaseFormResolver;
use crate::core::types::{BaseForm, VerbForms};
use crate::irregular::IrregularVerbStore;
use crate::lexicon::LexicalLookup;

pub const SEPARATOR: &str = " | ";
pub const NO_DEFINITION: &str = "Meaning: (No definition found)";

/// Builds the dictionary-style note stored next to each new word.
pub struct ExplanationGenerator<'a, L: LexicalLookup + ?Sized, P: Pluralizer + ?Sized> {
    store: &'a IrregularVerbStore,
    lexicon: &'a L,
    pluralizer: &'a P,
}

impl<'a, L: LexicalLookup + ?Sized, P: Pluralizer + ?Sized> ExplanationGenerator<'a, L, P> {
    pub fn new(store: &'a IrregularVerbStore, lexicon: &'a L, pluralizer: &'a P) -> Self {
        Self {
            store,
            lexicon,
            pluralizer,
        }
    }

    pub fn explain(&self, base: &BaseForm) -> String {
        let word = base.as_str();
        let mut parts = Vec::new();

        if self.lexicon.is_noun(word) {
            let plural = self.pluralizer.plural(word);
            if !plural.is_empty() && plural != word {
                parts.push(format!("Plural: {plural}"));
            }
        }

        let in_store = self.store.contains_base(word) || self.store.lookup_base_of_form(word).is_some();
        if self.lexicon.is_verb(word) || in_store {
            let verb = BaseFormResolver::new(self.store, self.lexicon).resolve(word);
            let forms = match self.store.lookup_by_base(verb.as_str()) {
                Some(forms) => forms.clone(),
                None => regular_forms(word),
            };
            let shown = if self.store.contains_base(verb.as_str()) { verb.as_str() } else { word };
            parts.push(format_verb_forms(shown, &forms));
        }

        if let Some(definition) = self.lexicon.first_definition(word) {
            parts.push(format!("Meaning: {definition}"));
        }

        if parts.is_empty() {
            return NO_DEFINITION.to_string();
        }
        parts.join(SEPARATOR)
    }
}

fn format_verb_forms(base: &str, forms: &VerbForms) -> String {
    let listed: Vec<&str> = std::iter::once(base).chain(forms.iter()).collect();
    format!("Verb forms: {}", listed.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conjugation::EnglishPluralizer;
    use crate::core::types::PartOfSpeech;
    use crate::lexicon::Lexicon;

    fn fixtures() -> (IrregularVerbStore, Lexicon) {
        let mut lex = Lexicon::new();
        lex.insert("book", PartOfSpeech::Noun, "a written work");
        lex.insert("book", PartOfSpeech::Verb, "arrange in advance");
        lex.insert("go", PartOfSpeech::Verb, "move or travel");
        lex.insert("sheep", PartOfSpeech::Noun, "woolly animal");
        lex.insert("quickly", PartOfSpeech::Adverb, "with speed");
        let mut store = IrregularVerbStore::new();
        store.insert(
            &BaseForm::new("go"),
            VerbForms {
                past: "went".into(),
                past_participle: "gone".into(),
                ing: "going".into(),
                s: "goes".into(),
            },
        );
        (store, lex)
    }

    #[test]
    fn noun_and_verb() {
        let (store, lex) = fixtures();
        let plural = EnglishPluralizer::new(&lex);
        let gen = ExplanationGenerator::new(&store, &lex, &plural);
        assert_eq!(
            gen.explain(&BaseForm::new("book")),
            "Plural: books | Verb forms: book, booked, booked, booking, books | Meaning: a written work"
        );
    }

    #[test]
    fn irregular_verb_uses_store() {
        let (store, lex) = fixtures();
        let plural = EnglishPluralizer::new(&lex);
        let gen = ExplanationGenerator::new(&store, &lex, &plural);
        assert_eq!(
            gen.explain(&BaseForm::new("go")),
            "Verb forms: go, went, gone, going, goes | Meaning: move or travel"
        );
    }

    #[test]
    fn invariant_plural_is_omitted() {
        let (store, lex) = fixtures();
        let plural = EnglishPluralizer::new(&lex);
        let gen = ExplanationGenerator::new(&store, &lex, &plural);
        assert_eq!(gen.explain(&BaseForm::new("sheep")), "Meaning: woolly animal");
        assert_eq!(gen.explain(&BaseForm::new("quickly")), "Meaning: with speed");
    }

    #[test]
    fn unknown_word_gets_placeholder() {
        let (store, lex) = fixtures();
        let plural = EnglishPluralizer::new(&lex);
        let gen = ExplanationGenerator::new(&store, &lex, &plural);
        assert_eq!(gen.explain(&BaseForm::new("zorb")), NO_DEFINITION);
    }
}
