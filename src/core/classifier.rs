// src/core/classifier.rs
use crate::core::resolver::BaseFormResolver;
use crate::core::tokenizer::tokenize;
use crate::core::types::{BaseForm, Token};
use crate::lexicon::LexicalLookup;
use std::collections::HashSet;

/// Every base form ever recorded as new.
pub type KnownWords = HashSet<BaseForm>;

/// Tokens of `sentence` whose base form is not in `known`, in first-occurrence
/// order and reported once each. `known` is left untouched.
pub fn classify<L: LexicalLookup + ?Sized>(
    sentence: &str,
    known: &KnownWords,
    resolver: &BaseFormResolver<'_, L>,
) -> Vec<(Token, BaseForm)> {
    let mut seen = HashSet::new();
    let mut new_words = Vec::new();
    for token in tokenize(sentence) {
        let base = resolver.resolve_token(&token);
        if known.contains(&base) || !seen.insert(base.clone()) {
            continue;
        }
        tracing::debug!(token = %token, base = %base, "new word");
        new_words.push((token, base));
    }
    new_words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PartOfSpeech, VerbForms};
    use crate::irregular::IrregularVerbStore;
    use crate::lexicon::Lexicon;

    fn pairs(found: &[(Token, BaseForm)]) -> Vec<(&str, &str)> {
        found.iter().map(|(t, b)| (t.as_str(), b.as_str())).collect()
    }

    #[test]
    fn empty_known_set_reports_all_words_in_order() {
        let (store, lex) = (IrregularVerbStore::new(), Lexicon::new());
        let resolver = BaseFormResolver::new(&store, &lex);
        let found = classify("I run [phonetic hint] fast.", &KnownWords::new(), &resolver);
        assert_eq!(pairs(&found), vec![("I", "i"), ("run", "run"), ("fast", "fast")]);
    }

    #[test]
    fn repeats_within_a_sentence_collapse() {
        let mut lex = Lexicon::new();
        lex.insert("cat", PartOfSpeech::Noun, "a small feline");
        let store = IrregularVerbStore::new();
        let resolver = BaseFormResolver::new(&store, &lex);
        let found = classify("Cat, cats and the CAT", &KnownWords::new(), &resolver);
        assert_eq!(pairs(&found), vec![("Cat", "cat"), ("and", "and"), ("the", "the")]);
    }

    #[test]
    fn known_inflections_are_not_new() {
        let mut lex = Lexicon::new();
        lex.insert("run", PartOfSpeech::Verb, "move fast");
        let mut store = IrregularVerbStore::new();
        store.insert(
            &BaseForm::new("run"),
            VerbForms {
                past: "ran".into(),
                past_participle: "run".into(),
                ing: "running".into(),
                s: "runs".into(),
            },
        );
        let resolver = BaseFormResolver::new(&store, &lex);
        let known: KnownWords = ["run", "he", "and"].iter().map(|w| BaseForm::new(w)).collect();
        assert!(classify("He runs and ran.", &known, &resolver).is_empty());
    }
}
