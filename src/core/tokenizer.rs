// src/core/tokenizer.rs
use crate::core::types::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// A single level of square brackets, e.g. a phonetic hint `[rʌn]`.
static ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z']+\b").unwrap());

/// Removes annotations outright, so a hint inside a word (`colo[u]r`) leaves
/// the word whole.
pub fn strip_annotations(text: &str) -> String {
    ANNOTATION.replace_all(text, "").into_owned()
}

/// Byte ranges of the annotations [`strip_annotations`] removes.
pub fn annotation_spans(text: &str) -> Vec<Range<usize>> {
    ANNOTATION.find_iter(text).map(|m| m.range()).collect()
}

/// Splits free text into word tokens after dropping bracketed annotations.
pub fn tokenize(text: &str) -> Vec<Token> {
    let stripped = strip_annotations(text);
    WORD.find_iter(&stripped)
        .map(|m| Token::new(m.as_str()))
        .collect()
}
