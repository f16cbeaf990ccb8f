// src/core/conjugation.rs
use crate::core::types::VerbForms;
use crate::lexicon::LexicalLookup;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Ends in a consonant followed by `y` ("cry", not "play").
fn ends_consonant_y(base: &str) -> bool {
    let mut rev = base.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

/// Short vowel closed by a single consonant: "stop", "run", but not "play",
/// "fix", "snow" or "rain".
fn is_closed_syllable(base: &str) -> bool {
    let chars: Vec<char> = base.chars().collect();
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let (last, vowel) = (chars[n - 1], chars[n - 2]);
    if is_vowel(last) || matches!(last, 'w' | 'x' | 'y') || !is_vowel(vowel) {
        return false;
    }
    n == 2 || !is_vowel(chars[n - 3])
}

fn double_final(base: &str) -> String {
    let mut out = base.to_string();
    if let Some(last) = base.chars().last() {
        out.push(last);
    }
    out
}

pub fn regular_past(base: &str) -> String {
    if base.ends_with('e') {
        format!("{base}d")
    } else if ends_consonant_y(base) {
        format!("{}ied", &base[..base.len() - 1])
    } else if is_closed_syllable(base) {
        format!("{}ed", double_final(base))
    } else {
        format!("{base}ed")
    }
}

pub fn regular_ing(base: &str) -> String {
    if let Some(stem) = base.strip_suffix("ie") {
        format!("{stem}ying")
    } else if base.ends_with('e') && base != "be" && base != "see" {
        format!("{}ing", &base[..base.len() - 1])
    } else if is_closed_syllable(base) {
        format!("{}ing", double_final(base))
    } else {
        format!("{base}ing")
    }
}

pub fn regular_s(base: &str) -> String {
    if ends_consonant_y(base) {
        format!("{}ies", &base[..base.len() - 1])
    } else if ["s", "sh", "ch", "x", "z"].iter().any(|s| base.ends_with(s)) {
        format!("{base}es")
    } else {
        format!("{base}s")
    }
}

/// All four regular forms of a lowercase base; past participle equals past.
pub fn regular_forms(base: &str) -> VerbForms {
    let past = regular_past(base);
    VerbForms {
        past_participle: past.clone(),
        past,
        ing: regular_ing(base),
        s: regular_s(base),
    }
}

/// Plural form of a singular noun. May return the input for invariant nouns.
pub trait Pluralizer {
    fn plural(&self, noun: &str) -> String;
}

const INVARIANT_NOUNS: &[&str] = &[
    "sheep", "fish", "deer", "series", "species", "aircraft", "news", "information", "advice",
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

const F_TO_VES: &[&str] = &[
    "knife", "life", "wife", "leaf", "loaf", "half", "wolf", "shelf", "thief", "calf", "elf",
];

/// Rule-based English pluralizer that consults the lexicon's plural exceptions first.
pub struct EnglishPluralizer<'a, L: LexicalLookup + ?Sized> {
    lexicon: &'a L,
}

impl<'a, L: LexicalLookup + ?Sized> EnglishPluralizer<'a, L> {
    pub fn new(lexicon: &'a L) -> Self {
        Self { lexicon }
    }
}

impl<L: LexicalLookup + ?Sized> Pluralizer for EnglishPluralizer<'_, L> {
    fn plural(&self, noun: &str) -> String {
        let noun = noun.trim().to_lowercase();
        if let Some(plural) = self.lexicon.plural_exception(&noun) {
            return plural.to_string();
        }
        if INVARIANT_NOUNS.contains(&noun.as_str()) {
            return noun;
        }
        if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(s, _)| *s == noun) {
            return plural.to_string();
        }
        if F_TO_VES.contains(&noun.as_str()) {
            let stem = noun
                .strip_suffix("fe")
                .or_else(|| noun.strip_suffix('f'))
                .unwrap_or(noun.as_str());
            return format!("{stem}ves");
        }
        regular_s(&noun)
    }
}
