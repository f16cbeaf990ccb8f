// File: src/fuzzy/symspell.rs
use std::collections::{HashMap, HashSet};

/// Index into the word list a [`SymSpell`] was built from.
pub type WordId = usize;

/// Spelling suggestions based on the Symmetric Delete algorithm. Every
/// known word is indexed under all strings reachable from it by deleting
/// up to `max_edit_distance` characters, so a lookup only has to generate
/// the deletes of the query.
pub struct SymSpell {
    /// Maps a delete variant (e.g. "wlk") to the words it could come from.
    deletes: HashMap<String, HashSet<WordId>>,
    words: Vec<String>,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            words: Vec::new(),
            max_edit_distance,
        }
    }

    pub fn from_words<I, S>(words: I, max_edit_distance: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symspell = Self::new(max_edit_distance);
        for word in words {
            symspell.add_word(word.as_ref());
        }
        symspell
    }

    pub fn add_word(&mut self, word: &str) -> WordId {
        let word_id = self.words.len();
        self.words.push(word.to_string());
        for edit in self.generate_edits(word) {
            self.deletes.entry(edit).or_default().insert(word_id);
        }
        word_id
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// Ids of all words sharing a delete variant with `input`.
    pub fn lookup(&self, input: &str) -> HashSet<WordId> {
        let mut candidates = HashSet::new();
        for edit in self.generate_edits(input) {
            if let Some(word_ids) = self.deletes.get(&edit) {
                candidates.extend(word_ids.iter().copied());
            }
        }
        candidates
    }

    /// Up to `limit` candidate words, closest length first, then alphabetical.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<String> {
        let len = input.chars().count();
        let mut found: Vec<&str> = self
            .lookup(input)
            .into_iter()
            .filter_map(|id| self.word(id))
            .filter(|word| *word != input)
            .collect();
        found.sort_by_key(|word| (word.chars().count().abs_diff(len), *word));
        found.into_iter().take(limit).map(str::to_string).collect()
    }

    /// All variants within `max_edit_distance` deletes, the word itself included.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = edits.clone();
        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in current_edits {
                for (i, _) in edit.char_indices() {
                    let mut deleted_variant = edit.clone();
                    deleted_variant.remove(i);
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_words_within_distance() {
        let spell = SymSpell::from_words(["walk", "talk", "run", "happiness"], 2);
        assert_eq!(spell.suggest("wlak", 3), vec!["talk", "walk"]);
        assert_eq!(spell.suggest("happines", 3), vec!["happiness"]);
        assert!(spell.suggest("zzzzzz", 3).is_empty());
    }

    #[test]
    fn exact_match_is_not_suggested() {
        let spell = SymSpell::from_words(["walk"], 1);
        assert!(spell.suggest("walk", 3).is_empty());
        assert!(spell.lookup("walk").contains(&0));
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        let spell = SymSpell::from_words(["cafe"], 1);
        assert_eq!(spell.suggest("café", 1), vec!["cafe"]);
    }
}
