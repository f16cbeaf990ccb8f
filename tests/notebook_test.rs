use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vocab_core::core::types::{BaseForm, PartOfSpeech};
use vocab_core::lexicon::Lexicon;
use vocab_core::persistence::NoLockRelease;
use vocab_core::{LingoConfig, Notebook, SearchOutcome, VocabError};

fn lexicon() -> Lexicon {
    let mut lex = Lexicon::new();
    lex.insert("run", PartOfSpeech::Verb, "move fast by using your legs");
    lex.insert("run", PartOfSpeech::Noun, "a score in baseball");
    lex.insert("fast", PartOfSpeech::Adjective, "acting or moving quickly");
    lex.insert("go", PartOfSpeech::Verb, "change location");
    lex.insert("school", PartOfSpeech::Noun, "an educational institution");
    lex.insert("play", PartOfSpeech::Verb, "participate in games or sport");
    lex.insert_verb_exception("ran", "run");
    lex.insert_verb_exception("went", "go");
    lex
}

fn notebook(dir: &Path) -> Notebook {
    let config = LingoConfig::defaults().unwrap().rooted_at(dir);
    Notebook::with_parts(&config, lexicon(), Box::new(NoLockRelease))
}

fn words(outcome: &vocab_core::AddOutcome) -> Vec<(&str, &str)> {
    outcome
        .new_words
        .iter()
        .map(|(t, b)| (t.as_str(), b.as_str()))
        .collect()
}

#[test]
fn first_sentence_records_every_word() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());

    let outcome = nb.add_sentence("I run [phonetic hint] fast.").unwrap();
    assert_eq!(outcome.number, 1);
    assert_eq!(words(&outcome), vec![("I", "i"), ("run", "run"), ("fast", "fast")]);
    assert!(outcome.learned_irregulars.is_empty());

    let record = nb.open_vocabulary_record().unwrap();
    let lines: Vec<&str> = record.lines().collect();
    assert_eq!(lines[0], "No.,New Word,Sentence,Explanation,Date/Time");
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("2,run,I run [phonetic hint] fast.,"));
    assert!(lines[2].contains("Plural: runs | Verb forms: run, runned, runned, running, runs"));

    let doc = nb.open_highlighted_document().unwrap();
    assert!(doc.contains("1. **==I==** **==run==** [phonetic hint] **==fast.==**"));
}

#[test]
fn inflections_of_known_words_are_not_new() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    nb.add_sentence("I run fast").unwrap();

    let outcome = nb.add_sentence("He runs and ran.").unwrap();
    assert_eq!(words(&outcome), vec![("He", "he"), ("and", "and")]);
    assert_eq!(outcome.learned_irregulars, vec![BaseForm::new("run")]);
    assert_eq!(nb.irregulars().lookup_base_of_form("ran"), Some(BaseForm::new("run")));

    let outcome = nb.add_sentence("Running, he ran and runs.").unwrap();
    assert!(outcome.new_words.is_empty());
    assert_eq!(outcome.number, 3);

    let record = nb.open_vocabulary_record().unwrap();
    let last = record.lines().last().unwrap();
    assert!(last.starts_with("6,,\"Running, he ran and runs.\",,"));
}

#[test]
fn learned_irregular_is_recorded_under_its_base() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());

    let outcome = nb.add_sentence("We went home").unwrap();
    assert_eq!(
        words(&outcome),
        vec![("We", "we"), ("went", "go"), ("home", "home")]
    );
    assert_eq!(outcome.learned_irregulars, vec![BaseForm::new("go")]);

    let json = fs::read_to_string(dir.path().join("irregular_verbs_extended.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[0]["base"], "go");
    assert_eq!(entries[0]["past"], "went");

    // Seen again: nothing new, nothing re-learned, the id is unchanged.
    let again = nb.add_sentence("They go, we went").unwrap();
    assert_eq!(words(&again), vec![("They", "they")]);
    assert!(again.learned_irregulars.is_empty());
    let json_after = fs::read_to_string(dir.path().join("irregular_verbs_extended.json")).unwrap();
    assert_eq!(json, json_after);

    let doc = nb.open_highlighted_document().unwrap();
    assert!(doc.contains("1. **==We==** **==went==** **==home==**"));
    assert!(doc.contains("2. **==They==** go, we went"));
}

#[test]
fn regular_past_teaches_nothing() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    let outcome = nb.add_sentence("They played").unwrap();
    assert_eq!(words(&outcome), vec![("They", "they"), ("played", "play")]);
    assert!(outcome.learned_irregulars.is_empty());
    assert!(nb.irregulars().is_empty());
    assert!(!dir.path().join("irregular_verbs_extended.json").exists());
}

#[test]
fn search_finds_base_form_and_suggests_on_miss() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    nb.add_sentence("Schools run fast").unwrap();

    match nb.search_word("  Runs ").unwrap() {
        SearchOutcome::Found(row) => {
            assert_eq!(row.word, "run");
            assert_eq!(row.sentence, "Schools run fast");
        }
        other => panic!("expected a hit, got {other:?}"),
    }
    match nb.search_word("SCHOOLS").unwrap() {
        SearchOutcome::Found(row) => assert_eq!(row.word, "school"),
        other => panic!("expected a hit, got {other:?}"),
    }
    match nb.search_word("fsat").unwrap() {
        SearchOutcome::NotFound { base, suggestions } => {
            assert_eq!(base.as_str(), "fsat");
            assert_eq!(suggestions, vec!["fast".to_string()]);
        }
        other => panic!("expected a miss, got {other:?}"),
    }
}

#[test]
fn blank_input_is_rejected_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    assert!(matches!(nb.add_sentence("   "), Err(VocabError::EmptyInput)));
    assert!(matches!(nb.search_word(""), Err(VocabError::EmptyInput)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn viewing_before_anything_is_saved() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    assert!(matches!(
        nb.open_vocabulary_record(),
        Err(VocabError::MissingResource { .. })
    ));
    assert!(matches!(
        nb.open_highlighted_document(),
        Err(VocabError::MissingResource { .. })
    ));
    assert!(matches!(
        nb.search_word("run"),
        Err(VocabError::MissingResource { .. })
    ));
}

#[test]
fn corrupt_irregular_file_does_not_block_adding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("irregular_verbs_extended.json");
    fs::write(&path, "[{\"id\": 1, \"base\": ").unwrap();

    let mut nb = notebook(dir.path());
    let outcome = nb.add_sentence("I went").unwrap();
    assert_eq!(outcome.learned_irregulars, vec![BaseForm::new("go")]);

    let entries: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(entries[0]["base"], "go");
}

#[test]
fn document_numbering_follows_existing_paragraphs() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("HighlightedNotes.md"),
        "# Highlighted Vocabulary Notes\n\n4. an older note\n\n2. another\n",
    )
    .unwrap();
    let mut nb = notebook(dir.path());
    let outcome = nb.add_sentence("Go").unwrap();
    assert_eq!(outcome.number, 5);
}

#[test]
fn highlighting_sees_the_same_tokens_as_the_record() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());

    let outcome = nb.add_sentence("A well-known run[rʌn] trick").unwrap();
    let bases: Vec<&str> = words(&outcome).into_iter().map(|(_, b)| b).collect();
    assert_eq!(bases, vec!["a", "well", "known", "run", "trick"]);

    let doc = nb.open_highlighted_document().unwrap();
    assert!(doc.contains("1. **==A==** **==well-known==** **==run[rʌn]==** **==trick==**"));
}

#[test]
fn search_sees_irregulars_learned_elsewhere() {
    let dir = TempDir::new().unwrap();
    let mut nb = notebook(dir.path());
    nb.add_sentence("Go").unwrap();

    fs::write(
        dir.path().join("irregular_verbs_extended.json"),
        r#"[{"id": 1, "base": "go", "past": "went", "past_participle": "gone", "ing": "going", "s": "goes"}]"#,
    )
    .unwrap();

    match nb.search_word("went").unwrap() {
        SearchOutcome::Found(row) => assert_eq!(row.word, "go"),
        other => panic!("expected a hit, got {other:?}"),
    }
}

#[test]
fn ids_of_dropped_duplicates_are_not_reused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("irregular_verbs_extended.json");
    fs::write(
        &path,
        r#"[{"id": 1, "base": "go", "past": "went", "past_participle": "gone", "ing": "going", "s": "goes"},
            {"id": 2, "base": "GO", "past": "went", "past_participle": "gone", "ing": "going", "s": "goes"}]"#,
    )
    .unwrap();

    let mut nb = notebook(dir.path());
    let outcome = nb.add_sentence("I ran").unwrap();
    assert_eq!(outcome.learned_irregulars, vec![BaseForm::new("run")]);

    let entries: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let run = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["base"] == "run")
        .unwrap();
    assert_eq!(run["id"], 3);
}
