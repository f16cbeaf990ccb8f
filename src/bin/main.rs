use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vocab_core::config::Loader;
use vocab_core::core::types::Detection;
use vocab_core::learning::IrregularVerbDetector;
use vocab_core::lexicon::Lexicon;
use vocab_core::{AddOutcome, Notebook, SearchOutcome, VocabError};

const LOCAL_CONFIG: &str = "lingo.toml";

#[derive(Parser)]
#[command(name = "lingo", about = "Smart vocabulary notebook")]
struct Cli {
    /// Extra configuration file layered over ./lingo.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lexicon file (JSON, or a compiled .bin).
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Record a sentence and its new words.
    Add { sentence: Vec<String> },
    /// Look a word up in the vocabulary notes.
    Search { word: String },
    /// Print the vocabulary notes.
    ViewRecord,
    /// Print the highlighted sentences.
    ViewDocument,
    /// Show whether a word looks like an irregular verb form, without storing it.
    Detect { word: String },
    /// Convert a JSON lexicon into the compact binary form.
    CompileLexicon { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> vocab_core::Result<()> {
    if let Some(Command::CompileLexicon { input, output }) = &cli.command {
        let lexicon = Lexicon::load_json(input)?;
        lexicon.save_compiled(output)?;
        println!("Compiled {} entries into '{}'", lexicon.len(), output.display());
        return Ok(());
    }

    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(path) = &cli.lexicon {
        loader = loader.set_override("files.lexicon", path.display().to_string())?;
    }
    let config = loader.build()?;
    let mut notebook = Notebook::open(&config)?;

    match cli.command {
        Some(Command::Add { sentence }) => add(&mut notebook, &sentence.join(" ")),
        Some(Command::Search { word }) => search(&mut notebook, &word),
        Some(Command::ViewRecord) => view(notebook.open_vocabulary_record()),
        Some(Command::ViewDocument) => view(notebook.open_highlighted_document()),
        Some(Command::Detect { word }) => {
            detect(notebook.lexicon(), &word);
            Ok(())
        }
        Some(Command::CompileLexicon { .. }) => Ok(()),
        None => interactive(&mut notebook),
    }
}

fn add(notebook: &mut Notebook, sentence: &str) -> vocab_core::Result<()> {
    let AddOutcome {
        number,
        new_words,
        learned_irregulars,
    } = notebook.add_sentence(sentence)?;
    if new_words.is_empty() {
        println!("Sentence {number} saved. No new words found.");
    } else {
        let words: Vec<String> = new_words.iter().map(|(_, b)| b.to_string()).collect();
        println!("Sentence {number} saved. Added: {}", words.join(", ").green().bold());
    }
    for base in learned_irregulars {
        println!("Learned irregular verb: {}", base.to_string().yellow());
    }
    Ok(())
}

fn search(notebook: &mut Notebook, word: &str) -> vocab_core::Result<()> {
    match notebook.search_word(word)? {
        SearchOutcome::Found(row) => {
            println!("'{}' found!", row.word.as_str().green().bold());
            println!("  Sentence:    {}", row.sentence);
            println!("  Explanation: {}", row.explanation);
            println!("  Added:       {}", row.timestamp);
        }
        SearchOutcome::NotFound { suggestions, .. } => {
            println!("'{}' is not in your list.", word.red());
            if !suggestions.is_empty() {
                println!("Did you mean: {}?", suggestions.join(", "));
            }
        }
    }
    Ok(())
}

fn view(contents: vocab_core::Result<String>) -> vocab_core::Result<()> {
    match contents {
        Ok(text) => {
            print!("{text}");
            Ok(())
        }
        Err(VocabError::MissingResource { path }) => {
            println!("{} '{}' does not exist yet.", "Not found:".yellow(), path.display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn detect(lexicon: &Lexicon, word: &str) {
    match IrregularVerbDetector::new(lexicon).detect(word) {
        Detection::Irregular { base, forms } => println!(
            "{word}: irregular form of '{base}' (past {}, participle {}, ing {}, s {})",
            forms.past, forms.past_participle, forms.ing, forms.s
        ),
        Detection::Regular => println!("{word}: regular"),
        Detection::BaseFormAlready => println!("{word}: already a base form"),
    }
}

fn interactive(notebook: &mut Notebook) -> vocab_core::Result<()> {
    print_help();
    loop {
        print!("{} ", ">".cyan().bold());
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        let result = match cmd {
            "exit" | ":q" => break,
            "" => continue,
            ":h" => {
                print_help();
                Ok(())
            }
            ":r" => view(notebook.open_vocabulary_record()),
            ":d" => view(notebook.open_highlighted_document()),
            s if s.starts_with(":s ") => search(notebook, &s[3..]),
            s => add(notebook, s),
        };
        // Errors in one action never end the session.
        if let Err(e) = result {
            match e {
                VocabError::EmptyInput => println!("{}", "Please enter some text.".yellow()),
                other => println!("{} {}", "error:".red().bold(), other),
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("{}", "LingoBaby - Smart Vocabulary".bold());
    println!("---------------------------------------------------------------");
    println!("Type a sentence and press [Enter] to record its new words.");
    println!("':s word' search, ':r' view notes, ':d' view highlights, 'exit' to quit.");
    println!("Tip: use base words (e.g. 'go', not 'goes').\n");
}
