//! eshakap CLI: dictionary and script converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use eshakap::config::ServerConfig;
use eshakap::lexicon::{Lexicon, NewWord, WordRecord};
use eshakap::script::{Converter, GlyphSet, ORDER};

#[derive(Parser)]
#[command(name = "eshakap", version, about = "Eshakap dictionary and script converter")]
struct Cli {
    /// Data directory holding the word database.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text into script syllables (printed as JSON).
    Convert {
        /// Text to convert; lower-cased before conversion.
        text: String,

        /// Base location of the glyph assets.
        #[arg(long)]
        glyph_base: Option<String>,

        /// Print only glyph paths, one syllable per line.
        #[arg(long)]
        paths: bool,
    },

    /// List every stored word.
    Names,

    /// Search words by text and/or type filter code.
    Fetch {
        /// Substring of the word or one of its meanings.
        #[arg(long, short, default_value = "")]
        query: String,

        /// Type filter code, one hex digit 0-f.
        #[arg(long, short)]
        filter: Option<String>,
    },

    /// Show records whose word matches exactly (ignoring case).
    Word {
        word: String,
    },

    /// Print the number of stored words.
    Max,

    /// Print the canonical alphabet order.
    Order,

    /// Add a word.
    Add {
        word: String,

        /// Meaning; repeat for several.
        #[arg(long, short)]
        meaning: Vec<String>,

        /// Word type (general, special, replaceable, combination).
        #[arg(long = "type", short = 't')]
        word_type: String,

        #[arg(long, default_value = "")]
        phonetic: String,
    },

    /// Import word records from a JSON array file.
    Import {
        /// Path to JSON file with records.
        #[arg(long)]
        file: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

fn open_lexicon(cli_dir: Option<PathBuf>, config: &ServerConfig) -> Result<Lexicon> {
    let dir = cli_dir.or_else(|| config.storage_dir());
    let Some(dir) = dir else {
        miette::bail!("no data directory: pass --data-dir or set ESHAKAP_DATA_DIR");
    };
    Ok(Lexicon::open(Some(dir.as_path()))?)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;

    match cli.command {
        Commands::Convert {
            text,
            glyph_base,
            paths,
        } => {
            let glyphs = glyph_base.map(GlyphSet::new).unwrap_or_else(|| config.glyph_set());
            let syllables = Converter::new(glyphs).convert(&text.to_lowercase());
            if paths {
                for syllable in &syllables {
                    println!("{}", syllable.paths().join(" "));
                }
            } else {
                print_json(&syllables)?;
            }
        }

        Commands::Names => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            print_json(&lexicon.names()?)?;
        }

        Commands::Fetch { query, filter } => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            print_json(&lexicon.fetch(&query, filter.as_deref())?)?;
        }

        Commands::Word { word } => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            print_json(&lexicon.lookup(&word)?)?;
        }

        Commands::Max => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            print_json(&serde_json::json!({ "max": lexicon.count()? }))?;
        }

        Commands::Order => {
            let order: Vec<String> = ORDER.iter().map(|c| c.to_string()).collect();
            print_json(&order)?;
        }

        Commands::Add {
            word,
            meaning,
            word_type,
            phonetic,
        } => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            let record = lexicon.add(NewWord::new(word, meaning, word_type).with_phonetic(phonetic))?;
            print_json(&record)?;
        }

        Commands::Import { file } => {
            let lexicon = open_lexicon(cli.data_dir, &config)?;
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let records: Vec<WordRecord> = serde_json::from_str(&content).into_diagnostic()?;
            let count = lexicon.import(records)?;
            println!("Imported {count} words from {}", file.display());
        }
    }

    Ok(())
}
