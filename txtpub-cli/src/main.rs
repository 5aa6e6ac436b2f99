//! txtpub CLI - Convert plain-text books into EPUB

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txtpub_core::{Language, LanguageTag};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a language tag, accepting only languages with a chapter convention
fn parse_language(s: &str) -> Result<LanguageTag, String> {
    let tag = LanguageTag::new(s);
    Language::from_tag(&tag).map_err(|e| e.to_string())?;
    Ok(tag)
}

#[derive(Parser)]
#[command(name = "txtpub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a text file to EPUB
    Convert(ConvertArgs),

    /// Show how a text file would be split into chapters
    Inspect {
        /// Input text file
        input: PathBuf,

        /// Language of the text (zh-cn, en); detected when omitted
        #[arg(short, long, value_parser = parse_language)]
        lang: Option<LanguageTag>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Batch convert every .txt file in a directory
    Batch {
        /// Input directory
        input_dir: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Language of the texts (zh-cn, en); detected per file when omitted
        #[arg(short, long, value_parser = parse_language)]
        lang: Option<LanguageTag>,

        /// Author recorded in every book
        #[arg(short, long)]
        author: Option<String>,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,
    },
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input text file; asked for on stdin when omitted
    input: Option<PathBuf>,

    /// Output file path (defaults to the input path with an .epub extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Book title (defaults to the input file name)
    #[arg(short, long)]
    title: Option<String>,

    /// Book author
    #[arg(short, long)]
    author: Option<String>,

    /// Unique identifier (a urn:uuid is generated when omitted)
    #[arg(long)]
    identifier: Option<String>,

    /// Language of the text (zh-cn, en); detected when omitted
    #[arg(short, long, value_parser = parse_language)]
    lang: Option<LanguageTag>,

    /// JSON settings file holding the directory to start file selection in
    #[arg(long, requires = "settings_key")]
    settings: Option<PathBuf>,

    /// Key of the directory entry in the settings file
    #[arg(long, requires = "settings")]
    settings_key: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "txtpub_cli=debug,txtpub_core=debug"
    } else {
        "txtpub_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert(args) => commands::convert(args),

        Commands::Inspect { input, lang, json } => commands::inspect(&input, lang.as_ref(), json),

        Commands::Batch {
            input_dir,
            output_dir,
            lang,
            author,
            jobs,
        } => commands::batch(&input_dir, &output_dir, lang, author, jobs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jobs() {
        assert_eq!(parse_jobs("1"), Ok(1));
        assert_eq!(parse_jobs("8"), Ok(8));
        assert!(parse_jobs("0").is_err());
        assert!(parse_jobs("many").is_err());
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("en").unwrap().as_str(), "en");
        assert_eq!(parse_language("zh-CN").unwrap().as_str(), "zh-CN");
        let err = parse_language("fr").unwrap_err();
        assert!(err.contains("\"fr\" not supported"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
