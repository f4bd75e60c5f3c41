//! Prints the words to translate between two files.
//!
//! ```text
//! word-delta <BEFORE> <CURRENT> [SOURCE_LANG] [--config <PATH>]
//! ```
//!
//! Without `--config`, settings are read from `.word-delta.json` in the
//! working directory when present.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use word_delta::WordsCalculator;
use word_delta::config::WordDeltaSettings;

/// Command line of the debug binary.
#[derive(Parser, Debug)]
#[command(name = "word-delta")]
#[command(about = "Words to translate between two versions of a text")]
#[command(version)]
struct Args {
    /// Content the last translation was made from
    before: PathBuf,

    /// Current content
    current: PathBuf,

    /// Source language code; selects letter or ideogram counting
    #[arg(default_value = "en")]
    source_lang: String,

    /// Settings file to use instead of `.word-delta.json` in the working directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Reads both files, computes and writes the result as JSON to stdout.
fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let calculator = WordsCalculator::new(&settings)?;

    let before = read(&args.before)?;
    let current = read(&args.current)?;

    let result = calculator.compute(&before, &current, &args.source_lang);
    tracing::info!(
        source_lang = %args.source_lang,
        words_to_translate = result.words_to_translate,
        "Computed words to translate"
    );

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &result).context("Failed to write result")?;
    writeln!(stdout)?;
    Ok(())
}

/// Explicit settings file, or discovery in the working directory.
fn load_settings(config: Option<&Path>) -> Result<WordDeltaSettings> {
    let settings = match config {
        Some(path) => WordDeltaSettings::from_file(path)
            .with_context(|| format!("Invalid settings file {}", path.display()))?,
        None => {
            let dir = std::env::current_dir().context("Failed to resolve working directory")?;
            WordDeltaSettings::discover(&dir)?
        }
    };
    Ok(settings)
}

/// File content as UTF-8.
fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::error::ErrorKind;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn source_lang_defaults_to_english() {
        let args = Args::try_parse_from(["word-delta", "old.txt", "new.txt"]).unwrap();

        assert_eq!(args.before, PathBuf::from("old.txt"));
        assert_eq!(args.current, PathBuf::from("new.txt"));
        assert_eq!(args.source_lang, "en");
        assert!(args.config.is_none());
    }

    #[rstest]
    fn explicit_language_and_config() {
        let args = Args::try_parse_from([
            "word-delta",
            "old.txt",
            "new.txt",
            "ja",
            "--config",
            "billing.json",
        ])
        .unwrap();

        assert_eq!(args.source_lang, "ja");
        assert_eq!(args.config, Some(PathBuf::from("billing.json")));
    }

    #[rstest]
    #[case::help(&["word-delta", "--help"], ErrorKind::DisplayHelp)]
    #[case::missing_current(&["word-delta", "old.txt"], ErrorKind::MissingRequiredArgument)]
    fn rejects_incomplete_command_lines(#[case] argv: &[&str], #[case] kind: ErrorKind) {
        let error = Args::try_parse_from(argv).unwrap_err();

        assert_eq!(error.kind(), kind);
    }

    #[rstest]
    fn missing_settings_file_names_the_path() {
        let error = load_settings(Some(Path::new("/nonexistent/word-delta.json"))).unwrap_err();

        assert!(format!("{error:#}").contains("/nonexistent/word-delta.json"));
    }
}
