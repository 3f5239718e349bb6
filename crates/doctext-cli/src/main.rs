use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use doctext_core::{ExtractError, ExtractionOutcome};

mod config;
mod output;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "DOCTEXT_LOG";

/// Document text extractor - print the plain text of a PDF or DOCX file as JSON
#[derive(Parser, Debug)]
#[command(name = "doctext", version, about, long_about = None)]
struct Cli {
    /// Path to the PDF or DOCX file
    file_path: Option<PathBuf>,

    /// Minimum length of the trimmed text before a document is accepted
    /// (overrides DOCTEXT_MIN_TEXT_CHARS and the config file)
    #[arg(long, value_name = "N")]
    min_chars: Option<usize>,

    /// Read settings from this TOML file instead of .doctext.toml / the
    /// platform config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let outcome = ExtractionOutcome::Failure {
                error: output::usage_error_message(&e),
            };
            return report(&outcome, false);
        }
    };

    let outcome = run(&cli).unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        ExtractionOutcome::Failure {
            error: format!("{:#}", e),
        }
    });
    report(&outcome, cli.pretty)
}

fn run(cli: &Cli) -> anyhow::Result<ExtractionOutcome> {
    let Some(file_path) = cli.file_path.as_deref() else {
        return Ok(ExtractError::MissingArgument.into());
    };

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let file_config = config::load(cli.config.as_deref())?;
    let min_text_chars = config::resolve_min_text_chars(
        cli.min_chars,
        std::env::var(config::MIN_TEXT_CHARS_ENV).ok(),
        &file_config,
    );

    let extractor = doctext_ingest::build_extractor(min_text_chars);
    tracing::debug!(
        available = ?extractor.available(),
        unavailable = ?extractor.unavailable(),
        min_text_chars,
        "extractor ready"
    );

    Ok(extractor.extract_outcome(file_path))
}

/// Print the outcome on stdout and map it to the process exit status.
fn report(outcome: &ExtractionOutcome, pretty: bool) -> ExitCode {
    if let Err(e) = output::print_outcome(&mut std::io::stdout(), outcome, pretty) {
        tracing::error!("failed to write result: {}", e);
        return ExitCode::from(1);
    }
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Log to stderr so stdout carries nothing but the JSON result.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
