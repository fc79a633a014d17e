use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod engine;
mod error;
mod tools;
mod types;
mod ui;
mod utils;

#[cfg(test)]
mod tests;

use crate::error::EditError;
use crate::types::{EditOutcome, EditRequest, MarkerStyle, Mode};

/// Idempotent, pattern-anchored snippet insertion.
#[derive(Parser, Debug)]
#[command(
    name = "autoedit",
    version,
    about = "Insert a snippet into a text file, once",
    after_help = "Examples:\n  \
        autoedit --file target.php --mode append --snippet \"echo 'Hi';\"\n  \
        autoedit --file target.php --mode after --pattern \"/require.+autoload\\.php;/\" \\\n    \
        --snippet \"date_default_timezone_set('Asia/Colombo');\" --marker tz_set"
)]
struct Cli {
    /// Target file to edit.
    #[arg(long)]
    file: PathBuf,

    /// append, prepend, after, before or replace (case-insensitive).
    #[arg(long)]
    mode: String,

    /// Literal snippet text.
    #[arg(long)]
    snippet: Option<String>,

    /// File containing the snippet. Ignored when --snippet is given.
    #[arg(long)]
    snippet_file: Option<PathBuf>,

    /// Anchor regex, bare or as /regex/flags. Required for after, before and replace.
    #[arg(long)]
    pattern: Option<String>,

    /// Marker id used to detect an edit that was already applied.
    #[arg(long)]
    marker: Option<String>,

    /// Comment syntax around the marker lines.
    #[arg(long, value_enum, default_value_t = MarkerStyle::Block)]
    marker_style: MarkerStyle,

    /// Insert even if the marker is already present.
    #[arg(long)]
    force: bool,

    /// Do not create a .bak.<timestamp> copy before writing.
    #[arg(long)]
    no_backup: bool,

    /// Print the edited content instead of writing it.
    #[arg(long)]
    dry_run: bool,

    /// Print a one-line JSON report instead of progress messages.
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Turns parsed flags into a validated request, checking the preconditions
/// the engine relies on.
fn build_request(cli: &Cli) -> Result<EditRequest, EditError> {
    if !cli.file.is_file() {
        return Err(EditError::FileNotFound(cli.file.clone()));
    }

    let snippet = match (&cli.snippet, &cli.snippet_file) {
        (Some(snippet), _) => snippet.clone(),
        (None, Some(path)) => tools::read_snippet_file(path)?,
        (None, None) => {
            return Err(EditError::Usage(
                "one of --snippet or --snippet-file is required".to_string(),
            ));
        }
    };

    // Precondition failures (exit 1) win over a bad mode (exit 2).
    if snippet.trim().is_empty() {
        return Err(EditError::EmptySnippet);
    }
    let mode: Mode = cli.mode.parse()?;

    EditRequest::new(&cli.file, mode, &snippet)?
        .with_pattern(cli.pattern.as_deref())
        .with_marker(cli.marker.as_deref(), cli.marker_style)
        .map(|request| {
            request
                .force(cli.force)
                .skip_backup(cli.no_backup)
                .dry_run(cli.dry_run)
        })
}

fn report(cli: &Cli, request: &EditRequest, outcome: &EditOutcome) -> anyhow::Result<()> {
    if cli.json {
        ui::print_report(request, outcome).context("failed to encode JSON report")?;
    } else {
        ui::print_outcome(outcome).context("failed to write output")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    init_logging(cli.verbose);

    let result = build_request(&cli)
        .and_then(|request| engine::apply_edit(&request).map(|outcome| (request, outcome)));

    match result {
        Ok((request, outcome)) => match report(&cli, &request, &outcome) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {:#}", err);
                ExitCode::from(2)
            }
        },
        Err(err) => {
            ui::print_error(&err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
