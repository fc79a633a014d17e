use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::error::EditError;
use crate::types::{EditOutcome, EditRequest, Report};

// ANSI colors, only emitted when the stream is a terminal.
const GREEN: &str = "\u{001b}[32m";
const YELLOW: &str = "\u{001b}[93m";
const RED: &str = "\u{001b}[91m";
const GRAY: &str = "\u{001b}[90m";
const RESET: &str = "\u{001b}[0m";

fn paint(color: &str, text: &str, tty: bool) -> String {
    if tty {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn backup_created(path: &Path) {
    let tty = io::stdout().is_terminal();
    println!(
        "{}",
        paint(GRAY, &format!("Backup created: {}", path.display()), tty)
    );
}

/// Prints the human-readable result of a finished edit.
pub fn print_outcome(outcome: &EditOutcome) -> io::Result<()> {
    let tty = io::stdout().is_terminal();
    match outcome {
        EditOutcome::Applied { backup } => {
            if let Some(path) = backup {
                backup_created(path);
            }
            println!("{}", paint(GREEN, "Edit applied successfully.", tty));
        }
        EditOutcome::AlreadyPresent { marker } => {
            let msg = format!(
                "Skipping: marker '{}' already present. Use --force to insert again.",
                marker
            );
            println!("{}", paint(YELLOW, &msg, tty));
        }
        // Raw content only, so the output can be redirected to a file.
        EditOutcome::DryRun { content } => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn print_report(request: &EditRequest, outcome: &EditOutcome) -> serde_json::Result<()> {
    let report = Report::new(request, outcome);
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

pub fn print_error(err: &EditError) {
    let tty = io::stderr().is_terminal();
    eprintln!("{}", paint(RED, &format!("Error: {}", err), tty));
}
