//! The report pipeline behind `rulecov <LOG_FILE>`.
//!
//! Reads the whole log, aggregates it against the built-in checklist, and
//! writes the report. Nothing reaches stdout unless the whole log parsed.
use std::io::Write;
use std::time::Instant;

use rulecov_core::{Checklist, generate};

use crate::Cli;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_report, write_summary};
use crate::io::read_input;

/// Runs the pipeline for `cli` against the real stdout and stderr.
///
/// # Errors
///
/// See [`run_with`].
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let content = read_input(&cli.file, cli.max_file_size)?;
    let config = FormatterConfig::from_flags(cli.format, cli.quiet);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_with(
        &Checklist::jack_validator(),
        &content,
        &cli.file.label(),
        &config,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Builds the report for `content` against `checklist` and writes it.
///
/// `source` labels the input in error messages.
///
/// # Errors
///
/// - [`CliError::ParseFailed`] (exit 2) if any log line is malformed.
/// - [`CliError::OutputFailed`] (exit 1) if writing the report fails.
pub fn run_with<O: Write, E: Write>(
    checklist: &Checklist,
    content: &str,
    source: &str,
    config: &FormatterConfig,
    out: &mut O,
    err: &mut E,
) -> Result<(), CliError> {
    let started = Instant::now();
    let report = generate(checklist, content).map_err(|error| CliError::ParseFailed {
        source: source.to_owned(),
        error,
    })?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis(),
        cases = report.summary.total(),
        "report generated"
    );

    write_report(out, &report, config)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::OutputFailed {
            detail: e.to_string(),
        })?;

    // A summary that cannot reach stderr does not invalidate the report.
    if let Err(e) = write_summary(err, &report.summary, config) {
        tracing::warn!("failed to write summary: {e}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
