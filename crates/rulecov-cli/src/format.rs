/// Report and summary output in human (markdown) and JSON modes.
///
/// - **Human mode** (default): the markdown report goes to stdout followed by
///   one trailing newline, and a `N passed, M failed, K missing` summary line
///   goes to stderr.
/// - **JSON mode**: the report model is written to stdout as one pretty JSON
///   object. The counts are part of that object, so no summary line is
///   written.
///
/// The **quiet** flag suppresses the stderr summary.
use std::io::Write;

use rulecov_core::{Report, Summary};

use crate::OutputFormat;

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for output writers, derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct FormatterConfig {
    /// Output format selected with `--format`.
    pub format: OutputFormat,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Writes `report` to `writer` in the configured format.
///
/// # Errors
///
/// Returns an error if serialization or writing to `writer` fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &Report,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match config.format {
        OutputFormat::Human => writeln!(writer, "{report}"),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Writes the summary line to `writer` in human mode.
///
/// Format: `3 passed, 1 failed, 70 missing`
///
/// Nothing is written in quiet mode or in JSON mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &Summary,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match config.format {
        OutputFormat::Human => writeln!(writer, "{summary}"),
        OutputFormat::Json => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
