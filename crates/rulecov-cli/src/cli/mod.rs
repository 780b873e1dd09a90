//! Clap CLI definition: root struct and shared argument types.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

impl PathOrStdin {
    /// Label used in messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Output format for the report.
///
/// `Human` prints the markdown report to stdout and a summary line to stderr.
/// `Json` prints the report as a single JSON object to stdout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report (default).
    Human,
    /// Structured JSON report.
    Json,
}

/// Root CLI struct for the `rulecov` binary.
#[derive(Parser)]
#[command(
    name = "rulecov",
    version,
    about = "Rule coverage report from a cargo test JSON log",
    long_about = "Reads a newline-delimited JSON test log (libtest `--format json`),\n\
                  matches test names of the form <label>__<rule>_<subcase> against\n\
                  the built-in rule checklist, and prints a markdown report of\n\
                  passed, failed, and missing cases."
)]
pub struct Cli {
    /// Path to the test log, or `-` for stdin.
    #[arg(value_name = "LOG_FILE")]
    pub file: PathOrStdin,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human")]
    pub format: OutputFormat,

    /// Suppress the summary line and all non-error logs (incompatible with `--verbose`).
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail to stderr: event counts and timing
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input size in bytes.
    ///
    /// Can also be set via the `RULECOV_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(long, env = "RULECOV_MAX_FILE_SIZE", default_value = "268435456")]
    pub max_file_size: u64,
}
