//! Reading newline-delimited JSON test logs.
//!
//! The input is the event stream written by the libtest JSON formatter: one
//! object per line, with suite records (`"type": "suite"`) interleaved with
//! test records (`"type": "test"`). Only terminal test events, i.e. test
//! records whose `event` is anything other than `"started"`, carry results.
//!
//! ```text
//! {"type":"suite","event":"started","test_count":2}
//! {"type":"test","event":"started","name":"agent_name_is_agent__9_3"}
//! {"type":"test","name":"agent_name_is_agent__9_3","event":"ok"}
//! ```
use serde::Serialize;
use serde_json::Value;

use crate::identifier::IdentifierError;

/// `type` value of records that describe an individual test.
pub const TEST_RECORD: &str = "test";

/// `event` value emitted when a test begins; carries no outcome.
pub const STARTED_EVENT: &str = "started";

/// `event` value of a passing test.
pub const OK_EVENT: &str = "ok";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while reading a log. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The line is not a JSON object of the expected shape.
    #[error("line {line}: invalid JSON: {detail}")]
    InvalidJson {
        /// Line number of the offending record.
        line: usize,
        /// The parser's description of the problem.
        detail: String,
    },

    /// A field required for this record is absent.
    #[error("line {line}: missing required field `{field}`")]
    MissingField {
        /// Line number of the offending record.
        line: usize,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A field is present but not of the type this record needs.
    #[error("line {line}: field `{field}` has the wrong type")]
    InvalidField {
        /// Line number of the offending record.
        line: usize,
        /// Name of the mistyped field.
        field: &'static str,
    },

    /// A terminal test event whose name does not encode a rule identifier.
    #[error("line {line}: {source}")]
    Identifier {
        /// Line number of the offending record.
        line: usize,
        /// Why the test name was rejected.
        source: IdentifierError,
    },
}

impl LogError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidJson { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidField { line, .. }
            | Self::Identifier { line, .. } => *line,
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One terminal test event: the full test name and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestEvent {
    /// Line the event was read from.
    pub line: usize,
    /// Full test name as logged, including the numeric suffix.
    pub name: String,
    /// Outcome, e.g. `ok`, `failed`, `ignored`.
    pub event: String,
}

/// Parses a single log line.
///
/// Returns `Ok(None)` for records that are valid but carry no result: any
/// record whose `type` is not the string `"test"` (suite records, `null`) and
/// `started` test events. Only test records need an `event`, and only
/// terminal ones need a `name`. A non-string `event` is kept as its JSON text,
/// so it never counts as a pass.
///
/// # Errors
///
/// - [`LogError::InvalidJson`] if the line is not a JSON object, including an
///   empty line.
/// - [`LogError::MissingField`] if `type` is absent, if a test record has no
///   `event`, or if a terminal test event has no `name`.
/// - [`LogError::InvalidField`] if the `name` of a terminal test event is not
///   a string.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TestEvent>, LogError> {
    let value: Value = serde_json::from_str(text).map_err(|e| LogError::InvalidJson {
        line,
        detail: e.to_string(),
    })?;
    let Value::Object(record) = value else {
        return Err(LogError::InvalidJson {
            line,
            detail: "expected a JSON object".to_owned(),
        });
    };

    let record_type = record.get("type").ok_or(LogError::MissingField {
        line,
        field: "type",
    })?;
    if record_type.as_str() != Some(TEST_RECORD) {
        return Ok(None);
    }

    let event = match record.get("event") {
        Some(Value::String(event)) if event == STARTED_EVENT => return Ok(None),
        Some(Value::String(event)) => event.clone(),
        Some(other) => other.to_string(),
        None => {
            return Err(LogError::MissingField {
                line,
                field: "event",
            });
        }
    };

    let name = match record.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(LogError::InvalidField {
                line,
                field: "name",
            });
        }
        None => {
            return Err(LogError::MissingField {
                line,
                field: "name",
            });
        }
    };

    Ok(Some(TestEvent { line, name, event }))
}

/// Iterates over the terminal test events in `content`, in file order.
///
/// Every line must hold a JSON object; a blank line is an
/// [`LogError::InvalidJson`]. The iterator yields the first error it meets;
/// callers are expected to stop there.
pub fn terminal_events(content: &str) -> impl Iterator<Item = Result<TestEvent, LogError>> + '_ {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, text)| parse_line(index + 1, text).transpose())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
