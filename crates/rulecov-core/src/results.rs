//! Aggregation of terminal test events into per-case run histories.
//!
//! [`ResultsTable`] answers `rule -> subcase -> [CaseRecord]`. Every recorded
//! run is kept once, in arrival order, together with the [`Identifier`] it was
//! logged under; a later run of the same case is appended rather than
//! replacing the earlier one. A range identifier counts as a run of every case
//! in its block, but the block is never expanded: lookups test containment
//! against its bounds, so memory grows with the number of log lines only.
use serde::Serialize;

use crate::checklist::Checklist;
use crate::identifier::{Identifier, parse_test_name};
use crate::log::{LogError, OK_EVENT, terminal_events};

// ---------------------------------------------------------------------------
// CaseRecord
// ---------------------------------------------------------------------------

/// One recorded run of a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    /// Test label, i.e. the test name without its numeric suffix.
    pub test_name: String,
    /// Terminal event state, e.g. `ok` or `failed`.
    pub state: String,
}

impl CaseRecord {
    /// Creates a record from a label and an event state.
    pub fn new(test_name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            state: state.into(),
        }
    }

    /// Returns `true` if this run passed.
    pub fn is_ok(&self) -> bool {
        self.state == OK_EVENT
    }
}

// ---------------------------------------------------------------------------
// ResultsTable
// ---------------------------------------------------------------------------

/// Recorded runs, each tagged with the cases it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    runs: Vec<(Identifier, CaseRecord)>,
}

impl ResultsTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the run history of `(rule, subcase)`.
    pub fn record(&mut self, rule: i64, subcase: i64, record: CaseRecord) {
        self.runs
            .push((Identifier::Single { rule, subcase }, record));
    }

    /// Appends `record` to the run history of every case covered by
    /// `identifier`.
    ///
    /// Returns `false`, recording nothing, for an inverted range.
    pub fn record_identifier(&mut self, identifier: Identifier, record: CaseRecord) -> bool {
        if identifier.is_empty() {
            return false;
        }
        self.runs.push((identifier, record));
        true
    }

    /// Returns `true` if at least one run was recorded for any sub-case of `rule`.
    pub fn has_rule(&self, rule: i64) -> bool {
        self.runs.iter().any(|(id, _)| id.covers_rule(rule))
    }

    /// Iterates over the run history of `(rule, subcase)` in arrival order.
    pub fn records(&self, rule: i64, subcase: i64) -> impl Iterator<Item = &CaseRecord> + '_ {
        self.runs
            .iter()
            .filter(move |(id, _)| id.contains(rule, subcase))
            .map(|(_, record)| record)
    }

    /// Number of recorded runs that cover no case of `checklist`.
    pub fn runs_outside(&self, checklist: &Checklist) -> usize {
        self.runs
            .iter()
            .filter(|(id, _)| {
                !checklist.rules().any(|entry| {
                    entry
                        .subcases
                        .iter()
                        .any(|&subcase| id.contains(entry.rule, subcase))
                })
            })
            .count()
    }

    /// Number of recorded runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

/// Builds a [`ResultsTable`] from the full text of a log in a single pass.
///
/// # Errors
///
/// Returns the first [`LogError`] met: a line that is not valid JSON, a
/// missing required field, or a test name without a rule identifier.
pub fn aggregate(content: &str) -> Result<ResultsTable, LogError> {
    let mut table = ResultsTable::new();
    let mut events = 0usize;

    for event in terminal_events(content) {
        let event = event?;
        let parsed = parse_test_name(&event.name).map_err(|source| LogError::Identifier {
            line: event.line,
            source,
        })?;

        let record = CaseRecord::new(parsed.label, event.event);
        if !table.record_identifier(parsed.identifier, record) {
            tracing::warn!(
                line = event.line,
                name = %event.name,
                "range identifier {} covers no cases",
                parsed.identifier
            );
        }
        events += 1;
    }

    tracing::debug!(events, runs = table.len(), "aggregated test log");
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
