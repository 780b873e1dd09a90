//! Resolution of checklist cases against recorded runs, and report rendering.
//!
//! [`Report::build`] walks the [`Checklist`] in declaration order and assigns
//! every expected case exactly one [`CaseStatus`]. The resulting model is
//! rendered as markdown through its `Display` impl, or serialized as JSON.
//!
//! Markdown layout:
//!
//! ```text
//! # Test Report for JACK-Validator
//! Version:
//! Tested on:
//!
//!
//! ## Tests for Rule #1
//! Rule #1.1 has passed.
//! Rule #1.2 is missing from tests.
//!
//! ## Tests for Rule #2
//! Test #2.1 is missing from tests.
//!
//! ```
//!
//! A sub-case missing from a rule that has other results reads `Rule #..`,
//! while every sub-case of a rule with no results at all reads `Test #..`.
//! Consumers match on both wordings, so they are kept distinct.
use std::fmt;

use serde::Serialize;

use crate::checklist::Checklist;
use crate::results::{CaseRecord, ResultsTable};

/// Title line of every report.
pub const REPORT_TITLE: &str = "Test Report for JACK-Validator";

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Outcome of one expected case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Every recorded run is `ok`.
    Passed,
    /// At least one recorded run is not `ok`.
    Failed,
    /// The rule has results, but none for this sub-case.
    CaseMissing,
    /// The rule has no results at all.
    RuleMissing,
}

impl CaseStatus {
    /// Resolves the status of `(rule, subcase)` from the recorded runs.
    ///
    /// Runs are checked in order and the first non-`ok` run decides the case
    /// as failed without looking further.
    pub fn resolve(results: &ResultsTable, rule: i64, subcase: i64) -> Self {
        if !results.has_rule(rule) {
            return Self::RuleMissing;
        }
        let mut records = results.records(rule, subcase).peekable();
        if records.peek().is_none() {
            Self::CaseMissing
        } else if records.all(CaseRecord::is_ok) {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    /// Returns `true` for either missing variant.
    pub fn is_missing(self) -> bool {
        matches!(self, Self::CaseMissing | Self::RuleMissing)
    }
}

// ---------------------------------------------------------------------------
// CaseOutcome / RuleSection
// ---------------------------------------------------------------------------

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    /// Rule number.
    pub rule: i64,
    /// Sub-case number.
    pub subcase: i64,
    /// Resolved status.
    pub status: CaseStatus,
    /// Number of recorded runs behind the status.
    pub runs: usize,
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { rule, subcase, .. } = self;
        match self.status {
            CaseStatus::Passed => write!(f, "Rule #{rule}.{subcase} has passed."),
            CaseStatus::Failed => write!(f, "Rule #{rule}.{subcase} has failed."),
            CaseStatus::CaseMissing => write!(f, "Rule #{rule}.{subcase} is missing from tests."),
            CaseStatus::RuleMissing => write!(f, "Test #{rule}.{subcase} is missing from tests."),
        }
    }
}

/// All outcomes for one rule, in checklist order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSection {
    /// Rule number.
    pub rule: i64,
    /// One outcome per expected sub-case.
    pub cases: Vec<CaseOutcome>,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Case counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Cases whose runs all passed.
    pub passed: usize,
    /// Cases with at least one failing run.
    pub failed: usize,
    /// Cases with no runs.
    pub missing: usize,
}

impl Summary {
    /// Total number of cases counted.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.missing
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} missing",
            self.passed, self.failed, self.missing
        )
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A resolved coverage report.
///
/// `version` and `tested_on` are header placeholders and are left empty;
/// keeping them static makes two runs over the same log byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Report title.
    pub title: String,
    /// Version of the system under test.
    pub version: String,
    /// When the tests were run.
    pub tested_on: String,
    /// Per-rule sections in checklist order.
    pub sections: Vec<RuleSection>,
    /// Counts over all sections.
    pub summary: Summary,
}

impl Report {
    /// Resolves every case of `checklist` against `results`.
    pub fn build(checklist: &Checklist, results: &ResultsTable) -> Self {
        let mut summary = Summary::default();
        let sections = checklist
            .rules()
            .map(|entry| {
                let cases = entry
                    .subcases
                    .iter()
                    .map(|&subcase| {
                        let status = CaseStatus::resolve(results, entry.rule, subcase);
                        match status {
                            CaseStatus::Passed => summary.passed += 1,
                            CaseStatus::Failed => summary.failed += 1,
                            CaseStatus::CaseMissing | CaseStatus::RuleMissing => {
                                summary.missing += 1;
                            }
                        }
                        CaseOutcome {
                            rule: entry.rule,
                            subcase,
                            status,
                            runs: results.records(entry.rule, subcase).count(),
                        }
                    })
                    .collect();
                RuleSection {
                    rule: entry.rule,
                    cases,
                }
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_owned(),
            version: String::new(),
            tested_on: String::new(),
            sections,
            summary,
        }
    }

    /// Iterates over every outcome in report order.
    pub fn outcomes(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.sections.iter().flat_map(|section| section.cases.iter())
    }

    /// The missing table: for each rule with missing cases, its missing
    /// sub-cases in checklist order.
    pub fn missing(&self) -> Vec<(i64, Vec<i64>)> {
        self.sections
            .iter()
            .filter_map(|section| {
                let subcases: Vec<i64> = section
                    .cases
                    .iter()
                    .filter(|case| case.status.is_missing())
                    .map(|case| case.subcase)
                    .collect();
                (!subcases.is_empty()).then_some((section.rule, subcases))
            })
            .collect()
    }

    /// Renders the markdown report.
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Tested on:  {}", self.tested_on)?;
        f.write_str("\n\n")?;

        for section in &self.sections {
            writeln!(f, "## Tests for Rule #{}", section.rule)?;
            for case in &section.cases {
                writeln!(f, "{case}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Aggregates `content` and resolves it against `checklist` in one call.
///
/// # Errors
///
/// Propagates any [`crate::LogError`] from reading the log.
pub fn generate(checklist: &Checklist, content: &str) -> Result<Report, crate::LogError> {
    let results = crate::results::aggregate(content)?;
    let outside = results.runs_outside(checklist);
    if outside > 0 {
        tracing::debug!(
            count = outside,
            "recorded runs outside the checklist are left out of the report"
        );
    }
    Ok(Report::build(checklist, &results))
}

#[cfg(test)]
mod tests;
