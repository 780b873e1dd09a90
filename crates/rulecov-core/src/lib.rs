#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod checklist;
pub mod identifier;
pub mod log;
pub mod report;
pub mod results;

pub use checklist::{Checklist, RuleCases};
pub use identifier::{Identifier, IdentifierError, ParsedName, parse_test_name};
pub use log::{LogError, TestEvent, parse_line, terminal_events};
pub use report::{CaseOutcome, CaseStatus, Report, RuleSection, Summary, generate};
pub use results::{CaseRecord, ResultsTable, aggregate};
