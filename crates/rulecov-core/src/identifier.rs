//! Parsing of rule identifiers embedded in test names.
//!
//! A test name has the shape `<label>__<numbers>`. The numeric suffix is
//! either `<rule>_<subcase>` for a single case, or
//! `<rule>_<subcase>_to_<rule>_<subcase>` for a rectangular block of cases:
//!
//! ```text
//! project_name_is_project__9_1        -> Single { rule: 9, subcase: 1 }
//! agent_linked_objects__3_1_to_3_7    -> Range  { 3.1 ..= 3.7 }
//! ```
//!
//! The third field of a range only fills a position; `to` is conventional but
//! any token is accepted there. The label is free-form and may contain single
//! underscores and module paths (`tests::foo__1_1`), but exactly one `__`
//! separator must appear.

/// Separator between the free-form label and the numeric suffix.
pub const NAME_SEPARATOR: &str = "__";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when a test name does not encode a rule identifier.
///
/// Every variant carries the full offending test name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The name contains no `__` separator.
    #[error("test name {name:?} has no `__` separator before its rule number")]
    MissingSeparator {
        /// The rejected test name.
        name: String,
    },

    /// The name contains more than one `__` separator.
    #[error("test name {name:?} has more than one `__` separator")]
    ExtraSeparator {
        /// The rejected test name.
        name: String,
    },

    /// The numeric suffix split into neither 2 nor 5 fields.
    #[error(
        "test name {name:?} has {count} numeric fields, expected 2 (rule_subcase) or 5 (rule_subcase_to_rule_subcase)"
    )]
    UnexpectedFieldCount {
        /// The rejected test name.
        name: String,
        /// Number of `_`-separated fields found after `__`.
        count: usize,
    },

    /// A numeric field is not a decimal integer.
    #[error("test name {name:?} has non-numeric field {field:?}")]
    InvalidNumber {
        /// The rejected test name.
        name: String,
        /// The field that failed to parse.
        field: String,
    },
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// The rule coordinates a test name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Exactly one `(rule, subcase)` case.
    Single {
        /// Rule number.
        rule: i64,
        /// Sub-case number.
        subcase: i64,
    },
    /// Every case in `rule_start..=rule_end` x `subcase_start..=subcase_end`.
    Range {
        /// First rule of the block.
        rule_start: i64,
        /// First sub-case of the block.
        subcase_start: i64,
        /// Last rule of the block, inclusive.
        rule_end: i64,
        /// Last sub-case of the block, inclusive.
        subcase_end: i64,
    },
}

impl Identifier {
    /// Inclusive `(rule_start, subcase_start, rule_end, subcase_end)` bounds.
    fn bounds(self) -> (i64, i64, i64, i64) {
        match self {
            Self::Single { rule, subcase } => (rule, subcase, rule, subcase),
            Self::Range {
                rule_start,
                subcase_start,
                rule_end,
                subcase_end,
            } => (rule_start, subcase_start, rule_end, subcase_end),
        }
    }

    /// Returns `true` if `(rule, subcase)` lies inside the block.
    ///
    /// Containment is computed from the bounds, so a range is never expanded
    /// case by case.
    pub fn contains(self, rule: i64, subcase: i64) -> bool {
        let (rule_start, subcase_start, rule_end, subcase_end) = self.bounds();
        (rule_start..=rule_end).contains(&rule) && (subcase_start..=subcase_end).contains(&subcase)
    }

    /// Returns `true` if the block covers at least one sub-case of `rule`.
    pub fn covers_rule(self, rule: i64) -> bool {
        let (rule_start, subcase_start, rule_end, subcase_end) = self.bounds();
        (rule_start..=rule_end).contains(&rule) && subcase_start <= subcase_end
    }

    /// Returns `true` for a range whose end precedes its start on either axis.
    pub fn is_empty(self) -> bool {
        let (rule_start, subcase_start, rule_end, subcase_end) = self.bounds();
        rule_end < rule_start || subcase_end < subcase_start
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { rule, subcase } => write!(f, "{rule}.{subcase}"),
            Self::Range {
                rule_start,
                subcase_start,
                rule_end,
                subcase_end,
            } => write!(f, "{rule_start}.{subcase_start}-{rule_end}.{subcase_end}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A test name split into its label and rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName<'a> {
    /// Everything before the `__` separator.
    pub label: &'a str,
    /// The rule coordinates encoded after the separator.
    pub identifier: Identifier,
}

/// Parses a test name of the form `<label>__<numbers>`.
///
/// # Errors
///
/// Returns [`IdentifierError`] when the separator is missing or repeated, when
/// the suffix does not have 2 or 5 fields, or when a numeric field does not
/// parse as an integer.
pub fn parse_test_name(name: &str) -> Result<ParsedName<'_>, IdentifierError> {
    let mut halves = name.split(NAME_SEPARATOR);
    let (Some(label), Some(numbers)) = (halves.next(), halves.next()) else {
        return Err(IdentifierError::MissingSeparator {
            name: name.to_owned(),
        });
    };
    if halves.next().is_some() {
        return Err(IdentifierError::ExtraSeparator {
            name: name.to_owned(),
        });
    }

    let fields: Vec<&str> = numbers.split('_').collect();
    let identifier = match fields.as_slice() {
        [rule, subcase] => Identifier::Single {
            rule: number(name, rule)?,
            subcase: number(name, subcase)?,
        },
        [rule_start, subcase_start, _marker, rule_end, subcase_end] => Identifier::Range {
            rule_start: number(name, rule_start)?,
            subcase_start: number(name, subcase_start)?,
            rule_end: number(name, rule_end)?,
            subcase_end: number(name, subcase_end)?,
        },
        other => {
            return Err(IdentifierError::UnexpectedFieldCount {
                name: name.to_owned(),
                count: other.len(),
            });
        }
    };

    Ok(ParsedName { label, identifier })
}

fn number(name: &str, field: &str) -> Result<i64, IdentifierError> {
    field.parse().map_err(|_| IdentifierError::InvalidNumber {
        name: name.to_owned(),
        field: field.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
