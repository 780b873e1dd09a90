//! The table of expected test cases, grouped by rule.
//!
//! A [`Checklist`] maps each rule number to the ordered list of sub-case
//! numbers that a complete test run must report. Rules keep the order in
//! which they were declared, and that order drives the layout of the final
//! report. Once built, a checklist is never mutated.
use serde::Serialize;

// ---------------------------------------------------------------------------
// RuleCases
// ---------------------------------------------------------------------------

/// The expected sub-cases for a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCases {
    /// Rule number.
    pub rule: i64,
    /// Sub-case numbers in declaration order, without duplicates.
    pub subcases: Vec<i64>,
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

/// Ordered mapping from rule number to expected sub-case numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checklist {
    rules: Vec<RuleCases>,
}

impl Checklist {
    /// Builds a checklist from `(rule, subcases)` pairs.
    ///
    /// Rules appear in the order given. Declaring the same rule twice keeps its
    /// first position but replaces its sub-cases, the way a map literal with a
    /// repeated key behaves. Repeated sub-cases within one rule are collapsed
    /// so that every `(rule, subcase)` pair is listed exactly once.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: IntoIterator<Item = i64>,
    {
        let mut rules: Vec<RuleCases> = Vec::new();
        for (rule, subcases) in entries {
            let mut unique: Vec<i64> = Vec::new();
            for subcase in subcases {
                if !unique.contains(&subcase) {
                    unique.push(subcase);
                }
            }
            match rules.iter_mut().find(|existing| existing.rule == rule) {
                Some(existing) => existing.subcases = unique,
                None => rules.push(RuleCases {
                    rule,
                    subcases: unique,
                }),
            }
        }
        Self { rules }
    }

    /// The compiled-in checklist for the JACK validator rule set.
    pub fn jack_validator() -> Self {
        Self::new([
            (1, (1..=11).collect::<Vec<_>>()),
            (2, (1..=15).collect()),
            (3, (1..=11).collect()),
            (4, (1..=2).collect()),
            (5, (1..=4).collect()),
            (6, vec![0]),
            (7, vec![0]),
            (8, (1..=11).collect()),
            (9, (1..=11).collect()),
            (10, vec![1]),
        ])
    }

    /// Iterates over the rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleCases> {
        self.rules.iter()
    }

    /// Returns the expected sub-cases for `rule`, or `None` if the rule is not listed.
    pub fn subcases(&self, rule: i64) -> Option<&[i64]> {
        self.rules
            .iter()
            .find(|entry| entry.rule == rule)
            .map(|entry| entry.subcases.as_slice())
    }

    /// Returns `true` if `(rule, subcase)` is an expected case.
    pub fn contains(&self, rule: i64, subcase: i64) -> bool {
        self.subcases(rule)
            .is_some_and(|subcases| subcases.contains(&subcase))
    }

    /// Total number of expected `(rule, subcase)` cases.
    pub fn len(&self) -> usize {
        self.rules.iter().map(|entry| entry.subcases.len()).sum()
    }

    /// Returns `true` if no cases are expected at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn jack_validator_keeps_declaration_order() {
        let checklist = Checklist::jack_validator();
        let rules: Vec<i64> = checklist.rules().map(|entry| entry.rule).collect();
        assert_eq!(rules, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn jack_validator_case_counts() {
        let checklist = Checklist::jack_validator();
        assert_eq!(checklist.subcases(2).map(<[i64]>::len), Some(15));
        assert_eq!(checklist.subcases(6), Some([0].as_slice()));
        assert_eq!(checklist.subcases(10), Some([1].as_slice()));
        assert_eq!(checklist.len(), 11 + 15 + 11 + 2 + 4 + 1 + 1 + 11 + 11 + 1);
    }

    #[test]
    fn rules_are_not_sorted() {
        let checklist = Checklist::new([(3, vec![2, 1]), (1, vec![5])]);
        let rules: Vec<i64> = checklist.rules().map(|entry| entry.rule).collect();
        assert_eq!(rules, vec![3, 1]);
        assert_eq!(checklist.subcases(3), Some([2, 1].as_slice()));
    }

    #[test]
    fn repeated_rule_replaces_subcases_in_place() {
        let checklist = Checklist::new([(1, vec![1]), (2, vec![1]), (1, vec![7, 8])]);
        let rules: Vec<i64> = checklist.rules().map(|entry| entry.rule).collect();
        assert_eq!(rules, vec![1, 2]);
        assert_eq!(checklist.subcases(1), Some([7, 8].as_slice()));
    }

    #[test]
    fn repeated_subcases_are_collapsed() {
        let checklist = Checklist::new([(1, vec![2, 2, 1, 2])]);
        assert_eq!(checklist.subcases(1), Some([2, 1].as_slice()));
        assert_eq!(checklist.len(), 2);
    }

    #[test]
    fn contains_checks_rule_and_subcase() {
        let checklist = Checklist::new([(1, vec![1, 2])]);
        assert!(checklist.contains(1, 2));
        assert!(!checklist.contains(1, 3));
        assert!(!checklist.contains(2, 1));
    }

    #[test]
    fn empty_checklist() {
        let checklist = Checklist::default();
        assert!(checklist.is_empty());
        assert_eq!(checklist.rules().count(), 0);
    }
}
