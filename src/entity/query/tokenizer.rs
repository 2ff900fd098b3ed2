// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Splitting a condition suffix on `And` / `Or`.

/// Logical connector between two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// `AND`
    And,
    /// `OR`
    Or
}

impl LogicalOp {
    /// SQL keyword.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR"
        }
    }
}

/// One condition as found in the method name, before operator parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionToken<'a> {
    /// Raw text, e.g. `CreatedAtGreaterThan`.
    pub text:      &'a str,
    /// Connector to the following condition; `None` for the last one.
    pub connector: Option<LogicalOp>
}

/// Splits the text after `By` into condition tokens.
pub trait ConditionTokenizer {
    /// Split `suffix` into tokens in order of appearance.
    fn tokenize<'a>(&self, suffix: &'a str) -> Vec<ConditionToken<'a>>;
}

/// Splits on every literal occurrence of `And` or `Or`.
///
/// Occurrences inside field names split as well (`Android` → `roid`,
/// `OrderID` → `derID`); a separator with nothing before it is dropped
/// along with its connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstringTokenizer;

impl ConditionTokenizer for SubstringTokenizer {
    fn tokenize<'a>(&self, suffix: &'a str) -> Vec<ConditionToken<'a>> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < suffix.len() {
            let rest = &suffix[i..];
            let separator = if rest.starts_with("And") {
                Some((LogicalOp::And, 3))
            } else if rest.starts_with("Or") {
                Some((LogicalOp::Or, 2))
            } else {
                None
            };

            match separator {
                Some((op, len)) => {
                    if i > start {
                        tokens.push(ConditionToken {
                            text:      &suffix[start..i],
                            connector: Some(op)
                        });
                    }
                    i += len;
                    start = i;
                }
                None => i += rest.chars().next().map_or(1, char::len_utf8)
            }
        }

        if start < suffix.len() {
            tokens.push(ConditionToken {
                text:      &suffix[start..],
                connector: None
            });
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(suffix: &str) -> Vec<(&str, Option<LogicalOp>)> {
        SubstringTokenizer
            .tokenize(suffix)
            .into_iter()
            .map(|t| (t.text, t.connector))
            .collect()
    }

    #[test]
    fn single_condition() {
        assert_eq!(split("Email"), vec![("Email", None)]);
    }

    #[test]
    fn and_or() {
        assert_eq!(
            split("EmailAndRoleOrUsername"),
            vec![
                ("Email", Some(LogicalOp::And)),
                ("Role", Some(LogicalOp::Or)),
                ("Username", None)
            ]
        );
    }

    #[test]
    fn substring_inside_field_splits() {
        assert_eq!(split("OrderID"), vec![("derID", None)]);
        assert_eq!(split("TheoryAndPractice"), vec![("Theory", Some(LogicalOp::And)), ("Practice", None)]);
        assert_eq!(split("MinOrder"), vec![("Min", Some(LogicalOp::Or)), ("der", None)]);
        assert_eq!(split("AndroidVersion"), vec![("roidVersion", None)]);
    }

    #[test]
    fn greater_than_or_equal_is_split() {
        assert_eq!(
            split("AgeGreaterThanOrEqual"),
            vec![("AgeGreaterThan", Some(LogicalOp::Or)), ("Equal", None)]
        );
    }

    #[test]
    fn empty_suffix() {
        assert!(split("").is_empty());
        assert!(split("And").is_empty());
    }

    #[test]
    fn non_ascii_is_kept_whole() {
        assert_eq!(split("ÄgeAndName"), vec![("Äge", Some(LogicalOp::And)), ("Name", None)]);
    }
}
