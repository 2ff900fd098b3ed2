// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Comparison operators and suffix parsing.

/// Comparison applied to one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `LIKE $n`
    Like,
    /// `LIKE $n || '%'`
    StartsWith,
    /// `LIKE '%' || $n`
    EndsWith,
    /// `LIKE '%' || $n || '%'`
    Contains,
    /// `= ANY($n)`
    In,
    /// `<> ALL($n)`
    NotIn,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull
}

/// Suffixes, most specific first.
const SUFFIXES: [(&str, Operator); 12] = [
    ("GreaterThanOrEqual", Operator::Gte),
    ("LessThanOrEqual", Operator::Lte),
    ("GreaterThan", Operator::Gt),
    ("LessThan", Operator::Lt),
    ("StartingWith", Operator::StartsWith),
    ("EndingWith", Operator::EndsWith),
    ("Containing", Operator::Contains),
    ("Like", Operator::Like),
    ("NotIn", Operator::NotIn),
    ("In", Operator::In),
    ("IsNotNull", Operator::IsNotNull),
    ("IsNull", Operator::IsNull)
];

impl Operator {
    /// SQL keyword, e.g. `>=` or `LIKE`.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Like | Self::StartsWith | Self::EndsWith | Self::Contains => "LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL"
        }
    }

    /// Whether the operator binds a parameter.
    #[must_use]
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Render `<column> <operator> <param>`.
    ///
    /// `param` is the 1-based placeholder number; it is ignored by
    /// operators that take no value.
    #[must_use]
    pub fn render(&self, column: &str, param: Option<usize>) -> String {
        let p = param.map(|n| format!("${n}")).unwrap_or_default();
        match self {
            Self::StartsWith => format!("{column} LIKE {p} || '%'"),
            Self::EndsWith => format!("{column} LIKE '%' || {p}"),
            Self::Contains => format!("{column} LIKE '%' || {p} || '%'"),
            Self::In => format!("{column} = ANY({p})"),
            Self::NotIn => format!("{column} <> ALL({p})"),
            Self::IsNull | Self::IsNotNull => format!("{column} {}", self.as_sql()),
            _ => format!("{column} {} {p}", self.as_sql())
        }
    }
}

/// Split a condition into field name and operator.
///
/// Suffixes are tried most specific first and must leave a non-empty field
/// name. Without a suffix, a `Not` prefix followed by an uppercase letter
/// yields [`Operator::Ne`]; anything else is [`Operator::Eq`].
///
/// # Example
///
/// ```rust
/// use entity_codegen::entity::query::{Operator, split_operator};
///
/// assert_eq!(split_operator("AgeGreaterThanOrEqual"), ("Age", Operator::Gte));
/// assert_eq!(split_operator("NotActive"), ("Active", Operator::Ne));
/// assert_eq!(split_operator("Notes"), ("Notes", Operator::Eq));
/// ```
#[must_use]
pub fn split_operator(text: &str) -> (&str, Operator) {
    for (suffix, operator) in SUFFIXES {
        if let Some(field) = text.strip_suffix(suffix)
            && !field.is_empty()
        {
            return (field, operator);
        }
    }

    if let Some(field) = text.strip_prefix("Not")
        && field.starts_with(char::is_uppercase)
    {
        return (field, Operator::Ne);
    }

    (text, Operator::Eq)
}
