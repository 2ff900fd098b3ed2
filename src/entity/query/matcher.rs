// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method name decomposition.

use super::{
    operator::{Operator, split_operator},
    tokenizer::{ConditionTokenizer, LogicalOp, SubstringTokenizer}
};
use crate::utils::case::snake_case;

const ORDER_BY: &str = "OrderBy";

/// What a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryShape {
    /// Number of matching rows.
    Count,
    /// Whether any row matches.
    Exists,
    /// Deletes matching rows.
    Delete,
    /// Every matching row.
    Many,
    /// One row, with a limit.
    Single
}

/// One `WHERE` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Field name as written in the method name, e.g. `CreatedAt`.
    pub field:     String,
    /// Column name, e.g. `created_at`.
    pub column:    String,
    /// Comparison.
    pub operator:  Operator,
    /// 1-based placeholder number; `None` for operators without a value.
    pub param:     Option<usize>,
    /// Connector to the following condition.
    pub connector: Option<LogicalOp>
}

impl Condition {
    /// Render as SQL, e.g. `created_at > $2`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.operator.render(&self.column, self.param)
    }
}

/// A method name decomposed into query parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Method name the query was derived from.
    pub method:     String,
    /// Result shape.
    pub shape:      QueryShape,
    /// Conditions in order of appearance.
    pub conditions: Vec<Condition>,
    /// `ORDER BY` body, e.g. `created_at DESC`.
    pub order_by:   Option<String>,
    /// `LIMIT` value.
    pub limit:      Option<u64>
}

impl ParsedQuery {
    /// Number of parameters the query binds.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.conditions.iter().filter(|c| c.param.is_some()).count()
    }
}

/// Decompose a PascalCase method name.
///
/// Returns `None` when the name does not start with a known verb, or when a
/// verb other than `Count` is not followed by `<Subject>By<Conditions>`.
///
/// # Example
///
/// ```rust
/// use entity_codegen::entity::query::{QueryShape, match_method};
///
/// let parsed = match_method("Top10UsersByRoleOrderByCreatedAtDesc").unwrap();
/// assert_eq!(parsed.shape, QueryShape::Single);
/// assert_eq!(parsed.limit, Some(10));
/// assert_eq!(parsed.order_by.as_deref(), Some("created_at DESC"));
///
/// assert!(match_method("GetUserByEmail").is_none());
/// ```
#[must_use]
pub fn match_method(name: &str) -> Option<ParsedQuery> {
    match_method_with(name, &SubstringTokenizer)
}

/// [`match_method`] with a custom condition tokenizer.
#[must_use]
pub fn match_method_with(name: &str, tokenizer: &impl ConditionTokenizer) -> Option<ParsedQuery> {
    let (shape, verb_len) = verb(name)?;
    let rest = &name[verb_len..];

    let recognized = match shape {
        QueryShape::Count => !rest.is_empty(),
        _ => rest
            .match_indices("By")
            .any(|(at, _)| at > 0 && at + 2 < rest.len())
    };
    if !recognized {
        return None;
    }

    Some(ParsedQuery {
        method: name.to_string(),
        shape,
        conditions: extract_fields(name, tokenizer),
        order_by: extract_order_by(name),
        limit: extract_limit(name)
    })
}

/// Leading verb and its length in bytes.
fn verb(name: &str) -> Option<(QueryShape, usize)> {
    const VERBS: [(&str, QueryShape); 6] = [
        ("Count", QueryShape::Count),
        ("Exists", QueryShape::Exists),
        ("Delete", QueryShape::Delete),
        ("List", QueryShape::Many),
        ("Find", QueryShape::Many),
        ("First", QueryShape::Single)
    ];

    if let Some((verb, shape)) = VERBS.iter().find(|(v, _)| name.starts_with(v)) {
        return Some((*shape, verb.len()));
    }

    let digits = top_digits(name)?;
    Some((QueryShape::Single, 3 + digits.len()))
}

/// Digits following a leading `Top`, if there are any.
fn top_digits(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("Top")?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// `LIMIT` implied by the verb: 1 for `First`, N for `Top<N>`.
#[must_use]
pub fn extract_limit(name: &str) -> Option<u64> {
    if name.starts_with("First") {
        return Some(1);
    }
    top_digits(name)?.parse().ok()
}

/// Whether `prefix` is a bare verb, with no subject.
fn is_standard_prefix(prefix: &str) -> bool {
    match prefix {
        "List" | "Find" | "Exists" | "Count" | "Delete" | "First" => true,
        _ => prefix
            .strip_prefix("Top")
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Position of the `OrderBy` modifier, if the name has a genuine one.
///
/// The last `OrderBy` counts. It is not a modifier when its `By` is the
/// first `By` of the name and only a bare verb precedes it: in
/// `ExistsOrderByCustomerID`, `Order` is the subject.
fn order_by_index(name: &str) -> Option<usize> {
    let ob = name.rfind(ORDER_BY)?;
    if let Some(by) = name.find("By")
        && by >= ob
        && is_standard_prefix(&name[..ob])
    {
        return None;
    }
    Some(ob)
}

/// `ORDER BY` body encoded in the name, e.g. `created_at DESC`.
///
/// Direction defaults to `ASC`.
///
/// # Example
///
/// ```rust
/// use entity_codegen::entity::query::extract_order_by;
///
/// assert_eq!(
///     extract_order_by("ListUsersByEmailOrderByCreatedAtDesc").as_deref(),
///     Some("created_at DESC")
/// );
/// assert_eq!(extract_order_by("ExistsOrderByCustomerID"), None);
/// ```
#[must_use]
pub fn extract_order_by(name: &str) -> Option<String> {
    let ob = order_by_index(name)?;
    let suffix = &name[ob + ORDER_BY.len()..];

    let (field, direction) = if let Some(field) = suffix.strip_suffix("Desc") {
        (field, "DESC")
    } else if let Some(field) = suffix.strip_suffix("Asc") {
        (field, "ASC")
    } else {
        (suffix, "ASC")
    };

    if field.is_empty() {
        return None;
    }
    Some(format!("{} {direction}", snake_case(field)))
}

/// Conditions following the first `By`, with the `OrderBy` modifier removed.
///
/// Parameters are numbered from 1 in order of appearance, skipping
/// operators that take no value.
#[must_use]
pub fn extract_fields(name: &str, tokenizer: &impl ConditionTokenizer) -> Vec<Condition> {
    let Some(by) = name.find("By") else {
        return Vec::new();
    };

    let mut end = name.len();
    if let Some(ob) = order_by_index(name) {
        // The first `By` is the modifier's own: no conditions at all
        if by == ob + ORDER_BY.len() - 2 {
            return Vec::new();
        }
        if ob > by {
            end = ob;
        }
    }

    let mut next_param = 1;
    tokenizer
        .tokenize(&name[by + 2..end])
        .into_iter()
        .map(|token| {
            let (field, operator) = split_operator(token.text);
            let param = operator.takes_value().then(|| {
                let n = next_param;
                next_param += 1;
                n
            });
            Condition {
                field: field.to_string(),
                column: snake_case(field),
                operator,
                param,
                connector: token.connector
            }
        })
        .collect()
}
