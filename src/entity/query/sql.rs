// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL rendering of parsed queries.

use super::{
    matcher::{ParsedQuery, QueryShape},
    tokenizer::LogicalOp
};

/// Render a parsed query against `table`.
///
/// `table` is inserted verbatim, so pass it quoted if it needs quoting.
/// `columns` lists the selected columns for [`QueryShape::Many`] and
/// [`QueryShape::Single`]; an empty list selects `*`. `ORDER BY` and
/// `LIMIT` are not rendered for counts and deletes.
#[must_use]
pub fn generate_sql(parsed: &ParsedQuery, table: &str, columns: &[String]) -> String {
    let mut sql = match parsed.shape {
        QueryShape::Count => format!("SELECT COUNT(*) FROM {table}"),
        QueryShape::Exists => format!("SELECT EXISTS(SELECT 1 FROM {table}"),
        QueryShape::Delete => format!("DELETE FROM {table}"),
        QueryShape::Many | QueryShape::Single => {
            let selected = if columns.is_empty() {
                "*".to_string()
            } else {
                columns.join(", ")
            };
            format!("SELECT {selected} FROM {table}")
        }
    };

    if !parsed.conditions.is_empty() {
        sql.push_str(" WHERE ");
        for (i, condition) in parsed.conditions.iter().enumerate() {
            if i > 0 {
                let connector = parsed.conditions[i - 1]
                    .connector
                    .unwrap_or(LogicalOp::And);
                sql.push(' ');
                sql.push_str(connector.as_sql());
                sql.push(' ');
            }
            sql.push_str(&condition.to_sql());
        }
    }

    let ordered = !matches!(parsed.shape, QueryShape::Count | QueryShape::Delete);
    if ordered {
        if let Some(order_by) = &parsed.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = parsed.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
    }

    if parsed.shape == QueryShape::Exists {
        sql.push(')');
    }

    sql
}
