// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query derivation from method names.
//!
//! A method name such as `ListUsersByEmailAndActiveOrderByCreatedAtDesc`
//! encodes a complete query. [`match_method`] decomposes it into a
//! [`ParsedQuery`] and [`generate_sql`] renders that as parameterized SQL.
//!
//! # Naming Convention
//!
//! ```text
//! <Verb><Subject>By<Conditions>[OrderBy<Column>[Asc|Desc]]
//! ```
//!
//! | Verb | Shape | Notes |
//! |------|-------|-------|
//! | `Count` | [`QueryShape::Count`] | `By` optional |
//! | `Exists` | [`QueryShape::Exists`] | |
//! | `Delete` | [`QueryShape::Delete`] | |
//! | `List`, `Find` | [`QueryShape::Many`] | |
//! | `First` | [`QueryShape::Single`] | `LIMIT 1` |
//! | `Top<N>` | [`QueryShape::Single`] | `LIMIT N` |
//!
//! Conditions are separated by `And` / `Or` and may end in an operator
//! suffix:
//!
//! | Suffix | SQL |
//! |--------|-----|
//! | *(none)* | `col = $n` |
//! | `Not<Field>` (prefix) | `col != $n` |
//! | `GreaterThan`, `LessThan` | `col > $n`, `col < $n` |
//! | `GreaterThanOrEqual`, `LessThanOrEqual` | `col >= $n`, `col <= $n` |
//! | `Like` | `col LIKE $n` |
//! | `StartingWith` | `col LIKE $n \|\| '%'` |
//! | `EndingWith` | `col LIKE '%' \|\| $n` |
//! | `Containing` | `col LIKE '%' \|\| $n \|\| '%'` |
//! | `In`, `NotIn` | `col = ANY($n)`, `col <> ALL($n)` |
//! | `IsNull`, `IsNotNull` | `col IS NULL`, `col IS NOT NULL` |
//!
//! Separators are found by plain substring search, so a field such as
//! `Android` or `OrderID` splits at its `And` / `Or`. The `OrEqual`
//! suffixes are therefore only reachable through [`split_operator`];
//! method names cannot express them.
//!
//! # Example
//!
//! ```rust
//! use entity_codegen::entity::query::{QueryShape, generate_sql, match_method};
//!
//! let parsed = match_method("CountUsersByActive").unwrap();
//! assert_eq!(parsed.shape, QueryShape::Count);
//! assert_eq!(
//!     generate_sql(&parsed, "users", &[]),
//!     "SELECT COUNT(*) FROM users WHERE active = $1"
//! );
//! ```

mod matcher;
mod operator;
mod sql;
mod tokenizer;

pub use matcher::{
    Condition, ParsedQuery, QueryShape, extract_fields, extract_limit, extract_order_by,
    match_method, match_method_with
};
pub use operator::{Operator, split_operator};
pub use sql::generate_sql;
pub use tokenizer::{ConditionToken, ConditionTokenizer, LogicalOp, SubstringTokenizer};
