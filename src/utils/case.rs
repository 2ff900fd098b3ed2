// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identifier casing and SQL quoting.
//!
//! Column and table names are derived from Rust names with acronym-aware
//! snake casing, so `UserID` becomes `user_id` and `HTMLContent` becomes
//! `html_content`.

use convert_case::{Case, Casing};

/// Convert a Rust or Go-style name to a snake_case SQL name.
///
/// A leading `r#` (raw identifier) is dropped.
///
/// # Example
///
/// ```text
/// "UserID"      -> "user_id"
/// "CreatedAt"   -> "created_at"
/// "r#type"      -> "type"
/// ```
#[must_use]
pub fn snake_case(name: &str) -> String {
    name.trim_start_matches("r#").to_case(Case::Snake)
}

/// Normalize a method name to PascalCase.
///
/// Names that already start with an uppercase letter and contain no
/// underscore are returned unchanged, so acronyms such as `ID` survive.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let starts_upper = name.chars().next().is_some_and(char::is_uppercase);
    if starts_upper && !name.contains('_') {
        name.to_string()
    } else {
        name.to_case(Case::Pascal)
    }
}

/// Quote an SQL identifier, doubling embedded quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal, doubling embedded single quotes.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_handles_acronyms() {
        assert_eq!(snake_case("UserID"), "user_id");
        assert_eq!(snake_case("HTMLContent"), "html_content");
        assert_eq!(snake_case("CreatedAt"), "created_at");
        assert_eq!(snake_case("email"), "email");
        assert_eq!(snake_case("created_at"), "created_at");
    }

    #[test]
    fn snake_case_strips_raw_prefix() {
        assert_eq!(snake_case("r#type"), "type");
    }

    #[test]
    fn pascal_case_keeps_pascal_names() {
        assert_eq!(pascal_case("FindByUserID"), "FindByUserID");
        assert_eq!(pascal_case("find_by_email"), "FindByEmail");
        assert_eq!(pascal_case("count_users_by_active"), "CountUsersByActive");
    }

    #[test]
    fn quoting_escapes() {
        assert_eq!(quote_identifier("user"), "\"user\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
