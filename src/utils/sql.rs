// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL query building utilities.

/// Join column names with comma separator.
///
/// # Example
///
/// ```text
/// ["id", "name", "email"] -> "id, name, email"
/// ```
pub fn join_columns<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build PostgreSQL placeholders: `$1, $2, $3, ...`
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build `col1 = $n, col2 = $n+1, ...` starting at placeholder `first`.
pub fn set_clause<S: AsRef<str>>(columns: &[S], first: usize) -> String {
    assignments(columns, first).join(", ")
}

/// Build `col1 = $n AND col2 = $n+1 ...` starting at placeholder `first`.
pub fn where_clause<S: AsRef<str>>(columns: &[S], first: usize) -> String {
    assignments(columns, first).join(" AND ")
}

fn assignments<S: AsRef<str>>(columns: &[S], first: usize) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c.as_ref(), first + i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_and_placeholders() {
        assert_eq!(join_columns(&["id", "email"]), "id, email");
        assert_eq!(placeholders(3), "$1, $2, $3");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn clauses_continue_numbering() {
        assert_eq!(set_clause(&["name", "email"], 1), "name = $1, email = $2");
        assert_eq!(
            where_clause(&["tenant_id".to_string(), "id".to_string()], 3),
            "tenant_id = $3 AND id = $4"
        );
    }
}
