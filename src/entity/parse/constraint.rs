// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured per-field constraints.
//!
//! [`FieldConstraint::parse`] folds the tokens of one tag into a single
//! value. Tokens apply left to right and a later token of the same kind
//! overwrites an earlier one. [`FieldConstraint::to_tag`] writes the
//! constraint back in normalized form.
//!
//! # Example
//!
//! ```rust
//! use entity_codegen::entity::parse::FieldConstraint;
//!
//! let c = FieldConstraint::parse("pk,check:id > 0", "id");
//! assert!(c.is_primary);
//! assert_eq!(c.check_expr.as_deref(), Some("id > 0"));
//! ```

use super::{
    action::ReferentialAction,
    tag::{TagToken, tokenize}
};

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKeyRef {
    /// Referenced table, as written in the tag.
    pub table:  String,
    /// Referenced column.
    pub column: String
}

/// Constraints attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConstraint {
    /// Member of the primary key.
    pub is_primary: bool,

    /// Unique, alone or as part of [`unique_group`](Self::unique_group).
    pub is_unique: bool,

    /// Excluded from schema and code.
    pub is_ignored: bool,

    /// Multi-column unique constraint this field belongs to.
    pub unique_group: Option<String>,

    /// Name given by `index:<name>` / `unique_index:<name>`.
    pub index_group: Option<String>,

    /// Composite foreign key this field belongs to.
    pub fk_group: Option<String>,

    /// Index this field belongs to; `<column>_idx` when unnamed.
    pub index_name: Option<String>,

    /// Whether [`index_name`](Self::index_name) is a unique index.
    pub index_is_unique: bool,

    /// Raw CHECK expression.
    pub check_expr: Option<String>,

    /// Raw DEFAULT expression.
    pub default_val: Option<String>,

    /// Allowed values, in declaration order.
    pub enum_values: Vec<String>,

    /// Foreign key target.
    pub fk_reference: Option<ForeignKeyRef>,

    /// `ON DELETE` action.
    pub fk_on_delete: Option<ReferentialAction>,

    /// `ON UPDATE` action.
    pub fk_on_update: Option<ReferentialAction>,

    /// Table name override.
    pub table_name: Option<String>
}

impl FieldConstraint {
    /// Parse a raw tag for the field stored in `column`.
    ///
    /// The column name is only used to derive the name of an unnamed index.
    /// Unrecognized tokens are skipped.
    #[must_use]
    pub fn parse(raw: &str, column: &str) -> Self {
        let mut constraint = Self::default();
        for token in tokenize(raw) {
            constraint.apply(token, column);
        }
        constraint
    }

    fn apply(&mut self, token: TagToken, column: &str) {
        match token {
            TagToken::PrimaryKey => self.is_primary = true,
            TagToken::Unique => self.is_unique = true,
            TagToken::Ignore => self.is_ignored = true,
            TagToken::Index => self.set_index(None, column, false),
            TagToken::UniqueIndex => self.set_index(None, column, true),
            TagToken::NamedIndex(name) => self.set_index(Some(name), column, false),
            TagToken::NamedUniqueIndex(name) => self.set_index(Some(name), column, true),
            TagToken::UniqueGroup(group) => {
                self.is_unique = true;
                self.unique_group = Some(group);
            }
            TagToken::Check(expr) => self.check_expr = Some(expr),
            TagToken::Default(value) => self.default_val = Some(value),
            TagToken::Enum(values) => self.enum_values = values,
            TagToken::ForeignKey(fk) => {
                self.fk_group = fk.group;
                self.fk_reference = Some(ForeignKeyRef {
                    table:  fk.table,
                    column: fk.column
                });
                self.fk_on_delete = fk.on_delete;
                self.fk_on_update = fk.on_update;
            }
            TagToken::Table(name) => self.table_name = Some(name),
            TagToken::Unrecognized(text) => {
                tracing::debug!(column, token = %text, "skipping unrecognized tag token");
            }
        }
    }

    fn set_index(&mut self, name: Option<String>, column: &str, unique: bool) {
        self.index_name = Some(
            name.clone()
                .unwrap_or_else(|| format!("{column}_idx"))
        );
        self.index_group = name;
        self.index_is_unique = unique;
    }

    /// Whether the field carries any foreign key.
    #[must_use]
    pub fn has_foreign_key(&self) -> bool {
        self.fk_reference.is_some()
    }

    /// Write the constraint back as a normalized tag.
    ///
    /// Parsing the result yields an equal constraint, provided free-form
    /// values (enum values, expressions, names) do not themselves look like
    /// tag tokens.
    ///
    /// # Example
    ///
    /// ```text
    /// "unique,pk,fk:users,id"  ->  "pk,unique,fk:users,id"
    /// ```
    #[must_use]
    pub fn to_tag(&self) -> String {
        let mut tokens: Vec<String> = Vec::new();

        if self.is_primary {
            tokens.push("pk".to_string());
        }
        match &self.unique_group {
            Some(group) => tokens.push(format!("unique:{group}")),
            None if self.is_unique => tokens.push("unique".to_string()),
            None => {}
        }
        if self.is_ignored {
            tokens.push("-".to_string());
        }
        if self.index_name.is_some() {
            let keyword = if self.index_is_unique {
                "unique_index"
            } else {
                "index"
            };
            match &self.index_group {
                Some(name) => tokens.push(format!("{keyword}:{name}")),
                None => tokens.push(keyword.to_string())
            }
        }
        if let Some(table) = &self.table_name {
            tokens.push(format!("table:{table}"));
        }
        if let Some(expr) = &self.check_expr {
            tokens.push(format!("check:{expr}"));
        }
        if let Some(value) = &self.default_val {
            tokens.push(format!("default:{value}"));
        }
        if !self.enum_values.is_empty() {
            tokens.push(format!("enum:{}", self.enum_values.join(",")));
        }
        if let Some(reference) = &self.fk_reference {
            let mut fk = String::from("fk:");
            if let Some(group) = &self.fk_group {
                fk.push_str(group);
                fk.push(',');
            }
            fk.push_str(&reference.table);
            fk.push(',');
            fk.push_str(&reference.column);
            if let Some(action) = self.fk_on_delete {
                fk.push_str(",on_delete:");
                fk.push_str(action.as_tag());
            }
            if let Some(action) = self.fk_on_update {
                fk.push_str(",on_update:");
                fk.push_str(action.as_tag());
            }
            tokens.push(fk);
        }

        tokens.join(",")
    }
}
