// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity accessor methods.

use super::def::Entity;
use crate::{
    entity::{migrations::types::is_integer, parse::Field},
    utils::case::{quote_identifier, snake_case}
};

impl Entity {
    /// Table name without quotes: the override, else the snake_case name.
    #[must_use]
    pub fn bare_table_name(&self) -> String {
        self.table_name_override
            .clone()
            .unwrap_or_else(|| snake_case(&self.name))
    }

    /// Quoted table name, safe for reserved words such as `user`.
    #[must_use]
    pub fn table_name(&self) -> String {
        quote_identifier(&self.bare_table_name())
    }

    /// Fields that produce columns, in declaration order.
    #[must_use]
    pub fn generable_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.should_generate()).collect()
    }

    /// Primary key members in declaration order.
    ///
    /// More than one field means a composite key.
    #[must_use]
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.should_generate() && f.is_primary())
            .collect()
    }

    /// Whether the primary key spans several columns.
    #[must_use]
    pub fn has_composite_key(&self) -> bool {
        self.primary_key_fields().len() > 1
    }

    /// Primary key columns, falling back to `id` when none is declared.
    #[must_use]
    pub fn key_columns(&self) -> Vec<String> {
        let columns: Vec<String> = self
            .primary_key_fields()
            .iter()
            .map(|f| f.column_name())
            .collect();
        if columns.is_empty() {
            vec!["id".to_string()]
        } else {
            columns
        }
    }

    /// Generable fields outside the key, the columns an update can set.
    ///
    /// Without a declared primary key the `id` column is the key.
    #[must_use]
    pub fn updatable_fields(&self) -> Vec<&Field> {
        let keyed = !self.primary_key_fields().is_empty();
        self.generable_fields()
            .into_iter()
            .filter(|f| if keyed { !f.is_primary() } else { f.column_name() != "id" })
            .collect()
    }

    /// The database-generated key, if any.
    ///
    /// A key is generated when it is the only primary key field, has a
    /// non-optional integer type and no explicit default. The schema
    /// renders it as an identity column and inserts leave it out.
    #[must_use]
    pub fn identity_key(&self) -> Option<&Field> {
        match self.primary_key_fields().as_slice() {
            [field] if is_integer(&field.ty) && field.constraint.default_val.is_none() => {
                Some(*field)
            }
            _ => None
        }
    }

    /// Generable column names joined with `, `.
    #[must_use]
    pub fn column_list(&self) -> String {
        self.column_names().join(", ")
    }

    /// Generable column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.generable_fields()
            .iter()
            .map(|f| f.column_name())
            .collect()
    }
}
