// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CRUD method generators for PostgreSQL.
//!
//! # Generated SQL
//!
//! | Method | SQL |
//! |--------|-----|
//! | `create` | `INSERT INTO "t" (cols) VALUES ($1, ...) RETURNING cols` |
//! | `get_by_id` | `SELECT cols FROM "t" WHERE pk = $1` |
//! | `update` | `UPDATE "t" SET a = $1, ... WHERE pk = $n RETURNING cols` |
//! | `delete` | `DELETE FROM "t" WHERE pk = $1` |
//! | `list` | `SELECT cols FROM "t" ORDER BY pk` |
//!
//! The identity key is filled in by the database and never inserted.
//! Composite keys match every key column in declaration order.

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    context::Context,
    helpers::{execute, fetch_many, fetch_one, field_bindings, param_bindings}
};
use crate::{
    entity::contract::Method,
    utils::sql::{join_columns, placeholders, set_clause, where_clause}
};

impl Context<'_> {
    /// Generate a `create` method.
    ///
    /// Binds every generable field of the item except the identity key.
    /// Without an entity return the statement is executed and no row is read.
    pub fn create_method(&self, method: &Method) -> TokenStream {
        let Some(item) = method.params.first() else {
            return TokenStream::new();
        };

        let identity = self.entity.identity_key().map(|f| f.name.as_str());
        let fields: Vec<_> = self
            .entity
            .generable_fields()
            .into_iter()
            .filter(|f| Some(f.name.as_str()) != identity)
            .collect();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let columns: Vec<String> = fields.iter().map(|f| f.column_name()).collect();

        let mut sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                join_columns(&columns),
                placeholders(columns.len())
            )
        };
        let bindings = field_bindings(&item.name, &names);

        if method.has_entity_return {
            sql.push_str(&format!(" RETURNING {}", self.columns_str));
            let signature = self.signature(method, self.entity_return(true));
            let body = fetch_one(&self.entity_name, &sql, &bindings);
            quote! { #signature { #body } }
        } else {
            let signature = self.signature(method, quote! { () });
            let body = execute(&sql, &bindings);
            quote! { #signature { #body } }
        }
    }

    /// Generate a `get_by_id` method.
    pub fn get_by_id_method(&self, method: &Method) -> TokenStream {
        let keys = self.entity.key_columns();
        let sql = self.select_sql(&format!("WHERE {}", where_clause(&keys, 1)));
        let bindings = param_bindings(&method.params);
        let signature = self.signature(method, self.entity_return(true));
        let body = fetch_one(&self.entity_name, &sql, &bindings);

        quote! { #signature { #body } }
    }

    /// Generate an `update` method.
    ///
    /// Non-key fields are bound first, key fields after them. The contract
    /// rejects `update` on entities without a non-key column, so the SET
    /// list is never empty.
    pub fn update_method(&self, method: &Method) -> TokenStream {
        let Some(item) = method.params.first() else {
            return TokenStream::new();
        };

        let keys = self.key_fields();
        let set_fields = self.entity.updatable_fields();
        let set_columns: Vec<String> = set_fields.iter().map(|f| f.column_name()).collect();
        let key_columns: Vec<&str> = keys.iter().map(|(_, column)| column.as_str()).collect();

        let mut sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            set_clause(&set_columns, 1),
            where_clause(&key_columns, set_columns.len() + 1)
        );

        let mut names: Vec<&str> = set_fields.iter().map(|f| f.name.as_str()).collect();
        names.extend(keys.iter().map(|(name, _)| name.as_str()));
        let bindings = field_bindings(&item.name, &names);

        if method.has_entity_return {
            sql.push_str(&format!(" RETURNING {}", self.columns_str));
            let signature = self.signature(method, self.entity_return(true));
            let body = fetch_one(&self.entity_name, &sql, &bindings);
            quote! { #signature { #body } }
        } else {
            let signature = self.signature(method, quote! { () });
            let body = execute(&sql, &bindings);
            quote! { #signature { #body } }
        }
    }

    /// Generate a `delete` method.
    pub fn delete_method(&self, method: &Method) -> TokenStream {
        let keys = self.entity.key_columns();
        let sql = format!("DELETE FROM {} WHERE {}", self.table, where_clause(&keys, 1));
        let bindings = param_bindings(&method.params);
        let signature = self.signature(method, quote! { () });
        let body = execute(&sql, &bindings);

        quote! { #signature { #body } }
    }

    /// Generate a `list` method.
    pub fn list_method(&self, method: &Method) -> TokenStream {
        let keys = self.entity.key_columns();
        let sql = self.select_sql(&format!("ORDER BY {}", join_columns(&keys)));
        let signature = self.signature(method, self.entity_return(false));
        let body = fetch_many(&self.entity_name, &sql, &[]);

        quote! { #signature { #body } }
    }
}
