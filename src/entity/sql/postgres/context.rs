// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation context for PostgreSQL repository.
//!
//! Contains the [`Context`] struct that precomputes the identifiers and SQL
//! fragments shared by all method generators.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    entity::{contract::Method, parse::Entity},
    utils::types::RustType
};

/// Context for PostgreSQL code generation.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `entity` | Reference to the validated entity |
/// | `entity_name` | Entity struct name (e.g., `User`) |
/// | `error_type` | Error type of every method (e.g., `sqlx::Error`) |
/// | `table` | Quoted table name (e.g., `"user"`) |
/// | `columns_str` | Comma-separated generable columns |
pub struct Context<'a> {
    /// Reference to the validated entity.
    pub entity: &'a Entity,

    /// Entity struct name (e.g., `User`).
    pub entity_name: syn::Ident,

    /// Error type of every generated method.
    pub error_type: &'a RustType,

    /// Quoted table name.
    pub table: String,

    /// Comma-separated column names for SELECT and RETURNING.
    pub columns_str: String
}

impl<'a> Context<'a> {
    /// Create a new generation context.
    pub fn new(entity: &'a Entity, error_type: &'a RustType) -> Self {
        Self {
            entity,
            entity_name: format_ident!("{}", entity.name),
            error_type,
            table: entity.table_name(),
            columns_str: entity.column_list()
        }
    }

    /// `async fn name(&self, params...) -> Result<ret, Error>`.
    pub fn signature(&self, method: &Method, ret: TokenStream) -> TokenStream {
        let name = format_ident!("{}", method.fn_name());
        let error_type = self.error_type;
        let params = method.params.iter().map(|p| {
            let param = format_ident!("{}", p.name);
            let ty = &p.ty;
            quote! { #param: #ty }
        });

        quote! {
            async fn #name(&self, #(#params),*) -> Result<#ret, #error_type>
        }
    }

    /// Return type of an entity-returning method.
    pub fn entity_return(&self, single: bool) -> TokenStream {
        let entity_name = &self.entity_name;
        if single {
            quote! { #entity_name }
        } else {
            quote! { Vec<#entity_name> }
        }
    }

    /// `SELECT <columns> FROM <table>`, followed by `rest` if not empty.
    pub fn select_sql(&self, rest: &str) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.columns_str, self.table);
        if !rest.is_empty() {
            sql.push(' ');
            sql.push_str(rest);
        }
        sql
    }

    /// Key fields as `(field name, column)` pairs.
    ///
    /// Falls back to a field named `id` when no primary key is declared.
    pub fn key_fields(&self) -> Vec<(String, String)> {
        let keys: Vec<(String, String)> = self
            .entity
            .primary_key_fields()
            .iter()
            .map(|f| (f.name.clone(), f.column_name()))
            .collect();
        if keys.is_empty() {
            vec![("id".to_string(), "id".to_string())]
        } else {
            keys
        }
    }
}
