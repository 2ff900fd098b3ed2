// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Finder method generators: `FindBy` methods, queries derived from method
//! names and methods carrying their own SQL.

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    context::Context,
    helpers::{execute, fetch_many, fetch_one, fetch_scalar, param_bindings}
};
use crate::{
    entity::contract::Method,
    utils::{case::snake_case, sql::where_clause}
};

impl Context<'_> {
    /// Generate a `find_by_*` method.
    ///
    /// Each named field is matched by equality, in the order of the name.
    pub fn find_by_method(&self, method: &Method) -> TokenStream {
        let columns: Vec<String> = method.find_by_fields.iter().map(|f| snake_case(f)).collect();
        let sql = if columns.is_empty() {
            self.select_sql("")
        } else {
            self.select_sql(&format!("WHERE {}", where_clause(&columns, 1)))
        };
        self.entity_query(method, &sql)
    }

    /// Generate a method whose SQL was derived from its name.
    ///
    /// Counts return `i64`, existence checks return `bool`.
    pub fn smart_query_method(&self, method: &Method) -> TokenStream {
        let Some(sql) = method.generated_sql.as_deref() else {
            return TokenStream::new();
        };

        if sql.contains("COUNT(*)") {
            return self.scalar_query(method, &quote! { i64 }, sql);
        }
        if sql.contains("EXISTS(") {
            return self.scalar_query(method, &quote! { bool }, sql);
        }
        if !method.has_entity_return {
            return self.exec_query(method, sql);
        }
        self.entity_query(method, sql)
    }

    /// Generate a method that runs its attached SQL verbatim.
    pub fn custom_sql_method(&self, method: &Method) -> TokenStream {
        let Some(sql) = method.custom_sql.as_deref() else {
            return TokenStream::new();
        };

        if let Some(ty) = &method.scalar_return_type {
            return self.scalar_query(method, &quote! { #ty }, sql);
        }
        if !method.has_entity_return {
            return self.exec_query(method, sql);
        }
        self.entity_query(method, sql)
    }

    fn entity_query(&self, method: &Method, sql: &str) -> TokenStream {
        let bindings = param_bindings(&method.params);
        let signature = self.signature(method, self.entity_return(method.returns_single));
        let body = if method.returns_single {
            fetch_one(&self.entity_name, sql, &bindings)
        } else {
            fetch_many(&self.entity_name, sql, &bindings)
        };

        quote! { #signature { #body } }
    }

    fn scalar_query(&self, method: &Method, ty: &TokenStream, sql: &str) -> TokenStream {
        let bindings = param_bindings(&method.params);
        let signature = self.signature(method, ty.clone());
        let body = fetch_scalar(ty, sql, &bindings);

        quote! { #signature { #body } }
    }

    fn exec_query(&self, method: &Method, sql: &str) -> TokenStream {
        let bindings = param_bindings(&method.params);
        let signature = self.signature(method, quote! { () });
        let body = execute(sql, &bindings);

        quote! { #signature { #body } }
    }
}
