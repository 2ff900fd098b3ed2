// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Helper functions for method body generation.
//!
//! - [`param_bindings`] — builds `.bind(param)` chain from method parameters
//! - [`field_bindings`] — builds `.bind(&item.field)` chain from an item
//! - [`fetch_one`], [`fetch_many`], [`fetch_scalar`], [`execute`] — method
//!   bodies for each result shape
//!
//! Every body propagates data-access errors with `?`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::entity::contract::Param;

/// Build `.bind(param)` chain, one per parameter, in order.
///
/// # Generated Code
///
/// ```rust,ignore
/// .bind(email)
/// .bind(active)
/// ```
pub fn param_bindings(params: &[Param]) -> Vec<TokenStream> {
    params
        .iter()
        .map(|p| {
            let name = format_ident!("{}", p.name);
            quote! { .bind(#name) }
        })
        .collect()
}

/// Build `.bind(&item.field)` chain.
///
/// # Generated Code
///
/// ```rust,ignore
/// .bind(&item.name)
/// .bind(&item.email)
/// ```
pub fn field_bindings<S: AsRef<str>>(item: &str, fields: &[S]) -> Vec<TokenStream> {
    let item = format_ident!("{}", item);
    fields
        .iter()
        .map(|f| {
            let name = format_ident!("{}", f.as_ref());
            quote! { .bind(&#item.#name) }
        })
        .collect()
}

/// Fetch exactly one entity.
pub fn fetch_one(entity_name: &syn::Ident, sql: &str, bindings: &[TokenStream]) -> TokenStream {
    quote! {
        let item: #entity_name = sqlx::query_as(#sql)
            #(#bindings)*
            .fetch_one(&self.pool)
            .await?;
        Ok(item)
    }
}

/// Stream every matching entity into a `Vec`.
///
/// Uses `try_next` so both row decoding and end-of-stream errors propagate.
pub fn fetch_many(entity_name: &syn::Ident, sql: &str, bindings: &[TokenStream]) -> TokenStream {
    quote! {
        let mut rows = sqlx::query_as::<_, #entity_name>(#sql)
            #(#bindings)*
            .fetch(&self.pool);
        let mut items = Vec::new();
        while let Some(item) = futures::TryStreamExt::try_next(&mut rows).await? {
            items.push(item);
        }
        Ok(items)
    }
}

/// Fetch a single scalar value such as a count.
pub fn fetch_scalar(ty: &TokenStream, sql: &str, bindings: &[TokenStream]) -> TokenStream {
    quote! {
        let value: #ty = sqlx::query_scalar(#sql)
            #(#bindings)*
            .fetch_one(&self.pool)
            .await?;
        Ok(value)
    }
}

/// Execute without reading rows.
pub fn execute(sql: &str, bindings: &[TokenStream]) -> TokenStream {
    quote! {
        sqlx::query(#sql)
            #(#bindings)*
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
