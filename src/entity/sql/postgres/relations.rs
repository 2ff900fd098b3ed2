// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Join query generators for PostgreSQL.
//!
//! Every table gets an alias: `t0` for the entity, `t1`, `t2`, ... for the
//! joined entities in order. Columns are selected as `<alias>_<column>` so
//! rows of different tables never share a name, and each entity is
//! rebuilt field by field with `sqlx::Row::try_get`.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! /// `Order` joined with `User`.
//! pub struct OrderWithUser {
//!     pub order: Order,
//!     pub user: User,
//! }
//!
//! pub async fn get_order_with_user(&self, id: i64) -> Result<OrderWithUser, sqlx::Error> {
//!     let row = sqlx::query(
//!         "SELECT t0.id AS t0_id, t0.user_id AS t0_user_id, t1.id AS t1_id \
//!          FROM \"order\" t0 JOIN \"user\" t1 ON t0.user_id = t1.id WHERE t0.id = $1"
//!     )
//!     .bind(id)
//!     .fetch_one(&self.pool)
//!     .await?;
//!     Ok(OrderWithUser {
//!         order: Order {
//!             ID: sqlx::Row::try_get(&row, "t0_id")?,
//!             UserID: sqlx::Row::try_get(&row, "t0_user_id")?,
//!         },
//!         user: User { ID: sqlx::Row::try_get(&row, "t1_id")? },
//!     })
//! }
//! ```
//!
//! Entities with ignored fields are completed with `..Default::default()`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{context::Context, helpers::param_bindings};
use crate::{
    entity::{
        parse::Entity,
        relations::{JoinQuery, Relations}
    },
    utils::sql::{join_columns, where_clause}
};

impl Context<'_> {
    /// Generate the result struct and the method of one join query.
    pub fn join_query(
        &self,
        relations: &Relations<'_>,
        query: &JoinQuery<'_, '_>
    ) -> (TokenStream, TokenStream) {
        let struct_name = format_ident!("{}", query.name);
        let fn_name = format_ident!("{}", query.fn_name());
        let entity_name = &self.entity_name;
        let own_role = format_ident!("{}", relations.role);

        let mut select = aliased_columns(self.entity, "t0");
        let mut from = format!("{} t0", self.table);
        let mut fields = vec![quote! { pub #own_role: #entity_name }];
        let mut values = vec![{
            let row = row_literal(self.entity, "t0");
            quote! { #own_role: #row }
        }];

        for (i, join) in query.joins.iter().enumerate() {
            let alias = format!("t{}", i + 1);
            let on: Vec<String> = join
                .on
                .iter()
                .map(|(local, remote)| format!("t0.{local} = {alias}.{remote}"))
                .collect();
            select.extend(aliased_columns(join.related, &alias));
            from.push_str(&format!(
                " JOIN {} {alias} ON {}",
                join.related.table_name(),
                on.join(" AND ")
            ));

            let role = format_ident!("{}", join.role);
            let related = format_ident!("{}", join.related.name);
            let row = row_literal(join.related, &alias);
            fields.push(quote! { pub #role: #related });
            values.push(quote! { #role: #row });
        }

        let keys: Vec<String> = self
            .entity
            .key_columns()
            .iter()
            .map(|column| format!("t0.{column}"))
            .collect();
        let sql = format!(
            "SELECT {} FROM {from} WHERE {}",
            join_columns(&select),
            where_clause(&keys, 1)
        );

        let params = relations.keys.iter().map(|p| {
            let name = format_ident!("{}", p.name);
            let ty = &p.ty;
            quote! { #name: #ty }
        });
        let bindings = param_bindings(&relations.keys);
        let error_type = self.error_type;

        let related: Vec<String> = query
            .joins
            .iter()
            .map(|j| format!("`{}`", j.related.name))
            .collect();
        let doc = format!("`{}` joined with {}.", self.entity.name, related.join(", "));

        let result = quote! {
            #[doc = #doc]
            pub struct #struct_name {
                #(#fields),*
            }
        };
        let method = quote! {
            pub async fn #fn_name(&self, #(#params),*) -> Result<#struct_name, #error_type> {
                let row = sqlx::query(#sql)
                    #(#bindings)*
                    .fetch_one(&self.pool)
                    .await?;
                Ok(#struct_name {
                    #(#values),*
                })
            }
        };

        (result, method)
    }
}

/// `<alias>.<column> AS <alias>_<column>` for every generable column.
fn aliased_columns(entity: &Entity, alias: &str) -> Vec<String> {
    entity
        .column_names()
        .iter()
        .map(|column| format!("{alias}.{column} AS {alias}_{column}"))
        .collect()
}

/// `Entity { field: sqlx::Row::try_get(&row, "<alias>_<column>")?, ... }`.
fn row_literal(entity: &Entity, alias: &str) -> TokenStream {
    let name = format_ident!("{}", entity.name);
    let generable = entity.generable_fields();
    let rest = (generable.len() < entity.fields.len()).then(|| quote! { ..Default::default() });
    let fields = generable.iter().map(|f| {
        let field = format_ident!("{}", f.name);
        let column = format!("{alias}_{}", f.column_name());
        quote! { #field: sqlx::Row::try_get(&row, #column)? }
    });

    quote! { #name { #(#fields,)* #rest } }
}
