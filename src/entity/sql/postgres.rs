// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL repository implementation generator.
//!
//! Generates one implementation struct per repository contract, with an
//! `#[async_trait]` impl of the contract backed by `sqlx`.
//!
//! # Module Structure
//!
//! ```text
//! postgres/
//! ├── context.rs   — Generation context, signatures and key columns
//! ├── crud.rs      — CREATE, GET, UPDATE, DELETE, LIST methods
//! ├── finders.rs   — FindBy, derived-query and custom SQL methods
//! ├── relations.rs — Join queries along foreign keys
//! └── helpers.rs   — Bindings and fetch bodies
//! ```
//!
//! # Generated Implementation
//!
//! ```rust,ignore
//! pub struct UserRepositoryImpl {
//!     pool: sqlx::PgPool,
//! }
//!
//! impl UserRepositoryImpl {
//!     pub fn new(pool: sqlx::PgPool) -> Self {
//!         Self { pool }
//!     }
//! }
//!
//! #[async_trait::async_trait]
//! impl UserRepository for UserRepositoryImpl {
//!     async fn find_by_email(&self, email: &str) -> Result<User, sqlx::Error> {
//!         let item: User = sqlx::query_as("SELECT id, email FROM \"user\" WHERE email = $1")
//!             .bind(email)
//!             .fetch_one(&self.pool)
//!             .await?;
//!         Ok(item)
//!     }
//! }
//! ```
//!
//! Join queries of an entity go into a separate `<Entity>Relations` struct
//! with inherent methods; see [`RepositoryGenerator::generate_relations`].
//!
//! Multi-row methods stream rows with `futures::TryStreamExt::try_next`, so
//! the generated crate depends on `sqlx`, `async-trait` and `futures`.

mod context;
mod crud;
mod finders;
mod relations;

pub mod helpers;

pub use context::Context;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    config::RepositoryConfig,
    entity::{
        contract::{MethodKind, RepositoryContract},
        parse::Entity,
        relations::Relations
    },
    error::ConfigError,
    utils::types::{RustType, is_identifier}
};

/// Generates repository implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryGenerator {
    pool_type:   RustType,
    error_type:  RustType,
    impl_suffix: String
}

impl RepositoryGenerator {
    /// Create a generator from repository settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidType`] if the pool or error type does
    /// not parse, or if the suffix cannot extend an identifier.
    pub fn new(config: &RepositoryConfig) -> Result<Self, ConfigError> {
        let parse = |key: &'static str, value: &str| {
            RustType::parse(value).ok_or_else(|| ConfigError::InvalidType {
                key,
                value: value.to_string()
            })
        };

        if !is_identifier(&format!("Repository{}", config.impl_suffix)) {
            return Err(ConfigError::InvalidType {
                key:   "impl_suffix",
                value: config.impl_suffix.clone()
            });
        }

        Ok(Self {
            pool_type:   parse("pool_type", &config.pool_type)?,
            error_type:  parse("error_type", &config.error_type)?,
            impl_suffix: config.impl_suffix.clone()
        })
    }

    /// Generate the implementation of one contract.
    ///
    /// `contract` must have been built against `entity`.
    #[must_use]
    pub fn generate(&self, entity: &Entity, contract: &RepositoryContract) -> TokenStream {
        let ctx = Context::new(entity, &self.error_type);
        let trait_name = format_ident!("{}", contract.name);
        let impl_name = format_ident!("{}{}", contract.name, self.impl_suffix);
        let pool_type = &self.pool_type;

        let methods = contract.methods.iter().map(|method| match method.kind {
            MethodKind::Create => ctx.create_method(method),
            MethodKind::GetById => ctx.get_by_id_method(method),
            MethodKind::Update => ctx.update_method(method),
            MethodKind::Delete => ctx.delete_method(method),
            MethodKind::List => ctx.list_method(method),
            MethodKind::FindBy => ctx.find_by_method(method),
            MethodKind::SmartQuery => ctx.smart_query_method(method),
            MethodKind::CustomSql => ctx.custom_sql_method(method)
        });

        let doc = format!("`{}` backed by PostgreSQL.", contract.name);

        quote! {
            #[doc = #doc]
            pub struct #impl_name {
                pool: #pool_type
            }

            impl #impl_name {
                /// Create a repository over a connection pool.
                pub fn new(pool: #pool_type) -> Self {
                    Self { pool }
                }
            }

            #[async_trait::async_trait]
            impl #trait_name for #impl_name {
                #(#methods)*
            }
        }
    }

    /// Generate the implementation of one contract as source text.
    #[must_use]
    pub fn to_source(&self, entity: &Entity, contract: &RepositoryContract) -> String {
        self.generate(entity, contract).to_string()
    }

    /// Generate the join queries of one entity.
    ///
    /// Emits one result struct per query and a `<Entity>Relations` struct
    /// holding the pool, with one `get_<entity>_with_<...>` method per query.
    #[must_use]
    pub fn generate_relations(&self, relations: &Relations<'_>) -> TokenStream {
        let ctx = Context::new(relations.entity, &self.error_type);
        let name = format_ident!("{}Relations", relations.entity.name);
        let pool_type = &self.pool_type;

        let (results, methods): (Vec<_>, Vec<_>) = relations
            .queries()
            .iter()
            .map(|query| ctx.join_query(relations, query))
            .unzip();

        let doc = format!(
            "Join queries over `{}` and the entities it references.",
            relations.entity.name
        );

        quote! {
            #(#results)*

            #[doc = #doc]
            pub struct #name {
                pool: #pool_type
            }

            impl #name {
                /// Create a query set over a connection pool.
                pub fn new(pool: #pool_type) -> Self {
                    Self { pool }
                }

                #(#methods)*
            }
        }
    }

    /// Generate the join queries of one entity as source text.
    #[must_use]
    pub fn relations_to_source(&self, relations: &Relations<'_>) -> String {
        self.generate_relations(relations).to_string()
    }
}
