// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema generation.
//!
//! Turns validated entities into PostgreSQL DDL: one `CREATE TABLE` per
//! entity followed by its `CREATE INDEX` statements.
//!
//! # Features
//!
//! - Full type mapping (Rust → PostgreSQL), see [`types`]
//! - Column constraints (PRIMARY KEY, UNIQUE, CHECK, DEFAULT, REFERENCES)
//! - Composite primary keys, unique groups and foreign key groups
//! - Named and unnamed indexes, unique or not
//!
//! # Usage
//!
//! ```rust
//! use entity_codegen::{
//!     config::SchemaConfig,
//!     entity::{migrations::SchemaGenerator, parse::{Entity, Field}}
//! };
//!
//! let user = Entity::new(
//!     "User",
//!     vec![
//!         Field::from_tag("id", "i64", "pk"),
//!         Field::from_tag("email", "String", "unique"),
//!     ],
//!     "models"
//! )?;
//!
//! let sql = SchemaGenerator::new(&SchemaConfig::default()).generate(&[user]);
//! assert!(sql.starts_with("CREATE TABLE \"user\" ("));
//! # Ok::<(), entity_codegen::error::ModelError>(())
//! ```

mod postgres;
pub mod types;

pub use postgres::SchemaGenerator;
