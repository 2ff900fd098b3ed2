// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity model and everything generated from it.
//!
//! # Module Structure
//!
//! ```text
//! entity/
//! ├── parse/       — Tags, fields and validated entities
//! ├── migrations/  — Type mapping and PostgreSQL DDL
//! ├── query/       — Method-name query matcher
//! ├── contract.rs  — Repository contract classification
//! ├── relations.rs — Join queries resolved from foreign keys
//! └── sql/         — Repository implementation generator
//! ```
//!
//! Data flows from [`parse`] into three consumers: [`migrations`] for the
//! schema, [`query`] → [`contract`] → [`sql`] for repository code, and
//! [`relations`] → [`sql`] for join queries.

pub mod contract;
pub mod migrations;
pub mod parse;
pub mod query;
pub mod relations;
pub mod sql;
