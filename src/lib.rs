// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **Batch driver**: [`Generator`] — records and contracts in, schema
//!   and repositories out
//! - **Tags**: [`FieldConstraint`] — the field tag grammar
//! - **Schema**: [`SchemaGenerator`]
//! - **Queries**: [`match_method`] — SQL from method names
//! - **Repositories**: [`RepositoryGenerator`]
//! - **Joins**: [`Relations`] — queries along foreign keys
//! - **Configuration**: [`Config`]

pub mod config;
pub mod entity;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use config::Config;
pub use entity::{
    contract::{Method, MethodKind, RepositoryContract},
    migrations::SchemaGenerator,
    parse::{Entity, Field, FieldConstraint},
    query::{ParsedQuery, match_method},
    relations::Relations,
    sql::RepositoryGenerator
};
pub use error::{ConfigError, ContractError, Error, ModelError, Result};
pub use pipeline::{Generator, Output};
pub use source::RawBatch;
