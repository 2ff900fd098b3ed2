// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity definition, validation and derived views.
//!
//! # Module Structure
//!
//! ```text
//! entity/
//! ├── def.rs        — Entity struct, construction and validation
//! ├── accessors.rs  — Table name, key and generable field views
//! ├── groups.rs     — Unique, foreign key and index grouping
//! └── tests.rs      — Unit tests
//! ```
//!
//! # Usage
//!
//! ```rust
//! use entity_codegen::entity::parse::{Entity, Field};
//!
//! let user = Entity::new(
//!     "User",
//!     vec![
//!         Field::from_tag("ID", "i64", "pk"),
//!         Field::from_tag("Email", "String", "unique")
//!     ],
//!     "models"
//! )?;
//!
//! assert_eq!(user.table_name(), "\"user\"");
//! assert_eq!(user.primary_key_fields().len(), 1);
//! # Ok::<(), entity_codegen::error::ModelError>(())
//! ```
//!
//! Views are recomputed on every call and never cached.

mod accessors;
mod def;
mod groups;

pub use def::Entity;
pub use groups::{GroupOutcome, IndexGroup, UniqueConstraint};
