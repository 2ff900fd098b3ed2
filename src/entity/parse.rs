// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tag parsing and the entity model.
//!
//! Every field carries a raw tag string such as `pk` or
//! `fk:users,id,on_delete:CASCADE`. The [`tag`] tokenizer turns it into a
//! closed set of [`TagToken`] variants, which [`FieldConstraint::parse`]
//! folds into a structured constraint. Fields are then assembled into a
//! validated [`Entity`].
//!
//! # Module Structure
//!
//! - [`action`] - Referential actions for foreign keys
//! - [`tag`] - Tag tokenizer
//! - [`constraint`] - Structured per-field constraints
//! - [`field`] - Field definition
//! - [`entity`] - Entity definition, validation and derived views
//!
//! # Data Structures
//!
//! ```text
//! Entity
//! ├── name: String                 (record name, e.g., "User")
//! ├── package: String              (source package)
//! ├── table_name_override: Option  (from a `table:` token)
//! └── fields: Vec<Field>
//!     └── Field
//!         ├── name: String         (field name)
//!         ├── ty: String           (Rust type as written)
//!         └── constraint: FieldConstraint
//!             ├── is_primary / is_unique / is_ignored
//!             ├── unique_group / index_group / fk_group
//!             ├── index_name / index_is_unique
//!             ├── check_expr / default_val / enum_values
//!             └── fk_reference / fk_on_delete / fk_on_update
//! ```
//!
//! # Tag Grammar
//!
//! | Token | Effect |
//! |-------|--------|
//! | `pk` | Primary key member |
//! | `unique` | Single-column unique |
//! | `unique:<group>` | Member of a multi-column unique group |
//! | `-` | Field is ignored |
//! | `index` / `unique_index` | Index named `<column>_idx` |
//! | `index:<name>` / `unique_index:<name>` | Member of a named index |
//! | `check:<expr>` | `CHECK (<expr>)` |
//! | `default:<expr>` | `DEFAULT <expr>` |
//! | `enum:<a>,<b>,...` | `CHECK ("<column>" IN ('a', 'b', ...))` |
//! | `fk:<table>,<column>` | Inline `REFERENCES` |
//! | `fk:<group>,<table>,<column>` | Member of a composite foreign key |
//! | `table:<name>` | Table name override |

pub mod action;
pub mod constraint;
pub mod entity;
pub mod field;
pub mod tag;

pub use action::ReferentialAction;
pub use constraint::{FieldConstraint, ForeignKeyRef};
pub use entity::{Entity, GroupOutcome, IndexGroup, UniqueConstraint};
pub use field::Field;
pub use tag::{ForeignKeyTag, TagToken, tokenize};
