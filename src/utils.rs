// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for schema and code generation.
//!
//! # Submodules
//!
//! - [`case`] — identifier casing and SQL quoting
//! - [`sql`] — column lists, placeholders and clause builders
//! - [`types`] — validated Rust type strings

pub mod case;
pub mod sql;
pub mod types;
