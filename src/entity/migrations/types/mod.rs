// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type mapping from Rust to SQL types.
//!
//! The mapping table is fixed; no type inference happens beyond it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Type Mapping System                           │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  Rust Type              TypeMapper            SQL Type              │
//! │                                                                     │
//! │  i64             ──►  PostgresMapper  ──►   BIGINT                 │
//! │  u32             ──►                  ──►   BIGINT, CHECK (>= 0)   │
//! │  String          ──►                  ──►   VARCHAR(255) / TEXT    │
//! │  Option<T>       ──►                  ──►   T (nullable)           │
//! │  Vec<u8>         ──►                  ──►   BYTEA                  │
//! │  Vec<T>          ──►                  ──►   T[]                    │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod postgres;

pub use postgres::PostgresTypeMapper;

use syn::Type;

/// Mapped SQL type representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    /// SQL type name (e.g., "UUID", "TEXT", "INTEGER").
    pub name: String,

    /// Whether this type allows NULL values.
    pub nullable: bool,

    /// Array dimension (0 = scalar, 1 = T[], 2 = T[][], etc.).
    pub array_dim: usize,

    /// Whether values must be non-negative (unsigned Rust types).
    pub non_negative: bool
}

impl SqlType {
    /// Create a non-nullable SQL type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            nullable:     false,
            array_dim:    0,
            non_negative: false
        }
    }

    /// Create a non-nullable type restricted to values `>= 0`.
    #[must_use]
    pub fn unsigned(name: impl Into<String>) -> Self {
        Self {
            non_negative: true,
            ..Self::new(name)
        }
    }

    /// Get the full SQL type string with array suffix.
    #[must_use]
    pub fn to_sql_string(&self) -> String {
        if self.array_dim > 0 {
            format!("{}{}", self.name, "[]".repeat(self.array_dim))
        } else {
            self.name.clone()
        }
    }

    /// Whether this is a scalar integer type.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.array_dim == 0 && matches!(self.name.as_str(), "SMALLINT" | "INTEGER" | "BIGINT")
    }

    /// Whether the implicit `CHECK (<column> >= 0)` applies.
    #[must_use]
    pub fn needs_non_negative_check(&self) -> bool {
        self.non_negative && self.array_dim == 0
    }
}

/// Trait for mapping Rust types to SQL types.
///
/// Implement this trait for each database dialect.
pub trait TypeMapper {
    /// Map a parsed Rust type to its SQL representation.
    fn map_type(&self, ty: &Type) -> SqlType;

    /// Map a Rust type written as a string.
    ///
    /// Strings that do not parse as a Rust type map to `TEXT NOT NULL`, the
    /// same as a parsed type the mapper does not know.
    fn map_type_str(&self, ty: &str) -> SqlType {
        match syn::parse_str::<Type>(ty) {
            Ok(parsed) => self.map_type(&parsed),
            Err(_) => SqlType::new("TEXT")
        }
    }
}

/// Whether a Rust type string maps to a non-nullable scalar integer.
#[must_use]
pub fn is_integer(ty: &str) -> bool {
    let mapped = PostgresTypeMapper::default().map_type_str(ty);
    mapped.is_integer() && !mapped.nullable
}
