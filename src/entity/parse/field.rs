// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field definition.

use super::constraint::FieldConstraint;
use crate::{source::RawField, utils::case::snake_case};

/// A single entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as declared.
    pub name: String,

    /// Rust type as written, e.g. `Option<String>`.
    pub ty: String,

    /// Parsed tag.
    pub constraint: FieldConstraint
}

impl Field {
    /// Create a field from an already parsed constraint.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>, constraint: FieldConstraint) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            constraint
        }
    }

    /// Create a field by parsing its raw tag.
    #[must_use]
    pub fn from_tag(name: impl Into<String>, ty: impl Into<String>, raw_tag: &str) -> Self {
        let name = name.into();
        let constraint = FieldConstraint::parse(raw_tag, &snake_case(&name));
        Self::new(name, ty, constraint)
    }

    /// Column name (snake_case of the field name).
    #[must_use]
    pub fn column_name(&self) -> String {
        snake_case(&self.name)
    }

    /// Whether the field produces a column and appears in generated code.
    #[must_use]
    pub fn should_generate(&self) -> bool {
        !self.constraint.is_ignored && !self.ty.trim().is_empty()
    }

    /// Shorthand for `constraint.is_primary`.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.constraint.is_primary
    }
}

impl From<&RawField> for Field {
    fn from(raw: &RawField) -> Self {
        Self::from_tag(raw.name.clone(), raw.ty.clone(), &raw.raw_tag)
    }
}
