// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity struct, construction and validation.

use std::collections::HashSet;

use crate::{
    entity::parse::Field,
    error::ModelError,
    source::RawRecord
};

/// A validated record type.
///
/// Construct through [`Entity::new`] or [`Entity::from_raw`], which enforce:
///
/// | Rule | Error |
/// |------|-------|
/// | Name is not empty | [`ModelError::EmptyName`] |
/// | At least one field | [`ModelError::NoFields`] |
/// | Field names are unique | [`ModelError::DuplicateFieldName`] |
/// | Field names are not empty | [`ModelError::InvalidFieldName`] |
///
/// Rules are checked in that order; the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Record name, e.g. `User`.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<Field>,

    /// Table name taken from the first `table:` token, if any.
    pub table_name_override: Option<String>,

    /// Package or module the record came from.
    pub package: String
}

impl Entity {
    /// Build and validate an entity.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] the entity violates.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<Field>,
        package: impl Into<String>
    ) -> Result<Self, ModelError> {
        let table_name_override = fields
            .iter()
            .find_map(|f| f.constraint.table_name.clone());

        let entity = Self {
            name: name.into(),
            fields,
            table_name_override,
            package: package.into()
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Build an entity from a raw record, parsing every field tag.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] the record violates.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ModelError> {
        let fields = raw.fields.iter().map(Field::from).collect();
        Self::new(raw.name.clone(), fields, raw.package.clone())
    }

    /// Check the entity invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] the entity violates.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }

        if self.fields.is_empty() {
            return Err(ModelError::NoFields {
                entity: self.name.clone()
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateFieldName {
                    entity: self.name.clone(),
                    field:  field.name.clone()
                });
            }
        }

        if let Some(position) = self.fields.iter().position(|f| f.name.trim().is_empty()) {
            return Err(ModelError::InvalidFieldName {
                entity: self.name.clone(),
                position
            });
        }

        Ok(())
    }
}
