// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL schema generation.

mod ddl;

use super::types::PostgresTypeMapper;
use crate::{config::SchemaConfig, entity::parse::Entity};

/// Renders entities as PostgreSQL DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaGenerator {
    mapper:        PostgresTypeMapper,
    if_not_exists: bool
}

impl SchemaGenerator {
    /// Create a generator from schema settings.
    #[must_use]
    pub fn new(config: &SchemaConfig) -> Self {
        Self {
            mapper:        PostgresTypeMapper {
                varchar_length: config.string_length()
            },
            if_not_exists: config.if_not_exists
        }
    }

    /// Render every entity in order.
    ///
    /// Each entity contributes its table, then its indexes, then a blank
    /// line.
    #[must_use]
    pub fn generate(&self, entities: &[Entity]) -> String {
        entities
            .iter()
            .map(|entity| self.generate_entity(entity))
            .collect()
    }

    /// Render one entity.
    #[must_use]
    pub fn generate_entity(&self, entity: &Entity) -> String {
        let mut sql = ddl::create_table(entity, &self.mapper, self.if_not_exists);
        for index in entity.index_groups() {
            sql.push_str(&ddl::create_index(entity, &index, self.if_not_exists));
        }
        sql.push('\n');
        sql
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new(&SchemaConfig::default())
    }
}
