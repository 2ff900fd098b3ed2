// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Batch driver.
//!
//! [`Generator::run`] turns one [`RawBatch`] into a schema, one repository
//! implementation per contract, and join queries for every entity whose
//! foreign keys reference another entity of the batch. A record or
//! contract that fails validation is reported in [`Output::failures`] and
//! skipped; the rest of the batch is still generated.
//!
//! # Example
//!
//! ```rust
//! use entity_codegen::{config::Config, pipeline::Generator, source::RawBatch};
//!
//! let batch = RawBatch::from_json(
//!     r#"{
//!         "records": [{ "name": "User", "fields": [
//!             { "name": "ID", "type": "i64", "tag": "pk" },
//!             { "name": "Email", "type": "String", "tag": "unique" }
//!         ] }],
//!         "contracts": [{ "name": "UserRepository", "entity": "User", "methods": [
//!             { "name": "FindByEmail", "params": [{ "name": "email", "type": "&str" }], "returns_single": true }
//!         ] }]
//!     }"#
//! )
//! .unwrap();
//!
//! let output = Generator::new(Config::default()).unwrap().run(&batch);
//! assert!(output.failures.is_empty());
//! assert!(output.schema.starts_with("CREATE TABLE \"user\" ("));
//! assert_eq!(output.repositories[0].name, "UserRepository");
//! ```

use crate::{
    config::Config,
    entity::{
        contract::RepositoryContract,
        migrations::SchemaGenerator,
        parse::Entity,
        relations::Relations,
        sql::RepositoryGenerator
    },
    error::{ConfigError, ContractError, Error},
    source::RawBatch
};

/// Which input a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedItem {
    /// A record, by name.
    Record(String),

    /// A contract, by name.
    Contract(String),

    /// Join queries of an entity, by entity name.
    Relations(String)
}

/// One rejected input.
#[derive(Debug)]
pub struct Failure {
    /// Rejected record or contract.
    pub item: FailedItem,

    /// Why it was rejected.
    pub error: Error
}

/// Generated implementation of one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRepository {
    /// Contract name.
    pub name: String,

    /// Entity the contract serves.
    pub entity_name: String,

    /// Rust source of the implementation.
    pub code: String
}

/// Generated join queries of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRelations {
    /// Entity owning the foreign keys.
    pub entity_name: String,

    /// Rust source of the result types and the query struct.
    pub code: String
}

/// Result of one batch.
#[derive(Debug, Default)]
pub struct Output {
    /// DDL for every valid record, in input order.
    pub schema: String,

    /// One implementation per valid contract, in input order.
    pub repositories: Vec<GeneratedRepository>,

    /// Join queries per entity with resolvable foreign keys, in input order.
    pub relations: Vec<GeneratedRelations>,

    /// Rejected records, contracts and join queries, in input order.
    pub failures: Vec<Failure>
}

/// Batch generator configured once and reusable across batches.
#[derive(Debug, Clone)]
pub struct Generator {
    schema:     SchemaGenerator,
    repository: RepositoryGenerator
}

impl Generator {
    /// Create a generator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidType`] if a configured type path does
    /// not parse.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Ok(Self {
            schema:     SchemaGenerator::new(&config.schema),
            repository: RepositoryGenerator::new(&config.repository)?
        })
    }

    /// Generate schema, repositories and join queries for one batch.
    #[must_use]
    pub fn run(&self, batch: &RawBatch) -> Output {
        let mut output = Output::default();

        let mut entities = Vec::with_capacity(batch.records.len());
        for record in &batch.records {
            match Entity::from_raw(record) {
                Ok(entity) => entities.push(entity),
                Err(err) => {
                    tracing::warn!(record = %record.name, error = %err, "skipping record");
                    output.failures.push(Failure {
                        item:  FailedItem::Record(record.name.clone()),
                        error: err.into()
                    });
                }
            }
        }

        output.schema = self.schema.generate(&entities);

        for raw in &batch.contracts {
            let built = entities
                .iter()
                .find(|e| e.name == raw.entity_name)
                .ok_or_else(|| ContractError::UnknownEntity {
                    contract: raw.name.clone(),
                    entity:   raw.entity_name.clone()
                })
                .and_then(|entity| {
                    RepositoryContract::build(raw, entity).map(|contract| (entity, contract))
                });

            match built {
                Ok((entity, contract)) => output.repositories.push(GeneratedRepository {
                    name:        contract.name.clone(),
                    entity_name: entity.name.clone(),
                    code:        self.repository.to_source(entity, &contract)
                }),
                Err(err) => {
                    tracing::warn!(contract = %raw.name, error = %err, "skipping contract");
                    output.failures.push(Failure {
                        item:  FailedItem::Contract(raw.name.clone()),
                        error: err.into()
                    });
                }
            }
        }

        for entity in &entities {
            match Relations::build(entity, &entities) {
                Ok(Some(relations)) => output.relations.push(GeneratedRelations {
                    entity_name: entity.name.clone(),
                    code:        self.repository.relations_to_source(&relations)
                }),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(entity = %entity.name, error = %err, "skipping join queries");
                    output.failures.push(Failure {
                        item:  FailedItem::Relations(entity.name.clone()),
                        error: err.into()
                    });
                }
            }
        }

        tracing::info!(
            entities = entities.len(),
            repositories = output.repositories.len(),
            relations = output.relations.len(),
            failures = output.failures.len(),
            "batch generated"
        );
        output
    }

    /// Parse a JSON batch and generate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] if the JSON does not describe a batch.
    /// Per-item failures are reported in [`Output::failures`] instead.
    pub fn run_json(&self, input: &str) -> crate::error::Result<Output> {
        let batch = RawBatch::from_json(input)?;
        Ok(self.run(&batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawContract, RawField, RawRecord};

    fn record(name: &str, fields: &[(&str, &str, &str)]) -> RawRecord {
        RawRecord {
            name:    name.to_string(),
            fields:  fields
                .iter()
                .map(|(n, ty, tag)| RawField {
                    name:    n.to_string(),
                    ty:      ty.to_string(),
                    raw_tag: tag.to_string()
                })
                .collect(),
            package: "models".to_string()
        }
    }

    fn generator() -> Generator {
        Generator::new(Config::default()).unwrap()
    }

    #[test]
    fn empty_batch() {
        let output = generator().run(&RawBatch::default());
        assert_eq!(output.schema, "");
        assert!(output.repositories.is_empty());
        assert!(output.failures.is_empty());
    }

    #[test]
    fn invalid_record_does_not_stop_the_batch() {
        let batch = RawBatch {
            records:   vec![
                record("Broken", &[]),
                record("Tag", &[("ID", "i64", "pk")]),
            ],
            contracts: vec![]
        };
        let output = generator().run(&batch);
        assert!(output.schema.contains("CREATE TABLE \"tag\""));
        assert!(!output.schema.contains("broken"));
        assert_eq!(output.failures.len(), 1);
        assert_eq!(
            output.failures[0].item,
            FailedItem::Record("Broken".to_string())
        );
    }

    #[test]
    fn contract_for_missing_entity() {
        let batch = RawBatch {
            records:   vec![],
            contracts: vec![RawContract {
                name:        "OrderRepository".to_string(),
                entity_name: "Order".to_string(),
                methods:     vec![]
            }]
        };
        let output = generator().run(&batch);
        assert!(matches!(
            &output.failures[0].error,
            Error::Contract(ContractError::UnknownEntity { entity, .. }) if entity == "Order"
        ));
    }

    #[test]
    fn join_queries_follow_foreign_keys() {
        let batch = RawBatch {
            records:   vec![
                record("User", &[("ID", "i64", "pk"), ("Email", "String", "")]),
                record("Post", &[("ID", "i64", "pk"), ("AuthorID", "i64", "fk:user,id")]),
                record("Tag", &[("ID", "i64", "pk"), ("Label", "String", "")]),
            ],
            contracts: vec![]
        };
        let output = generator().run(&batch);
        assert!(output.failures.is_empty());
        assert_eq!(output.relations.len(), 1);
        assert_eq!(output.relations[0].entity_name, "Post");
        assert!(output.relations[0].code.contains("pub struct PostWithUser"));
        syn::parse_file(&output.relations[0].code).unwrap();
    }

    #[test]
    fn invalid_join_is_reported_per_entity() {
        let batch = RawBatch {
            records:   vec![
                record("User", &[("ID", "i64", "pk")]),
                record("Visit", &[("ID", "[]byte", "pk"), ("UserID", "i64", "fk:user,id")]),
            ],
            contracts: vec![]
        };
        let output = generator().run(&batch);
        assert!(output.schema.contains("CREATE TABLE \"visit\""));
        assert!(output.relations.is_empty());
        assert_eq!(
            output.failures[0].item,
            FailedItem::Relations("Visit".to_string())
        );
        assert!(matches!(
            output.failures[0].error,
            Error::Contract(ContractError::InvalidType { .. })
        ));
    }

    #[test]
    fn run_json_rejects_malformed_input() {
        assert!(matches!(generator().run_json("{"), Err(Error::Input(_))));
    }
}
