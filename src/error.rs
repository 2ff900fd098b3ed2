// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types.
//!
//! Each stage of the pipeline has its own error enum so callers can tell a
//! rejected entity from a rejected contract or a broken configuration:
//!
//! | Type | Raised by | Scope |
//! |------|-----------|-------|
//! | [`ModelError`] | [`Entity::new`](crate::entity::parse::Entity::new) | One entity |
//! | [`ContractError`] | [`RepositoryContract::build`](crate::entity::contract::RepositoryContract::build), [`Relations::build`](crate::entity::relations::Relations::build) | One contract, or the join queries of one entity |
//! | [`ConfigError`] | [`Config`](crate::config::Config) loading | Whole run |
//!
//! Generators never return errors: once an entity and its contract or
//! relations are built, schema and code generation are total.

use std::path::PathBuf;

use thiserror::Error;

/// Entity validation failure.
///
/// Variants are checked in declaration order and the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The entity name is empty.
    #[error("entity name must not be empty")]
    EmptyName,

    /// The entity declares no fields.
    #[error("entity `{entity}` has no fields")]
    NoFields {
        /// Entity name.
        entity: String
    },

    /// Two fields share a name.
    #[error("entity `{entity}` declares field `{field}` more than once")]
    DuplicateFieldName {
        /// Entity name.
        entity: String,
        /// Repeated field name.
        field:  String
    },

    /// A field has an empty name.
    #[error("entity `{entity}` has an unnamed field at position {position}")]
    InvalidFieldName {
        /// Entity name.
        entity:   String,
        /// Zero-based position of the field.
        position: usize
    }
}

/// Repository contract construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// No entity with the contract's entity name was built.
    #[error("contract `{contract}` targets unknown entity `{entity}`")]
    UnknownEntity {
        /// Contract name.
        contract: String,
        /// Missing entity name.
        entity:   String
    },

    /// The contract was built against a different entity.
    #[error("contract `{contract}` targets `{expected}` but was given `{found}`")]
    EntityMismatch {
        /// Contract name.
        contract: String,
        /// Entity named by the contract.
        expected: String,
        /// Entity supplied by the caller.
        found:    String
    },

    /// A name cannot be used as a Rust identifier.
    #[error("`{name}` is not a valid Rust identifier")]
    InvalidIdentifier {
        /// Offending name.
        name: String
    },

    /// A type string does not parse as a Rust type.
    #[error("`{ty}` is not a valid Rust type")]
    InvalidType {
        /// Offending type string.
        ty: String
    },

    /// The method neither carries SQL nor follows a known naming convention.
    #[error("method `{method}` has no SQL and its name does not describe a query")]
    UnresolvedMethod {
        /// Method name.
        method: String
    },

    /// The method does not return an error, so failures cannot propagate.
    #[error("method `{method}` must return a result")]
    InfallibleMethod {
        /// Method name.
        method: String
    },

    /// An update has no column to set because every column is a key.
    #[error("method `{method}` has nothing to update: every column of `{entity}` is a key")]
    NothingToUpdate {
        /// Method name.
        method: String,
        /// Entity name.
        entity: String
    },

    /// The method's parameter count does not match its query.
    #[error("method `{method}` expects {expected} parameter(s), found {found}")]
    ParamCountMismatch {
        /// Method name.
        method:   String,
        /// Parameters the query binds.
        expected: usize,
        /// Parameters declared on the method.
        found:    usize
    }
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File path.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error
    },

    /// Configuration is not valid TOML or has unknown keys.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configured type path does not parse.
    #[error("invalid `{key}` in config: `{value}` is not a Rust type")]
    InvalidType {
        /// Config key.
        key:   &'static str,
        /// Configured value.
        value: String
    }
}

/// Any failure surfaced by the batch driver.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity validation failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Contract construction failed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raw input is not valid JSON.
    #[error("invalid input: {0}")]
    Input(#[from] serde_json::Error)
}

/// Result alias for batch-level operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_messages_name_the_entity() {
        let err = ModelError::DuplicateFieldName {
            entity: "User".to_string(),
            field:  "email".to_string()
        };
        assert_eq!(
            err.to_string(),
            "entity `User` declares field `email` more than once"
        );
    }

    #[test]
    fn contract_error_converts_into_error() {
        let err: Error = ContractError::UnresolvedMethod {
            method: "Frobnicate".to_string()
        }
        .into();
        assert!(matches!(err, Error::Contract(_)));
        assert!(err.to_string().contains("Frobnicate"));
    }
}
