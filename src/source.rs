// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw declarations handed over by a source reader.
//!
//! A source reader (outside this crate) scans host code and produces plain
//! records and contracts. Nothing here is validated yet; see
//! [`Entity::new`](crate::entity::parse::Entity::new) and
//! [`RepositoryContract::build`](crate::entity::contract::RepositoryContract::build).
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "name": "User",
//!       "package": "models",
//!       "fields": [
//!         { "name": "id", "type": "i64", "tag": "pk" },
//!         { "name": "email", "type": "String", "tag": "unique" }
//!       ]
//!     }
//!   ],
//!   "contracts": [
//!     {
//!       "name": "UserRepository",
//!       "entity": "User",
//!       "methods": [
//!         { "name": "find_by_email", "params": [{ "name": "email", "type": "&str" }], "returns_single": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawField {
    /// Field name.
    pub name:    String,
    /// Type as written in the host language.
    #[serde(rename = "type")]
    pub ty:      String,
    /// Raw tag string, possibly empty.
    #[serde(default, rename = "tag")]
    pub raw_tag: String
}

/// One declared record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Record name.
    pub name:    String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields:  Vec<RawField>,
    /// Package or module the record was found in.
    #[serde(default)]
    pub package: String
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawParam {
    /// Parameter name.
    pub name: String,
    /// Type as written in the host language.
    #[serde(rename = "type")]
    pub ty:   String
}

/// One declared contract method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawMethod {
    /// Method name.
    pub name:           String,
    /// Parameters, excluding the receiver.
    #[serde(default)]
    pub params:         Vec<RawParam>,
    /// Returns one value rather than a collection.
    #[serde(default)]
    pub returns_single: bool,
    /// Returns a result that can carry an error.
    #[serde(default = "default_true")]
    pub returns_error:  bool,
    /// SQL attached to the method, used verbatim.
    #[serde(default)]
    pub custom_sql:     Option<String>,
    /// Returns the entity (or a collection of it).
    #[serde(default = "default_true")]
    pub returns_entity: bool,
    /// Scalar return type such as `i64`.
    #[serde(default)]
    pub scalar_return:  Option<String>
}

/// One declared repository contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawContract {
    /// Contract (trait) name.
    pub name:        String,
    /// Name of the entity the contract serves.
    #[serde(rename = "entity")]
    pub entity_name: String,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods:     Vec<RawMethod>
}

/// Everything a source reader found in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBatch {
    /// Records.
    #[serde(default)]
    pub records:   Vec<RawRecord>,
    /// Contracts.
    #[serde(default)]
    pub contracts: Vec<RawContract>
}

impl RawBatch {
    /// Parse a batch from JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the input does not match the format above.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

fn default_true() -> bool {
    true
}
