// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! Every key is optional; a missing key keeps its default.
//!
//! ```toml
//! [schema]
//! varchar_length = 255     # 0 maps strings to TEXT
//! if_not_exists = false
//!
//! [repository]
//! pool_type = "sqlx::PgPool"
//! error_type = "sqlx::Error"
//! impl_suffix = "Impl"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schema generation settings.
    pub schema:     SchemaConfig,
    /// Repository code generation settings.
    pub repository: RepositoryConfig
}

/// Settings for `CREATE TABLE` / `CREATE INDEX` output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Length of `VARCHAR` columns for strings; `0` selects `TEXT`.
    pub varchar_length: u32,
    /// Emit `IF NOT EXISTS` on tables and indexes.
    pub if_not_exists:  bool
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            varchar_length: 255,
            if_not_exists:  false
        }
    }
}

impl SchemaConfig {
    /// `VARCHAR` length, or `None` for `TEXT`.
    #[must_use]
    pub fn string_length(&self) -> Option<u32> {
        (self.varchar_length > 0).then_some(self.varchar_length)
    }
}

/// Settings for generated repository implementations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Type of the connection pool field.
    pub pool_type:   String,
    /// Error type of every generated method.
    pub error_type:  String,
    /// Suffix appended to the contract name to name the implementation.
    pub impl_suffix: String
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            pool_type:   "sqlx::PgPool".to_string(),
            error_type:  "sqlx::Error".to_string(),
            impl_suffix: "Impl".to_string()
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed TOML or unknown keys.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.schema.string_length(), Some(255));
        assert_eq!(config.repository.pool_type, "sqlx::PgPool");
    }

    #[test]
    fn partial_sections() {
        let config = Config::from_toml(
            r#"
            [schema]
            if_not_exists = true

            [repository]
            impl_suffix = "Pg"
            "#
        )
        .unwrap();
        assert!(config.schema.if_not_exists);
        assert_eq!(config.schema.varchar_length, 255);
        assert_eq!(config.repository.impl_suffix, "Pg");
        assert_eq!(config.repository.error_type, "sqlx::Error");
    }

    #[test]
    fn zero_length_selects_text() {
        let config = Config::from_toml("[schema]\nvarchar_length = 0").unwrap();
        assert_eq!(config.schema.string_length(), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml("[schema]\ncolour = true"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = Config::load("/nonexistent/entity-codegen.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
