// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validated Rust type strings.
//!
//! Model types stay plain data (`Send + Sync`), so they hold type strings
//! rather than `syn` trees. [`RustType`] checks the string once on
//! construction and re-parses it when tokens are needed.

use std::fmt;

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::Type;

/// A string known to parse as a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RustType(String);

impl RustType {
    /// Validate a type string.
    ///
    /// Returns `None` when the string is not a Rust type.
    #[must_use]
    pub fn parse(ty: &str) -> Option<Self> {
        let ty = ty.trim();
        syn::parse_str::<Type>(ty).ok().map(|_| Self(ty.to_string()))
    }

    /// The type as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed type tree.
    #[must_use]
    pub fn to_type(&self) -> Option<Type> {
        syn::parse_str(&self.0).ok()
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToTokens for RustType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        // Validated in `parse`.
        if let Some(ty) = self.to_type() {
            ty.to_tokens(tokens);
        }
    }
}

/// Check whether a name can be used as a Rust identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}
