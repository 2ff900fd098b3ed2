// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! PostgreSQL type mapping.
//!
//! # Type Mapping Table
//!
//! | Rust Type | PostgreSQL Type | Notes |
//! |-----------|-----------------|-------|
//! | `i8`, `i16` | `SMALLINT` | |
//! | `u8` | `SMALLINT` | `CHECK ("col" >= 0)` |
//! | `i32` | `INTEGER` | |
//! | `u16` | `INTEGER` | `CHECK ("col" >= 0)` |
//! | `i64`, `isize` | `BIGINT` | |
//! | `u32`, `u64`, `usize` | `BIGINT` | `CHECK ("col" >= 0)` |
//! | `f32` | `REAL` | |
//! | `f64` | `DOUBLE PRECISION` | |
//! | `bool` | `BOOLEAN` | |
//! | `String`, `&str` | `VARCHAR(n)` | `TEXT` when no length is configured |
//! | `char` | `CHAR(1)` | |
//! | `Uuid` | `UUID` | |
//! | `DateTime<Tz>`, `OffsetDateTime` | `TIMESTAMPTZ` | |
//! | `NaiveDateTime`, `PrimitiveDateTime`, `SystemTime` | `TIMESTAMP` | |
//! | `NaiveDate`, `Date` | `DATE` | |
//! | `NaiveTime`, `Time` | `TIME` | |
//! | `serde_json::Value`, `Json<T>` | `JSONB` | |
//! | `Decimal`, `BigDecimal` | `DECIMAL` | |
//! | `IpAddr`, `Ipv4Addr`, `Ipv6Addr` | `INET` | |
//! | `Vec<u8>`, `Bytes` | `BYTEA` | |
//! | `Option<T>` | `T` | Nullable |
//! | `Vec<T>` | `T[]` | PostgreSQL array |
//! | anything else | `TEXT` | |

use syn::Type;

use super::{SqlType, TypeMapper};

/// PostgreSQL type mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostgresTypeMapper {
    /// Length of `VARCHAR` for strings; `None` maps strings to `TEXT`.
    pub varchar_length: Option<u32>
}

impl Default for PostgresTypeMapper {
    fn default() -> Self {
        Self {
            varchar_length: Some(255)
        }
    }
}

impl TypeMapper for PostgresTypeMapper {
    fn map_type(&self, ty: &Type) -> SqlType {
        // &str, &[u8], ...
        if let Type::Reference(reference) = ty {
            return self.map_type(&reference.elem);
        }

        // Handle Option<T>
        if let Some(inner) = extract_generic_inner(ty, "Option") {
            let mut result = self.map_type(inner);
            result.nullable = true;
            return result;
        }

        // Handle Vec<T> (PostgreSQL arrays), except byte buffers
        if let Some(inner) = extract_generic_inner(ty, "Vec") {
            if last_segment(inner).as_deref() == Some("u8") {
                return SqlType::new("BYTEA");
            }
            let mut result = self.map_type(inner);
            result.array_dim += 1;
            return result;
        }

        // [u8] behind a reference
        if let Type::Slice(slice) = ty
            && last_segment(&slice.elem).as_deref() == Some("u8")
        {
            return SqlType::new("BYTEA");
        }

        self.map_type_name(ty)
    }
}

impl PostgresTypeMapper {
    /// Map a scalar type by the last segment of its path.
    fn map_type_name(&self, ty: &Type) -> SqlType {
        let Some(name) = last_segment(ty) else {
            return SqlType::new("TEXT");
        };

        match name.as_str() {
            // Integers
            "i8" | "i16" => SqlType::new("SMALLINT"), // PostgreSQL has no TINYINT
            "u8" => SqlType::unsigned("SMALLINT"),
            "i32" => SqlType::new("INTEGER"),
            "u16" => SqlType::unsigned("INTEGER"),
            "i64" | "isize" => SqlType::new("BIGINT"),
            "u32" | "u64" | "usize" => SqlType::unsigned("BIGINT"), // u64 may overflow

            // Floats
            "f32" => SqlType::new("REAL"),
            "f64" => SqlType::new("DOUBLE PRECISION"),

            // Boolean
            "bool" => SqlType::new("BOOLEAN"),

            // Strings
            "String" | "str" => match self.varchar_length {
                Some(len) => SqlType::new(format!("VARCHAR({len})")),
                None => SqlType::new("TEXT")
            },
            "char" => SqlType::new("CHAR(1)"),

            // UUIDs
            "Uuid" => SqlType::new("UUID"),

            // Date/Time (chrono, time, std)
            "DateTime" | "OffsetDateTime" => SqlType::new("TIMESTAMPTZ"),
            "NaiveDateTime" | "PrimitiveDateTime" | "SystemTime" => SqlType::new("TIMESTAMP"),
            "NaiveDate" | "Date" => SqlType::new("DATE"),
            "NaiveTime" | "Time" => SqlType::new("TIME"),

            // JSON
            "Value" | "Json" | "JsonValue" | "RawValue" => SqlType::new("JSONB"),

            // Decimal
            "Decimal" | "BigDecimal" => SqlType::new("DECIMAL"),

            // Network
            "IpAddr" | "Ipv4Addr" | "Ipv6Addr" | "IpNetwork" => SqlType::new("INET"),

            // Binary
            "Bytes" => SqlType::new("BYTEA"),

            // Fallback to TEXT for unknown types
            _ => SqlType::new("TEXT")
        }
    }
}

/// Last path segment of a type, e.g. `Value` for `serde_json::Value`.
fn last_segment(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map(|s| s.ident.to_string())
    } else {
        None
    }
}

/// Extract `T` from `Wrapper<T>`.
fn extract_generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == wrapper
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn map(ty: &str) -> SqlType {
        PostgresTypeMapper::default().map_type_str(ty)
    }

    #[rstest]
    #[case("i8", "SMALLINT")]
    #[case("i16", "SMALLINT")]
    #[case("i32", "INTEGER")]
    #[case("i64", "BIGINT")]
    #[case("f32", "REAL")]
    #[case("f64", "DOUBLE PRECISION")]
    #[case("bool", "BOOLEAN")]
    #[case("String", "VARCHAR(255)")]
    #[case("&str", "VARCHAR(255)")]
    #[case("uuid::Uuid", "UUID")]
    #[case("DateTime<Utc>", "TIMESTAMPTZ")]
    #[case("chrono::NaiveDateTime", "TIMESTAMP")]
    #[case("NaiveDate", "DATE")]
    #[case("serde_json::Value", "JSONB")]
    #[case("Decimal", "DECIMAL")]
    #[case("std::net::IpAddr", "INET")]
    #[case("Vec<u8>", "BYTEA")]
    #[case("&[u8]", "BYTEA")]
    #[case("MyCustomType", "TEXT")]
    fn maps_scalar(#[case] rust: &str, #[case] sql: &str) {
        let ty = map(rust);
        assert_eq!(ty.to_sql_string(), sql);
        assert!(!ty.nullable);
        assert!(!ty.non_negative);
    }

    #[rstest]
    #[case("u8", "SMALLINT")]
    #[case("u16", "INTEGER")]
    #[case("u32", "BIGINT")]
    #[case("u64", "BIGINT")]
    #[case("usize", "BIGINT")]
    fn unsigned_types_are_non_negative(#[case] rust: &str, #[case] sql: &str) {
        let ty = map(rust);
        assert_eq!(ty.name, sql);
        assert!(ty.needs_non_negative_check());
    }

    #[test]
    fn string_without_length_is_text() {
        let mapper = PostgresTypeMapper {
            varchar_length: None
        };
        assert_eq!(mapper.map_type_str("String").name, "TEXT");
    }

    #[test]
    fn option_is_nullable() {
        let ty = map("Option<String>");
        assert_eq!(ty.name, "VARCHAR(255)");
        assert!(ty.nullable);
    }

    #[test]
    fn optional_unsigned_keeps_check() {
        let ty = map("Option<u32>");
        assert!(ty.nullable);
        assert!(ty.needs_non_negative_check());
    }

    #[test]
    fn vec_to_array() {
        let ty = map("Vec<String>");
        assert_eq!(ty.to_sql_string(), "VARCHAR(255)[]");
        assert_eq!(ty.array_dim, 1);
    }

    #[test]
    fn option_vec() {
        let ty = map("Option<Vec<i32>>");
        assert_eq!(ty.to_sql_string(), "INTEGER[]");
        assert!(ty.nullable);
    }

    #[test]
    fn nested_vec() {
        assert_eq!(map("Vec<Vec<i64>>").to_sql_string(), "BIGINT[][]");
    }

    #[test]
    fn optional_bytes() {
        let ty = map("Option<Vec<u8>>");
        assert_eq!(ty.name, "BYTEA");
        assert!(ty.nullable);
    }
}
