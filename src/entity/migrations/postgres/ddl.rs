// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! DDL (Data Definition Language) generation for PostgreSQL.
//!
//! Generates CREATE TABLE and CREATE INDEX statements.
//!
//! Column definitions quote the column name. Column lists in trailing
//! clauses and indexes, and referenced tables, are written bare.

use crate::{
    entity::{
        migrations::types::{PostgresTypeMapper, TypeMapper},
        parse::{Entity, Field, GroupOutcome, IndexGroup}
    },
    utils::case::{quote_identifier, quote_literal}
};

/// Generate the CREATE TABLE statement.
pub fn create_table(entity: &Entity, mapper: &PostgresTypeMapper, if_not_exists: bool) -> String {
    let mut lines: Vec<String> = entity
        .generable_fields()
        .into_iter()
        .map(|f| column_def(entity, f, mapper))
        .collect();
    lines.extend(trailing_clauses(entity));

    let exists = if if_not_exists { "IF NOT EXISTS " } else { "" };
    format!(
        "CREATE TABLE {}{} (\n{}\n);\n",
        exists,
        entity.table_name(),
        lines.join(",\n")
    )
}

/// Generate a single column definition.
fn column_def(entity: &Entity, field: &Field, mapper: &PostgresTypeMapper) -> String {
    let column = field.column_name();
    let constraint = &field.constraint;
    let sql_type = mapper.map_type_str(&field.ty);

    let quoted = quote_identifier(&column);

    let mut parts = vec![
        format!("    {quoted}"),
        sql_type.to_sql_string(),
    ];

    if entity
        .identity_key()
        .is_some_and(|key| std::ptr::eq(key, field))
    {
        parts.push("GENERATED BY DEFAULT AS IDENTITY".to_string());
    }

    // PRIMARY KEY inline only for single-column keys
    if field.is_primary() && !entity.has_composite_key() {
        parts.push("PRIMARY KEY".to_string());
    } else if !sql_type.nullable {
        parts.push("NOT NULL".to_string());
    }

    if constraint.is_unique && constraint.unique_group.is_none() {
        parts.push("UNIQUE".to_string());
    }

    if let Some(check) = &constraint.check_expr {
        parts.push(format!("CHECK ({check})"));
    }

    if !constraint.enum_values.is_empty() {
        let values: Vec<String> = constraint
            .enum_values
            .iter()
            .map(|v| quote_literal(v))
            .collect();
        parts.push(format!("CHECK ({quoted} IN ({}))", values.join(", ")));
    }

    if sql_type.needs_non_negative_check() {
        parts.push(format!("CHECK ({quoted} >= 0)"));
    }

    if let Some(default) = &constraint.default_val {
        parts.push(format!("DEFAULT {default}"));
    }

    // Grouped keys render as a trailing FOREIGN KEY clause, or not at all
    if constraint.fk_group.is_none()
        && let Some(reference) = &constraint.fk_reference
    {
        let mut fk = format!("REFERENCES {}({})", reference.table, reference.column);
        push_actions(&mut fk, field);
        parts.push(fk);
    }

    parts.join(" ")
}

/// Composite PRIMARY KEY, UNIQUE and FOREIGN KEY clauses, in that order.
fn trailing_clauses(entity: &Entity) -> Vec<String> {
    let mut clauses = Vec::new();

    if entity.has_composite_key() {
        let columns: Vec<String> = entity
            .primary_key_fields()
            .iter()
            .map(|f| f.column_name())
            .collect();
        clauses.push(format!("    PRIMARY KEY ({})", columns.join(", ")));
    }

    for group in entity.unique_groups() {
        match group {
            GroupOutcome::Rendered { name, members } => clauses.push(format!(
                "    CONSTRAINT {} UNIQUE ({})",
                quote_identifier(name),
                column_list(&members)
            )),
            GroupOutcome::Dropped { name, member } => tracing::debug!(
                entity = %entity.name,
                group = name,
                field = %member.name,
                "dropping unique group with a single member"
            )
        }
    }

    for group in entity.foreign_key_groups() {
        match group {
            GroupOutcome::Rendered { name, members } => {
                clauses.push(foreign_key_clause(name, &members));
            }
            GroupOutcome::Dropped { name, member } => tracing::debug!(
                entity = %entity.name,
                group = name,
                field = %member.name,
                "dropping foreign key group with a single member"
            )
        }
    }

    clauses
}

/// Generate `CONSTRAINT "<group>" FOREIGN KEY (...) REFERENCES t (...)`.
///
/// The referenced table comes from the first member. Actions come from the
/// first member that declares one.
fn foreign_key_clause(name: &str, members: &[&Field]) -> String {
    let references: Vec<_> = members
        .iter()
        .filter_map(|f| f.constraint.fk_reference.as_ref())
        .collect();
    let table = references.first().map_or("", |r| r.table.as_str());
    let ref_columns: Vec<&str> = references.iter().map(|r| r.column.as_str()).collect();

    let mut clause = format!(
        "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        quote_identifier(name),
        column_list(members),
        table,
        ref_columns.join(", ")
    );

    if let Some(action) = members.iter().find_map(|f| f.constraint.fk_on_delete) {
        clause.push_str(&format!(" ON DELETE {}", action.as_sql()));
    }
    if let Some(action) = members.iter().find_map(|f| f.constraint.fk_on_update) {
        clause.push_str(&format!(" ON UPDATE {}", action.as_sql()));
    }

    clause
}

fn push_actions(sql: &mut String, field: &Field) {
    if let Some(action) = field.constraint.fk_on_delete {
        sql.push_str(&format!(" ON DELETE {}", action.as_sql()));
    }
    if let Some(action) = field.constraint.fk_on_update {
        sql.push_str(&format!(" ON UPDATE {}", action.as_sql()));
    }
}

fn column_list(fields: &[&Field]) -> String {
    fields
        .iter()
        .map(|f| f.column_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate CREATE INDEX for one index group.
pub fn create_index(entity: &Entity, index: &IndexGroup<'_>, if_not_exists: bool) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    let exists = if if_not_exists { "IF NOT EXISTS " } else { "" };
    format!(
        "CREATE {}INDEX {}{} ON {} ({});\n",
        unique,
        exists,
        quote_identifier(index.name),
        entity.table_name(),
        column_list(&index.members)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::SchemaConfig, entity::migrations::SchemaGenerator};

    fn entity(name: &str, fields: &[(&str, &str, &str)]) -> Entity {
        Entity::new(
            name,
            fields
                .iter()
                .map(|(n, ty, tag)| Field::from_tag(*n, *ty, tag))
                .collect(),
            "models"
        )
        .unwrap()
    }

    fn render(entity: &Entity) -> String {
        SchemaGenerator::default().generate_entity(entity)
    }

    #[test]
    fn single_primary_key_is_inline() {
        let sql = render(&entity(
            "User",
            &[("ID", "uuid::Uuid", "pk"), ("Username", "String", "unique"), ("Email", "String", "")]
        ));
        assert_eq!(
            sql,
            "CREATE TABLE \"user\" (\n    \"id\" UUID PRIMARY KEY,\n    \"username\" VARCHAR(255) NOT NULL UNIQUE,\n    \"email\" VARCHAR(255) NOT NULL\n);\n\n"
        );
    }

    #[test]
    fn integer_key_is_identity() {
        let sql = render(&entity("Post", &[("id", "i64", "pk"), ("title", "Option<String>", "")]));
        assert!(sql.contains("\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,"));
        assert!(sql.contains("\"title\" VARCHAR(255)\n"));
    }

    #[test]
    fn integer_key_with_default_is_not_identity() {
        let sql = render(&entity("Post", &[("id", "i64", "pk,default:0")]));
        assert!(sql.contains("\"id\" BIGINT PRIMARY KEY DEFAULT 0"));
    }

    #[test]
    fn composite_primary_key_is_trailing() {
        let sql = render(&entity(
            "Membership",
            &[("user_id", "i64", "pk"), ("team_id", "i64", "pk"), ("role", "String", "")]
        ));
        assert!(sql.contains("    PRIMARY KEY (user_id, team_id)\n);"));
        assert!(!sql.contains("BIGINT PRIMARY KEY"));
        assert!(!sql.contains("IDENTITY"));
        assert!(sql.contains("\"user_id\" BIGINT NOT NULL,"));
    }

    #[test]
    fn unique_group_renders_one_clause() {
        let sql = render(&entity(
            "Account",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("tenant", "String", "unique:uq_tenant_name"),
                ("name", "String", "unique:uq_tenant_name")
            ]
        ));
        assert_eq!(sql.matches("UNIQUE").count(), 1);
        assert!(sql.contains("    CONSTRAINT \"uq_tenant_name\" UNIQUE (tenant, name)\n);"));
    }

    #[test]
    fn singleton_unique_group_renders_nothing() {
        let sql = render(&entity(
            "Account",
            &[("id", "uuid::Uuid", "pk"), ("tenant", "String", "unique:lonely")]
        ));
        assert!(!sql.contains("UNIQUE"));
        assert!(!sql.contains("lonely"));
    }

    #[test]
    fn simple_foreign_key_is_inline() {
        let sql = render(&entity(
            "Order",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("user_id", "uuid::Uuid", "fk:users,id,on_delete:CASCADE,on_update:SET_NULL")
            ]
        ));
        assert!(sql.contains(
            "\"user_id\" UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE ON UPDATE SET NULL"
        ));
    }

    #[test]
    fn foreign_key_group_is_trailing() {
        let sql = render(&entity(
            "Shipment",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("order_id", "uuid::Uuid", "fk:fk_item,order_items,order_id"),
                ("item_no", "i32", "fk:fk_item,order_items,item_no,on_delete:CASCADE")
            ]
        ));
        assert_eq!(sql.matches("REFERENCES").count(), 1);
        assert!(sql.contains(
            "    CONSTRAINT \"fk_item\" FOREIGN KEY (order_id, item_no) REFERENCES order_items (order_id, item_no) ON DELETE CASCADE\n);"
        ));
    }

    #[test]
    fn singleton_foreign_key_group_renders_nothing() {
        let sql = render(&entity(
            "Shipment",
            &[("id", "uuid::Uuid", "pk"), ("order_id", "uuid::Uuid", "fk:fk_order,orders,id")]
        ));
        assert!(!sql.contains("REFERENCES"));
        assert!(!sql.contains("FOREIGN KEY"));
    }

    #[test]
    fn trailing_clause_order() {
        let sql = render(&entity(
            "Line",
            &[
                ("order_id", "i64", "pk,fk:fk_o,orders,id"),
                ("line_no", "i32", "pk,fk:fk_o,orders,line"),
                ("sku", "String", "unique:uq_sku"),
                ("batch", "String", "unique:uq_sku")
            ]
        ));
        let pk = sql.find("PRIMARY KEY (").unwrap();
        let unique = sql.find("CONSTRAINT \"uq_sku\"").unwrap();
        let fk = sql.find("CONSTRAINT \"fk_o\"").unwrap();
        assert!(pk < unique && unique < fk);
        assert!(sql.contains("PRIMARY KEY (order_id, line_no),\n"));
        assert!(sql.contains("UNIQUE (sku, batch),\n"));
    }

    #[test]
    fn check_enum_and_default_coexist() {
        let sql = render(&entity(
            "Order",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("status", "String", "check:length(status) > 0,enum:pending,shipped,default:'pending'")
            ]
        ));
        assert!(sql.contains(
            "\"status\" VARCHAR(255) NOT NULL CHECK (length(status) > 0) CHECK (\"status\" IN ('pending', 'shipped')) DEFAULT 'pending'"
        ));
    }

    #[test]
    fn unsigned_column_gets_non_negative_check() {
        let sql = render(&entity("Stock", &[("id", "uuid::Uuid", "pk"), ("qty", "u32", "")]));
        assert!(sql.contains("\"qty\" BIGINT NOT NULL CHECK (\"qty\" >= 0)"));
    }

    #[test]
    fn generated_checks_quote_reserved_columns() {
        let sql = render(&entity(
            "Ticket",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("order", "u16", ""),
                ("user", "String", "enum:admin,guest")
            ]
        ));
        assert!(sql.contains("\"order\" INTEGER NOT NULL CHECK (\"order\" >= 0)"));
        assert!(sql.contains("\"user\" VARCHAR(255) NOT NULL CHECK (\"user\" IN ('admin', 'guest'))"));
    }

    #[test]
    fn ignored_fields_produce_no_column() {
        let sql = render(&entity("User", &[("id", "uuid::Uuid", "pk"), ("cache", "String", "-")]));
        assert!(!sql.contains("cache"));
    }

    #[test]
    fn indexes_follow_table() {
        let sql = render(&entity(
            "Event",
            &[
                ("id", "uuid::Uuid", "pk"),
                ("kind", "String", "index"),
                ("tenant", "String", "unique_index:idx_tenant_at"),
                ("at", "DateTime<Utc>", "index:idx_tenant_at")
            ]
        ));
        assert!(sql.ends_with(
            ");\nCREATE INDEX \"kind_idx\" ON \"event\" (kind);\nCREATE UNIQUE INDEX \"idx_tenant_at\" ON \"event\" (tenant, at);\n\n"
        ));
    }

    #[test]
    fn if_not_exists() {
        let generator = SchemaGenerator::new(&SchemaConfig {
            if_not_exists: true,
            ..SchemaConfig::default()
        });
        let sql = generator.generate_entity(&entity(
            "Event",
            &[("id", "uuid::Uuid", "pk"), ("kind", "String", "index")]
        ));
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"event\" ("));
        assert!(sql.contains("CREATE INDEX IF NOT EXISTS \"kind_idx\""));
    }

    #[test]
    fn table_override_and_text_strings() {
        let generator = SchemaGenerator::new(&SchemaConfig {
            varchar_length: 0,
            ..SchemaConfig::default()
        });
        let sql = generator.generate_entity(&entity(
            "User",
            &[("id", "uuid::Uuid", "pk,table:accounts"), ("bio", "String", "")]
        ));
        assert!(sql.starts_with("CREATE TABLE \"accounts\" ("));
        assert!(sql.contains("\"bio\" TEXT NOT NULL"));
    }

    #[test]
    fn generate_concatenates_entities() {
        let a = entity("A", &[("id", "uuid::Uuid", "pk")]);
        let b = entity("B", &[("id", "uuid::Uuid", "pk")]);
        let sql = SchemaGenerator::default().generate(&[a.clone(), b.clone()]);
        assert_eq!(sql, format!("{}{}", render(&a), render(&b)));
    }
}
