// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Join queries derived from foreign keys.
//!
//! Every foreign key whose referenced table belongs to another entity of
//! the batch becomes one join. The entity is loaded by its key together
//! with the rows it references:
//!
//! | Foreign keys | Result type | Method |
//! |--------------|-------------|--------|
//! | `Order.UserID` → `user(id)` | `OrderWithUser` | `get_order_with_user` |
//! | two or more referenced entities | `OrderWithRelations` | `get_order_with_relations` |
//!
//! A composite foreign key (`fk:<group>,...`) joins on every member. A
//! group with a single member renders no constraint and joins nothing.
//! References to tables outside the batch are skipped.
//!
//! # Naming
//!
//! The referenced row is stored under the foreign key's role: the field
//! name in snake_case without its `_id` suffix (`AuthorID` → `author`), or
//! the group name. An entity referenced through several foreign keys gets
//! one result type per key, named `<Entity>With<Related>Via<Key>`.

use super::parse::{Entity, Field, GroupOutcome};
use crate::{
    entity::contract::Param,
    error::ContractError,
    utils::{
        case::{pascal_case, snake_case},
        types::{RustType, is_identifier}
    }
};

/// One foreign key resolved to an entity of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join<'a> {
    /// Result type of the single join, e.g. `OrderWithUser`.
    pub name: String,

    /// Field holding the referenced row, e.g. `user`.
    pub role: String,

    /// Referenced entity.
    pub related: &'a Entity,

    /// `(local column, referenced column)` pairs.
    pub on: Vec<(String, String)>
}

/// Join queries of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relations<'a> {
    /// Entity owning the foreign keys.
    pub entity: &'a Entity,

    /// Field holding the entity's own row, e.g. `order`.
    pub role: String,

    /// Key parameters, one per key column.
    pub keys: Vec<Param>,

    /// Joins in order of first appearance.
    pub joins: Vec<Join<'a>>
}

/// One generated query: a result type and the joins it loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinQuery<'r, 'a> {
    /// Result type name.
    pub name:  String,
    /// Joined foreign keys.
    pub joins: Vec<&'r Join<'a>>
}

impl JoinQuery<'_, '_> {
    /// Name of the generated method, e.g. `get_order_with_user`.
    #[must_use]
    pub fn fn_name(&self) -> String {
        format!("get_{}", snake_case(&self.name))
    }
}

/// A foreign key before its table is resolved.
struct Link<'f> {
    label: &'f str,
    table: &'f str,
    on:    Vec<(String, String)>
}

impl<'a> Relations<'a> {
    /// Resolve the foreign keys of `entity` against `entities`.
    ///
    /// Returns `Ok(None)` when nothing can be joined: no foreign key
    /// reaches an entity of the batch, or the entity has no key to look
    /// rows up by.
    ///
    /// # Errors
    ///
    /// - [`ContractError::InvalidIdentifier`] if an entity, field, result
    ///   type or method name is not a Rust identifier
    /// - [`ContractError::InvalidType`] if a key field's type does not parse
    pub fn build(
        entity: &'a Entity,
        entities: &'a [Entity]
    ) -> Result<Option<Self>, ContractError> {
        let generable = entity.generable_fields();
        if !generable.iter().any(|f| f.constraint.has_foreign_key()) {
            return Ok(None);
        }

        let key_fields: Vec<&Field> = entity
            .key_columns()
            .iter()
            .filter_map(|column| generable.iter().find(|f| f.column_name() == *column).copied())
            .collect();
        if key_fields.is_empty() {
            tracing::debug!(entity = %entity.name, "no key column, skipping joins");
            return Ok(None);
        }

        let mut resolved = Vec::new();
        for link in links(entity) {
            match entities.iter().find(|e| e.bare_table_name() == link.table) {
                Some(related) => resolved.push((link, related)),
                None => tracing::debug!(
                    entity = %entity.name,
                    table = link.table,
                    "referenced table is outside the batch"
                )
            }
        }
        if resolved.is_empty() {
            return Ok(None);
        }

        let role = snake_case(&entity.name);
        let mut taken = vec![role.clone()];
        let joins: Vec<Join<'a>> = resolved
            .iter()
            .enumerate()
            .map(|(i, (link, related))| {
                let shared = resolved
                    .iter()
                    .filter(|(_, other)| std::ptr::eq(*other, *related))
                    .count()
                    > 1;
                let name = if shared {
                    format!("{}With{}Via{}", entity.name, related.name, pascal_case(link.label))
                } else {
                    format!("{}With{}", entity.name, related.name)
                };

                let mut field = role_of(link.label);
                if taken.contains(&field) {
                    field = format!("{field}_{}", i + 1);
                }
                taken.push(field.clone());

                Join {
                    name,
                    role: field,
                    related: *related,
                    on: link.on.clone()
                }
            })
            .collect();

        let keys = key_fields
            .iter()
            .map(|f| {
                let ty = RustType::parse(&f.ty).ok_or_else(|| ContractError::InvalidType {
                    ty: f.ty.clone()
                })?;
                Ok(Param {
                    name: snake_case(&f.name),
                    ty
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let relations = Self {
            entity,
            role,
            keys,
            joins
        };
        relations.check_identifiers()?;
        Ok(Some(relations))
    }

    /// Queries to generate: one per join, then one loading every
    /// referenced entity when there are two or more.
    ///
    /// The combined query joins each entity once, through its first
    /// foreign key.
    #[must_use]
    pub fn queries(&self) -> Vec<JoinQuery<'_, 'a>> {
        let mut queries: Vec<JoinQuery<'_, 'a>> = self
            .joins
            .iter()
            .map(|join| JoinQuery {
                name:  join.name.clone(),
                joins: vec![join]
            })
            .collect();

        let mut distinct: Vec<&Join<'a>> = Vec::new();
        for join in &self.joins {
            if !distinct.iter().any(|d| std::ptr::eq(d.related, join.related)) {
                distinct.push(join);
            }
        }
        if distinct.len() > 1 {
            queries.push(JoinQuery {
                name:  format!("{}WithRelations", self.entity.name),
                joins: distinct
            });
        }

        queries
    }

    fn check_identifiers(&self) -> Result<(), ContractError> {
        let mut names: Vec<String> = vec![self.entity.name.clone(), self.role.clone()];
        names.extend(self.keys.iter().map(|p| p.name.clone()));
        names.extend(self.entity.generable_fields().iter().map(|f| f.name.clone()));
        for join in &self.joins {
            names.push(join.role.clone());
            names.push(join.related.name.clone());
            names.extend(join.related.generable_fields().iter().map(|f| f.name.clone()));
        }
        for query in self.queries() {
            names.push(query.fn_name());
            names.push(query.name);
        }

        match names.into_iter().find(|name| !is_identifier(name)) {
            Some(name) => Err(ContractError::InvalidIdentifier { name }),
            None => Ok(())
        }
    }
}

/// Foreign keys of `entity` in order of first appearance.
fn links(entity: &Entity) -> Vec<Link<'_>> {
    let groups = entity.foreign_key_groups();
    let mut links = Vec::new();

    for field in entity.generable_fields() {
        let Some(reference) = &field.constraint.fk_reference else {
            continue;
        };
        match field.constraint.fk_group.as_deref() {
            None => links.push(Link {
                label: &field.name,
                table: &reference.table,
                on:    vec![(field.column_name(), reference.column.clone())]
            }),
            Some(group) => {
                let rendered = groups
                    .iter()
                    .find(|g| g.name() == group)
                    .and_then(GroupOutcome::rendered);
                if let Some(members) = rendered
                    && members.first().is_some_and(|m| std::ptr::eq(*m, field))
                {
                    links.push(Link {
                        label: group,
                        table: &reference.table,
                        on:    members
                            .iter()
                            .filter_map(|m| {
                                m.constraint
                                    .fk_reference
                                    .as_ref()
                                    .map(|r| (m.column_name(), r.column.clone()))
                            })
                            .collect()
                    });
                }
            }
        }
    }

    links
}

/// `AuthorID` → `author`, `fk_item` → `fk_item`.
fn role_of(label: &str) -> String {
    let snake = snake_case(label);
    match snake.strip_suffix("_id") {
        Some(role) if !role.is_empty() => role.to_string(),
        _ => snake
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

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

    fn shop() -> Vec<Entity> {
        vec![
            entity("User", &[("ID", "i64", "pk"), ("Email", "String", "")]),
            entity("Product", &[("ID", "i64", "pk"), ("Title", "String", "")]),
            entity(
                "Order",
                &[
                    ("ID", "i64", "pk"),
                    ("UserID", "i64", "fk:user,id"),
                    ("ProductID", "i64", "fk:product,id"),
                    ("CouponID", "i64", "fk:coupons,id"),
                ]
            ),
        ]
    }

    fn query_names(relations: &Relations<'_>) -> Vec<String> {
        relations.queries().into_iter().map(|q| q.name).collect()
    }

    #[test]
    fn one_join_per_resolved_foreign_key() {
        let entities = shop();
        let relations = Relations::build(&entities[2], &entities).unwrap().unwrap();

        assert_eq!(relations.role, "order");
        assert_eq!(relations.keys[0].name, "id");
        assert_eq!(relations.keys[0].ty.as_str(), "i64");

        let roles: Vec<&str> = relations.joins.iter().map(|j| j.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "product"]);
        assert_eq!(
            relations.joins[0].on,
            vec![("user_id".to_string(), "id".to_string())]
        );
        assert_eq!(
            query_names(&relations),
            vec!["OrderWithUser", "OrderWithProduct", "OrderWithRelations"]
        );
    }

    #[test]
    fn single_related_entity_has_no_combined_query() {
        let entities = vec![
            entity("User", &[("ID", "i64", "pk")]),
            entity("Post", &[("ID", "i64", "pk"), ("AuthorID", "i64", "fk:user,id")]),
        ];
        let relations = Relations::build(&entities[1], &entities).unwrap().unwrap();
        assert_eq!(relations.joins[0].role, "author");
        assert_eq!(query_names(&relations), vec!["PostWithUser"]);
        assert_eq!(relations.queries()[0].fn_name(), "get_post_with_user");
    }

    #[test]
    fn entity_referenced_twice_gets_one_type_per_key() {
        let entities = vec![
            entity("User", &[("ID", "i64", "pk")]),
            entity(
                "Ticket",
                &[
                    ("ID", "i64", "pk"),
                    ("OpenedBy", "i64", "fk:user,id"),
                    ("ClosedBy", "i64", "fk:user,id"),
                ]
            ),
        ];
        let relations = Relations::build(&entities[1], &entities).unwrap().unwrap();
        assert_eq!(
            query_names(&relations),
            vec!["TicketWithUserViaOpenedBy", "TicketWithUserViaClosedBy"]
        );
        let roles: Vec<&str> = relations.joins.iter().map(|j| j.role.as_str()).collect();
        assert_eq!(roles, vec!["opened_by", "closed_by"]);
    }

    #[test]
    fn composite_foreign_key_joins_on_every_member() {
        let entities = vec![
            entity("Membership", &[("TeamID", "i64", "pk"), ("UserID", "i64", "pk")]),
            entity(
                "Grant",
                &[
                    ("ID", "i64", "pk"),
                    ("TeamID", "i64", "fk:fk_member,membership,team_id"),
                    ("UserID", "i64", "fk:fk_member,membership,user_id"),
                    ("Lonely", "i64", "fk:fk_lonely,membership,team_id"),
                ]
            ),
        ];
        let relations = Relations::build(&entities[1], &entities).unwrap().unwrap();
        assert_eq!(relations.joins.len(), 1);
        assert_eq!(relations.joins[0].role, "fk_member");
        assert_eq!(
            relations.joins[0].on,
            vec![
                ("team_id".to_string(), "team_id".to_string()),
                ("user_id".to_string(), "user_id".to_string())
            ]
        );
    }

    #[test]
    fn composite_key_becomes_several_parameters() {
        let entities = vec![
            entity("Team", &[("ID", "i64", "pk")]),
            entity(
                "Membership",
                &[("TeamID", "i64", "pk,fk:team,id"), ("UserID", "uuid::Uuid", "pk")]
            ),
        ];
        let relations = Relations::build(&entities[1], &entities).unwrap().unwrap();
        let keys: Vec<(&str, &str)> = relations
            .keys
            .iter()
            .map(|p| (p.name.as_str(), p.ty.as_str()))
            .collect();
        assert_eq!(keys, vec![("team_id", "i64"), ("user_id", "uuid::Uuid")]);
    }

    #[test]
    fn self_reference_keeps_roles_apart() {
        let entities = vec![entity(
            "Employee",
            &[("ID", "i64", "pk"), ("EmployeeID", "i64", "fk:employee,id")]
        )];
        let relations = Relations::build(&entities[0], &entities).unwrap().unwrap();
        assert_eq!(relations.role, "employee");
        assert_eq!(relations.joins[0].role, "employee_1");
    }

    #[test]
    fn nothing_to_join() {
        let entities = shop();
        assert_eq!(Relations::build(&entities[0], &entities), Ok(None));

        let outside = vec![entity("Order", &[("ID", "i64", "pk"), ("CouponID", "i64", "fk:coupons,id")])];
        assert_eq!(Relations::build(&outside[0], &outside), Ok(None));

        let keyless = vec![
            entity("User", &[("ID", "i64", "pk")]),
            entity("Visit", &[("UserID", "i64", "fk:user,id")]),
        ];
        assert_eq!(Relations::build(&keyless[1], &keyless), Ok(None));
    }

    #[test]
    fn invalid_key_type_is_rejected() {
        let entities = vec![
            entity("User", &[("ID", "i64", "pk")]),
            entity("Visit", &[("ID", "[]byte", "pk"), ("UserID", "i64", "fk:user,id")]),
        ];
        assert_eq!(
            Relations::build(&entities[1], &entities),
            Err(ContractError::InvalidType {
                ty: "[]byte".to_string()
            })
        );
    }

    #[test]
    fn invalid_related_field_is_rejected() {
        let entities = vec![
            entity("User", &[("ID", "i64", "pk"), ("type", "String", "")]),
            entity("Visit", &[("ID", "i64", "pk"), ("UserID", "i64", "fk:user,id")]),
        ];
        assert_eq!(
            Relations::build(&entities[1], &entities),
            Err(ContractError::InvalidIdentifier {
                name: "type".to_string()
            })
        );
    }
}
