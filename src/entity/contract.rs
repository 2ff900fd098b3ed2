// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository contracts.
//!
//! A contract is a trait declared by the user, e.g.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait UserRepository {
//!     async fn create(&self, item: &User) -> Result<User, sqlx::Error>;
//!     async fn find_by_email(&self, email: &str) -> Result<User, sqlx::Error>;
//!     async fn count_users_by_active(&self, active: bool) -> Result<i64, sqlx::Error>;
//! }
//! ```
//!
//! [`RepositoryContract::build`] classifies every method once and
//! precomputes the SQL of methods whose names describe a query.
//!
//! # Classification
//!
//! Tried in order, on the PascalCase form of the method name:
//!
//! | Rule | Kind |
//! |------|------|
//! | Method carries SQL | [`MethodKind::CustomSql`] |
//! | `Create` | [`MethodKind::Create`] |
//! | `GetByID`, `GetById`, `Get` | [`MethodKind::GetById`] |
//! | `Update` | [`MethodKind::Update`] |
//! | `Delete` | [`MethodKind::Delete`] |
//! | `List`, `ListAll` | [`MethodKind::List`] |
//! | `FindBy<Field>[And<Field>...]` naming entity fields | [`MethodKind::FindBy`] |
//! | [`match_method`] succeeds | [`MethodKind::SmartQuery`] |
//! | any other `FindBy...` | [`MethodKind::FindBy`] |
//! | anything else | [`ContractError::UnresolvedMethod`] |

use super::{
    parse::Entity,
    query::{ParsedQuery, QueryShape, generate_sql, match_method}
};
use crate::{
    error::ContractError,
    source::{RawContract, RawMethod},
    utils::{
        case::{pascal_case, snake_case},
        types::{RustType, is_identifier}
    }
};

/// How a method is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// `INSERT ... RETURNING`.
    Create,
    /// `SELECT` by primary key.
    GetById,
    /// `UPDATE` by primary key.
    Update,
    /// `DELETE` by primary key.
    Delete,
    /// `SELECT` of every row, ordered by key.
    List,
    /// `SELECT` with equality on the named fields.
    FindBy,
    /// SQL derived from the method name.
    SmartQuery,
    /// SQL supplied with the method.
    CustomSql
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty:   RustType
}

/// One classified contract method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name in PascalCase, e.g. `FindByEmail`.
    pub name: String,

    /// Implementation strategy.
    pub kind: MethodKind,

    /// Parameters, excluding the receiver.
    pub params: Vec<Param>,

    /// Returns one value rather than a collection.
    pub returns_single: bool,

    /// Returns the entity (or a collection of it).
    pub has_entity_return: bool,

    /// Scalar return type, for custom SQL.
    pub scalar_return_type: Option<RustType>,

    /// Fields named by a `FindBy` method.
    pub find_by_fields: Vec<String>,

    /// SQL supplied with the method.
    pub custom_sql: Option<String>,

    /// SQL derived from the method name.
    pub generated_sql: Option<String>
}

impl Method {
    /// Name of the generated Rust function.
    #[must_use]
    pub fn fn_name(&self) -> String {
        snake_case(&self.name)
    }

    fn build(raw: &RawMethod, entity: &Entity) -> Result<Self, ContractError> {
        let name = pascal_case(raw.name.trim());

        if !raw.returns_error {
            return Err(ContractError::InfallibleMethod { method: name });
        }

        let fn_name = snake_case(&name);
        if !is_identifier(&fn_name) {
            return Err(ContractError::InvalidIdentifier { name: fn_name });
        }

        let params = raw
            .params
            .iter()
            .map(|p| {
                if !is_identifier(&p.name) {
                    return Err(ContractError::InvalidIdentifier {
                        name: p.name.clone()
                    });
                }
                let ty = RustType::parse(&p.ty).ok_or_else(|| ContractError::InvalidType {
                    ty: p.ty.clone()
                })?;
                Ok(Param {
                    name: p.name.clone(),
                    ty
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scalar_return_type = raw
            .scalar_return
            .as_deref()
            .map(|ty| {
                RustType::parse(ty).ok_or_else(|| ContractError::InvalidType {
                    ty: ty.to_string()
                })
            })
            .transpose()?;

        let custom_sql = raw
            .custom_sql
            .as_deref()
            .map(str::trim)
            .filter(|sql| !sql.is_empty())
            .map(str::to_string);

        let mut method = Self {
            kind: MethodKind::CustomSql,
            params,
            returns_single: raw.returns_single,
            has_entity_return: raw.returns_entity && scalar_return_type.is_none(),
            scalar_return_type,
            find_by_fields: Vec::new(),
            custom_sql,
            generated_sql: None,
            name
        };

        if method.custom_sql.is_some() {
            return Ok(method);
        }

        let name = method.name.clone();
        let find_by = plain_find_by(&name, entity);
        method.kind = match name.as_str() {
            "Create" => MethodKind::Create,
            "GetByID" | "GetById" | "Get" => MethodKind::GetById,
            "Update" => MethodKind::Update,
            "Delete" => {
                method.has_entity_return = false;
                MethodKind::Delete
            }
            "List" | "ListAll" => MethodKind::List,
            _ if find_by.is_some() => {
                method.find_by_fields = find_by.unwrap_or_default();
                MethodKind::FindBy
            }
            _ => match match_method(&name) {
                Some(parsed) => {
                    method.apply_query(&parsed, entity);
                    MethodKind::SmartQuery
                }
                None if name.len() > "FindBy".len() && name.starts_with("FindBy") => {
                    method.find_by_fields = split_fields(&name["FindBy".len()..]);
                    MethodKind::FindBy
                }
                None => {
                    tracing::debug!(method = %name, "method name does not describe a query");
                    return Err(ContractError::UnresolvedMethod { method: name });
                }
            }
        };

        if method.kind == MethodKind::Update && entity.updatable_fields().is_empty() {
            return Err(ContractError::NothingToUpdate {
                method: method.name,
                entity: entity.name.clone()
            });
        }

        method.check_param_count(entity)?;
        Ok(method)
    }

    fn apply_query(&mut self, parsed: &ParsedQuery, entity: &Entity) {
        if parsed.shape == QueryShape::Delete {
            self.has_entity_return = false;
        }
        self.generated_sql = Some(generate_sql(
            parsed,
            &entity.table_name(),
            &entity.column_names()
        ));
    }

    fn check_param_count(&self, entity: &Entity) -> Result<(), ContractError> {
        let found = self.params.len();
        let expected = match self.kind {
            MethodKind::Create | MethodKind::Update => {
                if found >= 1 {
                    return Ok(());
                }
                1
            }
            MethodKind::GetById | MethodKind::Delete => entity.key_columns().len(),
            MethodKind::List => 0,
            MethodKind::FindBy => self.find_by_fields.len(),
            MethodKind::SmartQuery => match_method(&self.name).map_or(0, |p| p.param_count()),
            MethodKind::CustomSql => return Ok(())
        };

        if expected == found {
            Ok(())
        } else {
            Err(ContractError::ParamCountMismatch {
                method: self.name.clone(),
                expected,
                found
            })
        }
    }
}

/// Fields of a `FindBy` name made only of entity fields joined by `And`.
///
/// Names with operators, ordering or unknown fields (`FindByAgeGreaterThan`,
/// `FindByActiveOrderByEmail`) return `None` and go to the query matcher
/// first.
fn plain_find_by(name: &str, entity: &Entity) -> Option<Vec<String>> {
    let rest = name.strip_prefix("FindBy")?;
    let columns = entity.column_names();
    if columns.contains(&snake_case(rest)) {
        return Some(vec![rest.to_string()]);
    }
    let fields = split_fields(rest);
    let known = fields
        .iter()
        .all(|f| columns.contains(&snake_case(f)));
    (!fields.is_empty() && known).then_some(fields)
}

fn split_fields(rest: &str) -> Vec<String> {
    rest.split("And")
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// A validated repository contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContract {
    /// Contract (trait) name.
    pub name: String,

    /// Entity the contract serves.
    pub entity_name: String,

    /// Methods in declaration order.
    pub methods: Vec<Method>
}

impl RepositoryContract {
    /// Classify and validate every method of a raw contract.
    ///
    /// # Errors
    ///
    /// - [`ContractError::EntityMismatch`] if `entity` is not the contract's entity
    /// - [`ContractError::InvalidIdentifier`] if the contract, entity, a field,
    ///   a method or a parameter name is not a Rust identifier
    /// - [`ContractError::InvalidType`] if a parameter or return type does not parse
    /// - [`ContractError::InfallibleMethod`] if a method cannot return an error
    /// - [`ContractError::UnresolvedMethod`] if a method has no SQL and no
    ///   recognizable name
    /// - [`ContractError::NothingToUpdate`] if an `update` targets an entity
    ///   whose every column is a key
    /// - [`ContractError::ParamCountMismatch`] if a method's parameters do
    ///   not match its query
    pub fn build(raw: &RawContract, entity: &Entity) -> Result<Self, ContractError> {
        if raw.entity_name != entity.name {
            return Err(ContractError::EntityMismatch {
                contract: raw.name.clone(),
                expected: raw.entity_name.clone(),
                found:    entity.name.clone()
            });
        }

        let identifiers = std::iter::once(raw.name.as_str())
            .chain(std::iter::once(entity.name.as_str()))
            .chain(entity.generable_fields().into_iter().map(|f| f.name.as_str()));
        for name in identifiers {
            if !is_identifier(name) {
                return Err(ContractError::InvalidIdentifier {
                    name: name.to_string()
                });
            }
        }

        let methods = raw
            .methods
            .iter()
            .map(|m| Method::build(m, entity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: raw.name.clone(),
            entity_name: entity.name.clone(),
            methods
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{entity::parse::Field, source::RawParam};

    fn user() -> Entity {
        Entity::new(
            "User",
            vec![
                Field::from_tag("ID", "i64", "pk"),
                Field::from_tag("Username", "String", "unique"),
                Field::from_tag("Email", "String", ""),
                Field::from_tag("Active", "bool", ""),
            ],
            "models"
        )
        .unwrap()
    }

    fn method(name: &str, params: &[(&str, &str)]) -> RawMethod {
        RawMethod {
            name:           name.to_string(),
            params:         params
                .iter()
                .map(|(n, ty)| RawParam {
                    name: n.to_string(),
                    ty:   ty.to_string()
                })
                .collect(),
            returns_single: false,
            returns_error:  true,
            custom_sql:     None,
            returns_entity: true,
            scalar_return:  None
        }
    }

    fn contract(methods: Vec<RawMethod>) -> RawContract {
        RawContract {
            name: "UserRepository".to_string(),
            entity_name: "User".to_string(),
            methods
        }
    }

    fn build_one(raw: RawMethod) -> Result<Method, ContractError> {
        RepositoryContract::build(&contract(vec![raw]), &user())
            .map(|c| c.methods.into_iter().next().unwrap())
    }

    #[test]
    fn crud_names() {
        let built = RepositoryContract::build(
            &contract(vec![
                method("create", &[("item", "&User")]),
                method("get_by_id", &[("id", "i64")]),
                method("GetByID", &[("id", "i64")]),
                method("update", &[("item", "&User")]),
                method("delete", &[("id", "i64")]),
                method("list_all", &[]),
            ]),
            &user()
        )
        .unwrap();
        let kinds: Vec<MethodKind> = built.methods.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MethodKind::Create,
                MethodKind::GetById,
                MethodKind::GetById,
                MethodKind::Update,
                MethodKind::Delete,
                MethodKind::List
            ]
        );
        assert_eq!(built.methods[2].fn_name(), "get_by_id");
        assert!(!built.methods[4].has_entity_return);
    }

    #[test]
    fn find_by_fields() {
        let m = build_one(method(
            "find_by_email_and_active",
            &[("email", "&str"), ("active", "bool")]
        ))
        .unwrap();
        assert_eq!(m.kind, MethodKind::FindBy);
        assert_eq!(m.find_by_fields, vec!["Email", "Active"]);
    }

    #[test]
    fn find_by_with_ordering_is_a_smart_query() {
        let m = build_one(method("FindByActiveOrderByEmail", &[("active", "bool")])).unwrap();
        assert_eq!(m.kind, MethodKind::SmartQuery);
        assert!(m.find_by_fields.is_empty());
        assert!(
            m.generated_sql
                .as_deref()
                .is_some_and(|sql| sql.contains("WHERE active = $1 ORDER BY email"))
        );
    }

    #[test]
    fn find_by_unknown_field_stays_find_by() {
        let m = build_one(method("FindByNickname", &[("nickname", "&str")])).unwrap();
        assert_eq!(m.kind, MethodKind::FindBy);
        assert_eq!(m.find_by_fields, vec!["Nickname"]);
    }

    #[test]
    fn smart_query_uses_quoted_table() {
        let m = build_one(method("CountUsersByActive", &[("active", "bool")])).unwrap();
        assert_eq!(m.kind, MethodKind::SmartQuery);
        assert_eq!(
            m.generated_sql.as_deref(),
            Some("SELECT COUNT(*) FROM \"user\" WHERE active = $1")
        );
        assert_eq!(m.fn_name(), "count_users_by_active");
    }

    #[test]
    fn smart_query_selects_entity_columns() {
        let m = build_one(method("list_users_by_active_order_by_username_desc", &[("active", "bool")]))
            .unwrap();
        assert_eq!(
            m.generated_sql.as_deref(),
            Some(
                "SELECT id, username, email, active FROM \"user\" WHERE active = $1 ORDER BY username DESC"
            )
        );
    }

    #[test]
    fn smart_delete_has_no_entity_return() {
        let m = build_one(method("DeleteUsersByActive", &[("active", "bool")])).unwrap();
        assert!(!m.has_entity_return);
    }

    #[test]
    fn custom_sql_wins() {
        let mut raw = method("Frobnicate", &[("n", "i32")]);
        raw.custom_sql = Some("SELECT SUM(x) FROM t WHERE n = $1".to_string());
        raw.scalar_return = Some("f64".to_string());
        let m = build_one(raw).unwrap();
        assert_eq!(m.kind, MethodKind::CustomSql);
        assert_eq!(m.scalar_return_type.map(|t| t.to_string()).as_deref(), Some("f64"));
        assert!(!m.has_entity_return);
    }

    #[test]
    fn blank_custom_sql_is_ignored() {
        let mut raw = method("list", &[]);
        raw.custom_sql = Some("   ".to_string());
        assert_eq!(build_one(raw).unwrap().kind, MethodKind::List);
    }

    #[test]
    fn unresolved_method() {
        assert_eq!(
            build_one(method("Frobnicate", &[])),
            Err(ContractError::UnresolvedMethod {
                method: "Frobnicate".to_string()
            })
        );
    }

    #[test]
    fn infallible_method() {
        let mut raw = method("list", &[]);
        raw.returns_error = false;
        assert!(matches!(
            build_one(raw),
            Err(ContractError::InfallibleMethod { .. })
        ));
    }

    #[test]
    fn invalid_param_type() {
        assert_eq!(
            build_one(method("get", &[("id", "[]int64")])),
            Err(ContractError::InvalidType {
                ty: "[]int64".to_string()
            })
        );
    }

    #[test]
    fn invalid_param_name() {
        assert!(matches!(
            build_one(method("get", &[("fn", "i64")])),
            Err(ContractError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn param_count_mismatch() {
        assert_eq!(
            build_one(method("find_by_email_and_active", &[("email", "&str")])),
            Err(ContractError::ParamCountMismatch {
                method:   "FindByEmailAndActive".to_string(),
                expected: 2,
                found:    1
            })
        );
        assert!(build_one(method("create", &[])).is_err());
        assert!(build_one(method("CountUsersByDeletedAtIsNull", &[])).is_ok());
    }

    #[test]
    fn update_needs_a_non_key_column() {
        let keys_only = Entity::new(
            "Membership",
            vec![
                Field::from_tag("UserID", "i64", "pk"),
                Field::from_tag("TeamID", "i64", "pk"),
            ],
            "models"
        )
        .unwrap();
        let raw = RawContract {
            name:        "MembershipRepository".to_string(),
            entity_name: "Membership".to_string(),
            methods:     vec![method("update", &[("item", "&Membership")])]
        };
        assert!(matches!(
            RepositoryContract::build(&raw, &keys_only),
            Err(ContractError::NothingToUpdate { method, .. }) if method == "Update"
        ));
        assert!(build_one(method("update", &[("item", "&User")])).is_ok());
    }

    #[test]
    fn entity_mismatch() {
        let mut raw = contract(vec![]);
        raw.entity_name = "Order".to_string();
        assert!(matches!(
            RepositoryContract::build(&raw, &user()),
            Err(ContractError::EntityMismatch { .. })
        ));
    }
}
