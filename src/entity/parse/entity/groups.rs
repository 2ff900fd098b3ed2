// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Unique, foreign key and index grouping.
//!
//! Fields that share a group name form one multi-column constraint. A
//! unique or foreign key group needs at least two members; a group with a
//! single member is reported as [`GroupOutcome::Dropped`] and produces no
//! constraint at all, neither a multi-column one nor an inline one on the
//! lone member. Index groups have no minimum size.

use super::def::Entity;
use crate::entity::parse::Field;

/// Result of grouping fields under one group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome<'a> {
    /// Two or more members, rendered as one constraint.
    Rendered {
        /// Group name.
        name:    &'a str,
        /// Members in declaration order.
        members: Vec<&'a Field>
    },

    /// A single member. Nothing is rendered for it.
    Dropped {
        /// Group name.
        name:   &'a str,
        /// The lone member.
        member: &'a Field
    }
}

impl<'a> GroupOutcome<'a> {
    /// Group name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Rendered { name, .. } | Self::Dropped { name, .. } => name
        }
    }

    /// Members, if the group is rendered.
    #[must_use]
    pub fn rendered(&self) -> Option<&[&'a Field]> {
        match self {
            Self::Rendered { members, .. } => Some(members),
            Self::Dropped { .. } => None
        }
    }
}

/// One unique constraint of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint<'a> {
    /// Column name for single-column constraints, group name otherwise.
    pub name:    String,
    /// Members in declaration order.
    pub members: Vec<&'a Field>,
    /// Whether the constraint comes from a `unique:<group>` group.
    pub grouped: bool
}

/// Fields sharing one index name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup<'a> {
    /// Index name.
    pub name:    &'a str,
    /// Uniqueness, taken from the first member.
    pub unique:  bool,
    /// Members in declaration order.
    pub members: Vec<&'a Field>
}

impl Entity {
    /// Unique groups declared with `unique:<group>`.
    #[must_use]
    pub fn unique_groups(&self) -> Vec<GroupOutcome<'_>> {
        outcomes(collect_groups(&self.generable_fields(), |f| {
            f.constraint.unique_group.as_deref()
        }))
    }

    /// Composite foreign keys declared with `fk:<group>,<table>,<column>`.
    #[must_use]
    pub fn foreign_key_groups(&self) -> Vec<GroupOutcome<'_>> {
        outcomes(collect_groups(&self.generable_fields(), |f| {
            f.constraint
                .fk_reference
                .as_ref()
                .and(f.constraint.fk_group.as_deref())
        }))
    }

    /// Every unique constraint, in order of first appearance.
    ///
    /// Ungrouped unique fields are keyed by their column name. Groups are
    /// included only when rendered; a dropped group contributes nothing.
    #[must_use]
    pub fn unique_constraints(&self) -> Vec<UniqueConstraint<'_>> {
        let groups = self.unique_groups();
        let mut constraints = Vec::new();

        for field in self.generable_fields() {
            let constraint = &field.constraint;
            match constraint.unique_group.as_deref() {
                None if constraint.is_unique => constraints.push(UniqueConstraint {
                    name:    field.column_name(),
                    members: vec![field],
                    grouped: false
                }),
                None => {}
                Some(group) => {
                    let rendered = groups
                        .iter()
                        .find(|g| g.name() == group)
                        .and_then(GroupOutcome::rendered);
                    if let Some(members) = rendered
                        && members.first().is_some_and(|m| std::ptr::eq(*m, field))
                    {
                        constraints.push(UniqueConstraint {
                            name:    group.to_string(),
                            members: members.to_vec(),
                            grouped: true
                        });
                    }
                }
            }
        }

        constraints
    }

    /// Indexes, one per distinct index name.
    #[must_use]
    pub fn index_groups(&self) -> Vec<IndexGroup<'_>> {
        collect_groups(&self.generable_fields(), |f| f.constraint.index_name.as_deref())
            .into_iter()
            .map(|(name, members)| IndexGroup {
                name,
                unique: members
                    .first()
                    .is_some_and(|f| f.constraint.index_is_unique),
                members
            })
            .collect()
    }
}

/// Group fields by a key, keeping first-appearance order.
fn collect_groups<'a>(
    fields: &[&'a Field],
    key: impl Fn(&'a Field) -> Option<&'a str>
) -> Vec<(&'a str, Vec<&'a Field>)> {
    let mut groups: Vec<(&'a str, Vec<&'a Field>)> = Vec::new();

    for field in fields.iter().copied() {
        let Some(name) = key(field).filter(|n| !n.is_empty()) else {
            continue;
        };
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, members)) => members.push(field),
            None => groups.push((name, vec![field]))
        }
    }

    groups
}

fn outcomes<'a>(groups: Vec<(&'a str, Vec<&'a Field>)>) -> Vec<GroupOutcome<'a>> {
    groups
        .into_iter()
        .map(|(name, members)| {
            if members.len() == 1 {
                GroupOutcome::Dropped {
                    name,
                    member: members[0]
                }
            } else {
                GroupOutcome::Rendered { name, members }
            }
        })
        .collect()
}
