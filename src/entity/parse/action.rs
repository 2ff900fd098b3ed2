// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Referential actions for foreign keys.
//!
//! Tags spell actions with underscores (`on_delete:SET_NULL`); SQL spells
//! them with spaces (`ON DELETE SET NULL`).

/// Action taken on child rows when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferentialAction {
    /// Delete/update child rows along with the parent.
    Cascade,

    /// Set the foreign key to NULL.
    SetNull,

    /// Set the foreign key to its default value.
    SetDefault,

    /// Reject the change if children exist.
    Restrict,

    /// Reject the change at the end of the statement if children exist.
    NoAction
}

impl ReferentialAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cascade,
        Self::SetNull,
        Self::SetDefault,
        Self::Restrict,
        Self::NoAction
    ];

    /// Parse an action from its tag spelling.
    ///
    /// Case-insensitive; underscores and spaces are interchangeable.
    /// Returns `None` for unrecognized values.
    #[must_use]
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "").as_str() {
            "cascade" => Some(Self::Cascade),
            "setnull" => Some(Self::SetNull),
            "setdefault" => Some(Self::SetDefault),
            "restrict" => Some(Self::Restrict),
            "noaction" => Some(Self::NoAction),
            _ => None
        }
    }

    /// Tag spelling, with underscores.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET_NULL",
            Self::SetDefault => "SET_DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO_ACTION"
        }
    }

    /// SQL spelling, with spaces.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_accepts_both_spellings() {
        assert_eq!(
            ReferentialAction::from_tag("CASCADE"),
            Some(ReferentialAction::Cascade)
        );
        assert_eq!(
            ReferentialAction::from_tag("SET_NULL"),
            Some(ReferentialAction::SetNull)
        );
        assert_eq!(
            ReferentialAction::from_tag("set null"),
            Some(ReferentialAction::SetNull)
        );
        assert_eq!(
            ReferentialAction::from_tag("no_action"),
            Some(ReferentialAction::NoAction)
        );
        assert_eq!(ReferentialAction::from_tag("explode"), None);
    }

    #[test]
    fn tag_and_sql_spellings() {
        assert_eq!(ReferentialAction::SetDefault.as_tag(), "SET_DEFAULT");
        assert_eq!(ReferentialAction::SetDefault.as_sql(), "SET DEFAULT");
        assert_eq!(ReferentialAction::Restrict.as_sql(), "RESTRICT");
    }

    #[test]
    fn tag_spelling_parses_back() {
        for action in ReferentialAction::ALL {
            assert_eq!(ReferentialAction::from_tag(action.as_tag()), Some(action));
        }
    }
}
