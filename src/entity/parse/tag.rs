// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tag tokenizer.
//!
//! Splits a raw tag string into [`TagToken`]s. Splitting happens on
//! top-level commas only: commas inside quotes, parentheses, brackets or
//! braces stay part of the segment, so `check:length(a, b) > 0` is one
//! segment.
//!
//! Value tokens that legitimately contain commas (`check:`, `default:`,
//! `enum:`, `fk:`) absorb the segments that follow them until a segment
//! that starts a recognized token:
//!
//! ```text
//! "fk:users,id,on_delete:CASCADE,pk"
//!  └──────── ForeignKey ─────────┘ └ PrimaryKey
//!
//! "enum:draft,published,unique"
//!  └──── Enum ──────────┘ └ Unique
//! ```
//!
//! Tokenizing never fails; segments that match no token become
//! [`TagToken::Unrecognized`].

use super::action::ReferentialAction;

/// One token of a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToken {
    /// `pk`
    PrimaryKey,

    /// `unique`
    Unique,

    /// `-`
    Ignore,

    /// `index`
    Index,

    /// `unique_index`
    UniqueIndex,

    /// `index:<name>`
    NamedIndex(String),

    /// `unique_index:<name>`
    NamedUniqueIndex(String),

    /// `unique:<group>`
    UniqueGroup(String),

    /// `check:<expr>`
    Check(String),

    /// `default:<expr>`
    Default(String),

    /// `enum:<v1>,<v2>,...`
    Enum(Vec<String>),

    /// `fk:[<group>,]<table>,<column>[,on_delete:<a>][,on_update:<a>]`
    ForeignKey(ForeignKeyTag),

    /// `table:<name>`
    Table(String),

    /// Anything else, kept verbatim.
    Unrecognized(String)
}

/// Arguments of an `fk:` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyTag {
    /// Composite group label; `None` for a single-column key.
    pub group:     Option<String>,
    /// Referenced table.
    pub table:     String,
    /// Referenced column.
    pub column:    String,
    /// `on_delete:` action.
    pub on_delete: Option<ReferentialAction>,
    /// `on_update:` action.
    pub on_update: Option<ReferentialAction>
}

/// Prefix of a `key:value` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    UniqueIndex,
    Default,
    UniqueGroup,
    Check,
    Index,
    Table,
    Enum,
    ForeignKey
}

impl Key {
    /// Longest prefix first.
    const ALL: [Self; 8] = [
        Self::UniqueIndex,
        Self::Default,
        Self::UniqueGroup,
        Self::Check,
        Self::Index,
        Self::Table,
        Self::Enum,
        Self::ForeignKey
    ];

    fn prefix(self) -> &'static str {
        match self {
            Self::UniqueIndex => "unique_index:",
            Self::Default => "default:",
            Self::UniqueGroup => "unique:",
            Self::Check => "check:",
            Self::Index => "index:",
            Self::Table => "table:",
            Self::Enum => "enum:",
            Self::ForeignKey => "fk:"
        }
    }

    fn absorbs_commas(self) -> bool {
        matches!(
            self,
            Self::Check | Self::Default | Self::Enum | Self::ForeignKey
        )
    }
}

/// Start of a recognized token.
enum Head<'a> {
    Bare(TagToken),
    Keyed(Key, &'a str)
}

/// Split a raw tag into tokens, left to right.
///
/// # Example
///
/// ```text
/// "pk,check:age >= 0,fk:teams,id"
///   -> [PrimaryKey, Check("age >= 0"), ForeignKey { table: "teams", .. }]
/// ```
#[must_use]
pub fn tokenize(raw: &str) -> Vec<TagToken> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut segments = split_segments(raw).into_iter().peekable();
    let mut tokens = Vec::new();

    while let Some(segment) = segments.next() {
        match head(segment) {
            Some(Head::Bare(token)) => tokens.push(token),
            Some(Head::Keyed(key, value)) => {
                let mut parts = vec![value];
                if key.absorbs_commas() {
                    while let Some(next) = segments.next_if(|s| head(s).is_none()) {
                        parts.push(next);
                    }
                }
                while parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
                    parts.pop();
                }
                tokens.push(keyed(key, &parts));
            }
            None if segment.trim().is_empty() => {}
            None => tokens.push(TagToken::Unrecognized(segment.trim().to_string()))
        }
    }

    tokens
}

/// Split on commas outside quotes and brackets.
fn split_segments(raw: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                segments.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&raw[start..]);

    segments
}

fn head(segment: &str) -> Option<Head<'_>> {
    let segment = segment.trim();
    let bare = match segment {
        "pk" => Some(TagToken::PrimaryKey),
        "unique" => Some(TagToken::Unique),
        "-" => Some(TagToken::Ignore),
        "index" => Some(TagToken::Index),
        "unique_index" => Some(TagToken::UniqueIndex),
        _ => None
    };
    if let Some(token) = bare {
        return Some(Head::Bare(token));
    }

    Key::ALL.iter().find_map(|key| {
        segment
            .strip_prefix(key.prefix())
            .map(|value| Head::Keyed(*key, value))
    })
}

fn keyed(key: Key, parts: &[&str]) -> TagToken {
    let joined = parts.join(",");
    let value = joined.trim();
    let unrecognized = || TagToken::Unrecognized(format!("{}{}", key.prefix(), value));

    if value.is_empty() {
        return unrecognized();
    }

    match key {
        Key::Check => TagToken::Check(value.to_string()),
        Key::Default => TagToken::Default(value.to_string()),
        Key::Index => TagToken::NamedIndex(value.to_string()),
        Key::UniqueIndex => TagToken::NamedUniqueIndex(value.to_string()),
        Key::UniqueGroup => TagToken::UniqueGroup(value.to_string()),
        Key::Table => TagToken::Table(value.to_string()),
        Key::Enum => {
            let values: Vec<String> = parts
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            if values.is_empty() {
                unrecognized()
            } else {
                TagToken::Enum(values)
            }
        }
        Key::ForeignKey => foreign_key(parts).map_or_else(unrecognized, TagToken::ForeignKey)
    }
}

/// Parse `fk:` arguments; the main-argument count picks the shape.
fn foreign_key(parts: &[&str]) -> Option<ForeignKeyTag> {
    let mut main = Vec::new();
    let mut on_delete = None;
    let mut on_update = None;

    for part in parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if let Some(action) = part.strip_prefix("on_delete:") {
            on_delete = Some(ReferentialAction::from_tag(action)?);
        } else if let Some(action) = part.strip_prefix("on_update:") {
            on_update = Some(ReferentialAction::from_tag(action)?);
        } else {
            main.push(part);
        }
    }

    let (group, table, column) = match main.as_slice() {
        [table, column] => (None, *table, *column),
        [group, table, column] => (Some((*group).to_string()), *table, *column),
        _ => return None
    };

    Some(ForeignKeyTag {
        group,
        table: table.to_string(),
        column: column.to_string(),
        on_delete,
        on_update
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn bare_tokens() {
        assert_eq!(
            tokenize("pk, unique,-,index,unique_index"),
            vec![
                TagToken::PrimaryKey,
                TagToken::Unique,
                TagToken::Ignore,
                TagToken::Index,
                TagToken::UniqueIndex
            ]
        );
    }

    #[test]
    fn unique_index_prefix_wins_over_unique() {
        assert_eq!(
            tokenize("unique_index:idx_email"),
            vec![TagToken::NamedUniqueIndex("idx_email".to_string())]
        );
        assert_eq!(
            tokenize("unique:uq_tenant"),
            vec![TagToken::UniqueGroup("uq_tenant".to_string())]
        );
    }

    #[test]
    fn enum_absorbs_following_values() {
        assert_eq!(
            tokenize("enum:pending, shipped ,delivered"),
            vec![TagToken::Enum(vec![
                "pending".to_string(),
                "shipped".to_string(),
                "delivered".to_string()
            ])]
        );
    }

    #[test]
    fn enum_stops_at_next_token() {
        assert_eq!(
            tokenize("enum:a,b,default:'a'"),
            vec![
                TagToken::Enum(vec!["a".to_string(), "b".to_string()]),
                TagToken::Default("'a'".to_string())
            ]
        );
    }

    #[test]
    fn check_keeps_bracketed_commas() {
        assert_eq!(
            tokenize("check:length(first, last) > 0,pk"),
            vec![
                TagToken::Check("length(first, last) > 0".to_string()),
                TagToken::PrimaryKey
            ]
        );
    }

    #[test]
    fn default_keeps_quoted_commas() {
        assert_eq!(
            tokenize("default:'a, b'"),
            vec![TagToken::Default("'a, b'".to_string())]
        );
    }

    #[test]
    fn default_keeps_expression() {
        assert_eq!(
            tokenize("default:extract(epoch from now())"),
            vec![TagToken::Default("extract(epoch from now())".to_string())]
        );
    }

    #[test]
    fn simple_foreign_key() {
        assert_eq!(
            tokenize("fk:users,id,on_delete:CASCADE"),
            vec![TagToken::ForeignKey(ForeignKeyTag {
                group:     None,
                table:     "users".to_string(),
                column:    "id".to_string(),
                on_delete: Some(ReferentialAction::Cascade),
                on_update: None
            })]
        );
    }

    #[test]
    fn composite_foreign_key_member() {
        assert_eq!(
            tokenize("fk:fk_order,order_items,order_id,on_delete:CASCADE,on_update:SET_NULL"),
            vec![TagToken::ForeignKey(ForeignKeyTag {
                group:     Some("fk_order".to_string()),
                table:     "order_items".to_string(),
                column:    "order_id".to_string(),
                on_delete: Some(ReferentialAction::Cascade),
                on_update: Some(ReferentialAction::SetNull)
            })]
        );
    }

    #[test]
    fn foreign_key_followed_by_token() {
        let tokens = tokenize("fk:users,id,pk");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0], TagToken::ForeignKey(ref fk) if fk.group.is_none()));
        assert_eq!(tokens[1], TagToken::PrimaryKey);
    }

    #[test]
    fn malformed_foreign_keys_are_unrecognized() {
        assert!(matches!(
            tokenize("fk:users").as_slice(),
            [TagToken::Unrecognized(_)]
        ));
        assert!(matches!(
            tokenize("fk:a,b,c,d").as_slice(),
            [TagToken::Unrecognized(_)]
        ));
        assert!(matches!(
            tokenize("fk:users,id,on_delete:EXPLODE").as_slice(),
            [TagToken::Unrecognized(_)]
        ));
    }

    #[test]
    fn unknown_tokens_are_kept() {
        assert_eq!(
            tokenize("pk,primary"),
            vec![
                TagToken::PrimaryKey,
                TagToken::Unrecognized("primary".to_string())
            ]
        );
    }

    #[test]
    fn empty_values_are_unrecognized() {
        assert_eq!(
            tokenize("table:"),
            vec![TagToken::Unrecognized("table:".to_string())]
        );
    }

    #[test]
    fn trailing_comma_is_ignored() {
        assert_eq!(
            tokenize("check:age > 0,"),
            vec![TagToken::Check("age > 0".to_string())]
        );
    }
}
