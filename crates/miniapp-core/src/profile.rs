//! User-editable profile record.
//!
//! A [`ProfileRecord`] is stored per [`UserKey`] under
//! [`storage_key`]`(key)`, i.e. `profile_<key>`. Hobbies and interests are
//! [`TagSet`]s: ordered, duplicate-free and capped at [`MAX_TAGS`] entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::SessionUser;

/// Maximum number of entries in a [`TagSet`].
pub const MAX_TAGS: usize = 5;

/// Identity a profile is stored under.
///
/// Users launched without a host-supplied identifier all share
/// [`UserKey::Guest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKey {
    /// Host-assigned numeric user id.
    Id(u64),
    /// No identifier available.
    Guest,
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Guest => f.write_str("guest"),
        }
    }
}

/// Local storage key for a user's profile.
pub fn storage_key(key: &UserKey) -> String {
    format!("profile_{key}")
}

/// Outcome of [`TagSet::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagInsert {
    /// Tag was appended.
    Added,
    /// Tag already present; set unchanged.
    Duplicate,
    /// Set already holds [`MAX_TAGS`] entries; set unchanged.
    Full,
    /// Tag was blank after trimming; set unchanged.
    Empty,
}

/// Ordered set of up to [`MAX_TAGS`] unique strings.
///
/// Comparison is case-sensitive. Tags are trimmed on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list, keeping the first [`MAX_TAGS`] unique
    /// entries.
    pub fn from_comma_list(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Append `tag` unless it is blank, already present or the set is full.
    pub fn insert(&mut self, tag: &str) -> TagInsert {
        let tag = tag.trim();
        if tag.is_empty() {
            return TagInsert::Empty;
        }
        if self.contains(tag) {
            return TagInsert::Duplicate;
        }
        if self.is_full() {
            return TagInsert::Full;
        }
        self.tags.push(tag.to_string());
        TagInsert::Added
    }

    /// Remove `tag`. Returns true if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Remove and return the most recently added tag.
    pub fn pop(&mut self) -> Option<String> {
        self.tags.pop()
    }

    /// True if `tag` is in the set.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// True once the set holds [`MAX_TAGS`] tags.
    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_TAGS
    }

    /// Tags joined with `", "`.
    pub fn joined(&self) -> String {
        self.tags.join(", ")
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for tag in iter {
            let _ = set.insert(tag);
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.iter().map(String::as_str).collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

/// Profile fields persisted per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Free-text profession.
    pub profession: String,
    /// Up to five hobbies.
    pub hobbies: TagSet,
    /// Up to five interests.
    pub interests: TagSet,
    /// Free-text self description.
    pub about: String,
}

impl ProfileRecord {
    /// Empty record with the name fields taken from the host user.
    pub fn prefilled(user: &SessionUser) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Uppercased first letters of first and last name, or `?`.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() { "?".to_string() } else { initials }
    }
}
