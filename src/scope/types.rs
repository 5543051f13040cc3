//! Scope items and permission sets

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::config::ScopeConfig;
use crate::error::{Result, ScopeError};

/// A set of single-character permission flags
///
/// Flags are kept sorted, so iteration and formatting are deterministic
/// regardless of the order they were written in. Duplicates collapse.
///
/// # Examples
///
/// ```
/// use scopelist::Permissions;
///
/// let perms = Permissions::from_flags("wrw");
/// assert_eq!(perms.len(), 2);
/// assert_eq!(perms.to_string(), "rw");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Permissions(BTreeSet<char>);

impl Permissions {
    /// Builds a permission set from a flag string, one flag per character
    pub fn from_flags(flags: &str) -> Self {
        Self(flags.chars().collect())
    }

    /// An empty permission set
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, flag: char) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Flags present in `self` but absent from `other`
    pub fn difference(&self, other: &Permissions) -> Permissions {
        Self(self.0.difference(&other.0).copied().collect())
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in &self.0 {
            write!(f, "{}", flag)?;
        }
        Ok(())
    }
}

impl FromIterator<char> for Permissions {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&str> for Permissions {
    fn from(flags: &str) -> Self {
        Self::from_flags(flags)
    }
}

impl From<String> for Permissions {
    fn from(flags: String) -> Self {
        Self::from_flags(&flags)
    }
}

impl From<Permissions> for String {
    fn from(perms: Permissions) -> Self {
        perms.to_string()
    }
}

/// A hierarchical path plus the permissions granted or required on it
///
/// Written as `user/emails+rw` with the default separators: the path
/// `["user", "emails"]` and the permission flags `r` and `w`. Items are
/// immutable; matching produces new items rather than editing old ones.
///
/// # Examples
///
/// ```
/// use scopelist::{ScopeConfig, ScopeItem};
///
/// let config = ScopeConfig::default();
/// let parent = ScopeItem::parse("user+rw", &config);
/// let child = ScopeItem::parse("user/emails+w", &config);
///
/// assert!(parent.is_ancestor_of(&child));
/// assert!(parent.grants(&child));
/// assert!(!child.grants(&parent));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScopeItem")]
pub struct ScopeItem {
    path: Vec<String>,
    permissions: Permissions,
}

/// Unchecked wire form of a [`ScopeItem`]
#[derive(Deserialize)]
struct RawScopeItem {
    path: Vec<String>,
    permissions: Permissions,
}

impl TryFrom<RawScopeItem> for ScopeItem {
    type Error = ScopeError;

    fn try_from(raw: RawScopeItem) -> Result<Self> {
        ScopeItem::new(raw.path, raw.permissions)
    }
}

impl ScopeItem {
    /// Builds an item from path segments and permissions
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::EmptyPath` if `path` has no segments. A
    /// segment-less path would be an ancestor of every item.
    pub fn new<S: Into<String>>(
        path: impl IntoIterator<Item = S>,
        permissions: impl Into<Permissions>,
    ) -> Result<Self> {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();

        if path.is_empty() {
            return Err(ScopeError::EmptyPath);
        }

        Ok(Self {
            path,
            permissions: permissions.into(),
        })
    }

    /// Parses a scope string
    ///
    /// The string is split on the first permission separator. The left part
    /// is split on the child separator to form the path; the right part
    /// supplies the permission flags. A missing or empty suffix falls back
    /// to the configured default permissions.
    ///
    /// Every string parses. An empty path part yields the single empty
    /// segment `[""]`.
    pub fn parse(raw: &str, config: &ScopeConfig) -> Self {
        let (path_part, flags) = match raw.split_once(config.permission_separator.as_str()) {
            Some((path, flags)) if !flags.is_empty() => (path, flags),
            Some((path, _)) => (path, config.default_permissions.as_str()),
            None => (raw, config.default_permissions.as_str()),
        };

        Self {
            path: path_part
                .split(config.child_separator.as_str())
                .map(str::to_string)
                .collect(),
            permissions: Permissions::from_flags(flags),
        }
    }

    /// Formats the item back into its canonical string
    ///
    /// The permission suffix is omitted when the permissions equal the
    /// configured default set; otherwise flags are written in sorted order.
    pub fn format(&self, config: &ScopeConfig) -> String {
        let path = self.path.join(config.child_separator.as_str());

        if self.permissions == Permissions::from_flags(&config.default_permissions) {
            return path;
        }

        format!("{}{}{}", path, config.permission_separator, self.permissions)
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    /// Number of path segments
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Returns whether this item's path is a segment-wise prefix of `other`'s
    ///
    /// Permissions are ignored. Every item is its own ancestor.
    pub fn is_ancestor_of(&self, other: &ScopeItem) -> bool {
        other.path.starts_with(&self.path)
    }

    /// Permissions `other` requires that this item does not provide
    pub fn missing_permissions(&self, other: &ScopeItem) -> Permissions {
        other.permissions.difference(&self.permissions)
    }

    /// Returns whether this item alone authorizes `other`
    pub fn grants(&self, other: &ScopeItem) -> bool {
        self.is_ancestor_of(other) && self.missing_permissions(other).is_empty()
    }

    /// A new item on the same path with a different permission set
    pub fn with_permissions(&self, permissions: Permissions) -> ScopeItem {
        Self {
            path: self.path.clone(),
            permissions,
        }
    }
}

impl fmt::Display for ScopeItem {
    /// Formats with the default separators
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&ScopeConfig::default()))
    }
}

impl FromStr for ScopeItem {
    type Err = Infallible;

    /// Parses with the default separators
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s, &ScopeConfig::default()))
    }
}
