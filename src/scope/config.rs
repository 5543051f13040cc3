//! Separator and default-permission configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopeError};

/// Configuration shared by item parsing, formatting, and collections
///
/// All fields are optional when deserialized; missing fields take the
/// values from [`ScopeConfig::default`].
///
/// # Examples
///
/// ```
/// use scopelist::ScopeConfig;
///
/// let config = ScopeConfig::default().with_child_separator(":");
/// assert_eq!(config.child_separator, ":");
/// assert_eq!(config.permission_separator, "+");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Splits a path into hierarchy levels
    pub child_separator: String,

    /// Splits the path from its permission-flag suffix
    pub permission_separator: String,

    /// Permissions assumed when an item carries no suffix
    pub default_permissions: String,

    /// Splits a whole-collection string into item strings
    pub item_separator: String,

    /// Maximum number of memoised decisions held by a resolver
    pub max_cache_size: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            child_separator: "/".to_string(),
            permission_separator: "+".to_string(),
            default_permissions: "r".to_string(),
            item_separator: " ".to_string(),
            max_cache_size: 10_000,
        }
    }
}

impl ScopeConfig {
    /// Sets the child separator
    pub fn with_child_separator(mut self, sep: impl Into<String>) -> Self {
        self.child_separator = sep.into();
        self
    }

    /// Sets the permission separator
    pub fn with_permission_separator(mut self, sep: impl Into<String>) -> Self {
        self.permission_separator = sep.into();
        self
    }

    /// Sets the permissions assumed for unsuffixed items
    pub fn with_default_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_permissions = permissions.into();
        self
    }

    /// Sets the separator used by whole-collection strings
    pub fn with_item_separator(mut self, sep: impl Into<String>) -> Self {
        self.item_separator = sep.into();
        self
    }

    /// Sets the resolver cache bound
    pub fn with_max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    /// Loads a configuration from a JSON document and validates it
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::InvalidConfig` if the document is malformed and
    /// `ScopeError::EmptySeparator` if a separator is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScopeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every separator is non-empty
    ///
    /// The default permission string may be empty, in which case items
    /// without a suffix grant nothing.
    pub fn validate(&self) -> Result<()> {
        let separators = [
            ("child_separator", &self.child_separator),
            ("permission_separator", &self.permission_separator),
            ("item_separator", &self.item_separator),
        ];

        for (name, sep) in separators {
            if sep.is_empty() {
                return Err(ScopeError::EmptySeparator { name });
            }
        }

        Ok(())
    }
}
