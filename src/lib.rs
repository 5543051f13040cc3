//! # Scope lists (scopelist)
//!
//! Hierarchical authorization scopes with support for:
//! - OAuth-style scope strings such as `user/emails+rw`
//! - Parent scopes granting all of their descendants
//! - Permissions accumulated across several granted ancestors
//! - Configurable child, permission, and item separators
//! - Subset and superset comparison of whole scope collections
//!
//! ## Example
//!
//! ```rust
//! use scopelist::{ScopeConfig, ScopeSet};
//!
//! # fn example() -> scopelist::Result<()> {
//! let granted = ScopeSet::from_string("user+w user/emails", ScopeConfig::default())?;
//!
//! assert!(granted.contains("user/emails+rw"));
//! assert!(!granted.contains("user/repo+rw"));
//!
//! let requested = ScopeSet::new(["user/emails", "user/repo+w"], ScopeConfig::default())?;
//! assert!(granted >= requested);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod scope;

pub use error::{Result, ScopeError};
pub use scope::{
    CacheStats, Coverage, Permissions, ScopeConfig, ScopeInput, ScopeItem, ScopeOrdering,
    ScopeResolver, ScopeSet,
};
