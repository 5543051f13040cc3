//! Scope module for hierarchical, permission-aware scope matching.
//!
//! This module provides:
//! - Parsing and canonical formatting of scope items (`user/emails+rw`)
//! - Ancestor matching on path segments (`user` grants `user/emails`)
//! - Permission accumulation across several matching ancestors
//! - Containment comparison between whole collections
//! - A thread-safe memoising resolver for repeated queries

mod config;
mod input;
mod resolver;
mod set;
mod types;

pub use config::ScopeConfig;
pub use input::ScopeInput;
pub use resolver::{CacheStats, ScopeResolver};
pub use set::{Coverage, ScopeOrdering, ScopeSet};
pub use types::{Permissions, ScopeItem};
