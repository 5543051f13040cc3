//! Ordered scope collections and containment queries

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

use super::config::ScopeConfig;
use super::input::ScopeInput;
use super::types::{Permissions, ScopeItem};
use crate::error::Result;

/// Result of comparing two collections by containment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOrdering {
    /// Each collection contains every item of the other
    Equal,
    /// Every item of the other collection is contained, but not vice versa
    Superset,
    /// Every item of this collection is contained in the other, but not vice versa
    Subset,
    Incomparable,
}

/// Outcome of a containment query, with the items that took part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    granted: bool,
    contributors: Vec<usize>,
    unmet: Permissions,
}

impl Coverage {
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Indices of the ancestor items that supplied at least one required
    /// permission, or that closed the query, in scan order
    pub fn contributors(&self) -> &[usize] {
        &self.contributors
    }

    /// Permissions no ancestor provided; empty when granted
    pub fn unmet(&self) -> &Permissions {
        &self.unmet
    }
}

/// An ordered, immutable collection of granted scope items
///
/// Order and duplicates are kept as given. A candidate is contained when
/// the ancestors of its path in the collection jointly grant all of its
/// required permissions; no single ancestor has to grant everything.
///
/// # Examples
///
/// ```
/// use scopelist::{ScopeConfig, ScopeSet};
///
/// let granted = ScopeSet::new(["user+w", "user/emails+r"], ScopeConfig::default()).unwrap();
///
/// assert!(granted.contains("user/emails+rw"));
/// assert!(!granted.contains("user/repo+rw"));
/// assert!(granted.contains(["user/emails", "user/repo+w"]));
/// ```
#[derive(Debug, Clone)]
pub struct ScopeSet {
    items: Vec<ScopeItem>,
    config: ScopeConfig,
}

impl ScopeSet {
    /// Builds a collection from strings or parsed items
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::EmptySeparator` for an invalid configuration and
    /// `ScopeError::TypeMismatch` if an element is a nested sequence.
    pub fn new<I, T>(items: I, config: ScopeConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ScopeInput>,
    {
        config.validate()?;

        let items = items
            .into_iter()
            .map(|input| input.into().into_item(&config))
            .collect::<Result<Vec<_>>>()?;

        debug!(items = items.len(), "built scope set");

        Ok(Self { items, config })
    }

    /// Builds a collection from a single string of items
    ///
    /// The string is split on the configured item separator; empty
    /// fragments are skipped.
    ///
    /// ```
    /// use scopelist::{ScopeConfig, ScopeSet};
    ///
    /// let set = ScopeSet::from_string("user/emails+r   user/emails+n", ScopeConfig::default()).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.to_string(), "user/emails user/emails+n");
    /// ```
    pub fn from_string(s: &str, config: ScopeConfig) -> Result<Self> {
        config.validate()?;

        let items: Vec<&str> = s
            .split(config.item_separator.as_str())
            .filter(|item| !item.is_empty())
            .collect();

        Self::new(items, config)
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopeItem> {
        self.items.iter()
    }

    /// The parsed item at `index`
    pub fn item(&self, index: usize) -> Option<&ScopeItem> {
        self.items.get(index)
    }

    /// The canonical string of the item at `index`
    pub fn get(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| item.format(&self.config))
    }

    /// Canonical strings for every item, in order
    pub fn formatted(&self) -> impl Iterator<Item = String> + '_ {
        self.items.iter().map(|item| item.format(&self.config))
    }

    /// Parses a string with this collection's configuration
    pub fn parse_item(&self, raw: &str) -> ScopeItem {
        ScopeItem::parse(raw, &self.config)
    }

    /// Checks a candidate against the collection and reports how
    ///
    /// Ancestors are scanned in stored order. Each one removes the
    /// permissions it provides from the remaining requirement, and the scan
    /// stops as soon as nothing is left.
    pub fn explain(&self, candidate: &ScopeItem) -> Coverage {
        let mut remaining = candidate.clone();
        let mut contributors = Vec::new();

        for (index, granted) in self.items.iter().enumerate() {
            if !granted.is_ancestor_of(&remaining) {
                continue;
            }

            let unmet = granted.missing_permissions(&remaining);
            if unmet.is_empty() || unmet.len() < remaining.permissions().len() {
                contributors.push(index);
            }

            trace!(index, unmet = %unmet, "ancestor scope matched");

            if unmet.is_empty() {
                return Coverage {
                    granted: true,
                    contributors,
                    unmet,
                };
            }

            remaining = remaining.with_permissions(unmet);
        }

        Coverage {
            granted: false,
            contributors,
            unmet: remaining.permissions().clone(),
        }
    }

    /// Returns whether the collection authorizes a parsed item
    pub fn contains_item(&self, candidate: &ScopeItem) -> bool {
        self.explain(candidate).is_granted()
    }

    /// Returns whether the collection authorizes the candidate
    ///
    /// Strings are parsed with this collection's configuration. For a
    /// sequence, every element must be authorized on its own.
    pub fn contains(&self, candidate: impl Into<ScopeInput>) -> bool {
        match candidate.into() {
            ScopeInput::Str(raw) => self.contains_item(&self.parse_item(&raw)),
            ScopeInput::Item(item) => self.contains_item(&item),
            ScopeInput::Sequence(candidates) => {
                candidates.into_iter().all(|candidate| self.contains(candidate))
            }
        }
    }

    /// Returns whether every candidate is authorized
    ///
    /// An empty iterator is trivially authorized.
    pub fn contains_all<T>(&self, candidates: impl IntoIterator<Item = T>) -> bool
    where
        T: Into<ScopeInput>,
    {
        candidates.into_iter().all(|candidate| self.contains(candidate))
    }

    /// Returns whether every item of `other` is contained in this collection
    ///
    /// Lengths play no part: `["foo"]` is a superset of `["foo/bar", "foo/baz"]`.
    pub fn is_superset(&self, other: &ScopeSet) -> bool {
        other.items.iter().all(|item| self.contains_item(item))
    }

    /// Returns whether every item of this collection is contained in `other`
    pub fn is_subset(&self, other: &ScopeSet) -> bool {
        other.is_superset(self)
    }

    pub fn compare(&self, other: &ScopeSet) -> ScopeOrdering {
        match (self.is_superset(other), self.is_subset(other)) {
            (true, true) => ScopeOrdering::Equal,
            (true, false) => ScopeOrdering::Superset,
            (false, true) => ScopeOrdering::Subset,
            (false, false) => ScopeOrdering::Incomparable,
        }
    }
}

impl PartialEq for ScopeSet {
    /// Two collections are equal when each contains the other
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == ScopeOrdering::Equal
    }
}

impl PartialOrd for ScopeSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare(other) {
            ScopeOrdering::Equal => Some(Ordering::Equal),
            ScopeOrdering::Superset => Some(Ordering::Greater),
            ScopeOrdering::Subset => Some(Ordering::Less),
            ScopeOrdering::Incomparable => None,
        }
    }

    fn ge(&self, other: &Self) -> bool {
        self.is_superset(other)
    }

    fn le(&self, other: &Self) -> bool {
        self.is_subset(other)
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted: Vec<String> = self.formatted().collect();
        f.write_str(&formatted.join(self.config.item_separator.as_str()))
    }
}

impl Serialize for ScopeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.formatted())
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a ScopeItem;
    type IntoIter = std::slice::Iter<'a, ScopeItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<&ScopeSet> for ScopeInput {
    fn from(set: &ScopeSet) -> Self {
        ScopeInput::Sequence(set.items.iter().map(ScopeInput::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;

    fn set(items: &[&str]) -> ScopeSet {
        ScopeSet::new(items.iter().copied(), ScopeConfig::default()).unwrap()
    }

    #[test]
    fn test_new_preserves_order_and_duplicates() {
        let scopes = set(&["user/repo+w", "user", "user"]);
        assert_eq!(scopes.len(), 3);
        assert_eq!(scopes.get(0).as_deref(), Some("user/repo+w"));
        assert_eq!(scopes.get(2).as_deref(), Some("user"));
        assert_eq!(scopes.get(3), None);
    }

    #[test]
    fn test_new_rejects_nested_sequence() {
        let inputs = vec![ScopeInput::from("user"), ScopeInput::from(["a", "b"])];
        let result = ScopeSet::new(inputs, ScopeConfig::default());
        assert!(matches!(result, Err(ScopeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = ScopeSet::new(["user"], ScopeConfig::default().with_child_separator(""));
        assert!(matches!(result, Err(ScopeError::EmptySeparator { .. })));
    }

    #[test]
    fn test_from_string_custom_separator() {
        let config = ScopeConfig::default().with_item_separator(":");
        let scopes = ScopeSet::from_string("user/emails+r:user/emails+n", config).unwrap();
        let formatted: Vec<String> = scopes.formatted().collect();
        assert_eq!(formatted, vec!["user/emails", "user/emails+n"]);
        assert_eq!(scopes.to_string(), "user/emails:user/emails+n");
    }

    #[test]
    fn test_explain_reports_contributors() {
        let scopes = set(&["other", "user+w", "user/emails+r", "user/emails+rw"]);
        let candidate = scopes.parse_item("user/emails+rw");

        let coverage = scopes.explain(&candidate);
        assert!(coverage.is_granted());
        assert_eq!(coverage.contributors(), &[1, 2]);
        assert!(coverage.unmet().is_empty());
    }

    #[test]
    fn test_explain_reports_unmet() {
        let scopes = set(&["user+w", "user/emails"]);
        let candidate = scopes.parse_item("user/emails+rwx");

        let coverage = scopes.explain(&candidate);
        assert!(!coverage.is_granted());
        assert_eq!(coverage.contributors(), &[0, 1]);
        assert_eq!(coverage.unmet().to_string(), "x");
    }

    #[test]
    fn test_explain_without_ancestors() {
        let scopes = set(&["repo"]);
        let coverage = scopes.explain(&scopes.parse_item("user+r"));
        assert!(!coverage.is_granted());
        assert!(coverage.contributors().is_empty());
        assert_eq!(coverage.unmet().to_string(), "r");
    }

    #[test]
    fn test_empty_candidate_permissions_need_an_ancestor() {
        let scopes = set(&["user"]);
        assert!(scopes.contains(ScopeItem::new(["user", "emails"], Permissions::none()).unwrap()));
        assert!(!scopes.contains(ScopeItem::new(["repo"], Permissions::none()).unwrap()));
    }

    #[test]
    fn test_contains_all() {
        let scopes = set(&["foo", "bar+w"]);

        assert!(scopes.contains_all(["foo/a", "foo/b"]));
        assert!(scopes.contains_all(vec!["foo".to_string(), "bar/x+w".to_string()]));
        assert!(!scopes.contains_all(["foo/a", "bar/x"]));
        assert!(scopes.contains_all(Vec::<&str>::new()));

        let items = vec![scopes.parse_item("foo/c"), scopes.parse_item("bar+w")];
        assert!(scopes.contains_all(&items));
    }

    #[test]
    fn test_contains_other_set_as_sequence() {
        let granted = set(&["foo"]);
        let requested = set(&["foo/bar", "foo/baz"]);
        assert!(granted.contains(&requested));
        assert!(!requested.contains(&granted));
    }

    #[test]
    fn test_compare() {
        let wide = set(&["foo"]);
        let narrow = set(&["foo/bar", "foo/baz"]);
        let other = set(&["bar"]);

        assert_eq!(wide.compare(&narrow), ScopeOrdering::Superset);
        assert_eq!(narrow.compare(&wide), ScopeOrdering::Subset);
        assert_eq!(wide.compare(&other), ScopeOrdering::Incomparable);
        assert_eq!(wide.compare(&set(&["foo+r", "foo/bar"])), ScopeOrdering::Equal);
    }

    #[test]
    fn test_operators() {
        let wide = set(&["foo"]);
        let narrow = set(&["foo/bar", "foo/baz"]);

        assert!(wide >= narrow);
        assert!(wide > narrow);
        assert!(narrow <= wide);
        assert!(!(narrow >= wide));
        assert!(wide != narrow);
        assert_eq!(wide, set(&["foo", "foo/bar"]));
    }

    #[test]
    fn test_empty_sets() {
        let empty = set(&[]);
        assert!(empty.is_empty());
        assert!(!empty.contains("user"));
        assert!(set(&["user"]) >= empty);
        assert!(empty <= set(&["user"]));
        assert_eq!(empty, set(&[]));
    }

    #[test]
    fn test_serialize_as_strings() {
        let scopes = set(&["user/emails+r", "user/repo+aaaaa"]);
        let json = serde_json::to_string(&scopes).unwrap();
        assert_eq!(json, r#"["user/emails","user/repo+a"]"#);
    }

    #[test]
    fn test_iteration() {
        let scopes = set(&["user", "repo+w"]);
        let depths: Vec<usize> = scopes.iter().map(ScopeItem::depth).collect();
        assert_eq!(depths, vec![1, 1]);

        let mut count = 0;
        for item in &scopes {
            assert!(!item.permissions().is_empty());
            count += 1;
        }
        assert_eq!(count, 2);
        assert_eq!(scopes.item(1).map(|i| i.permissions().to_string()), Some("w".to_string()));
    }
}
