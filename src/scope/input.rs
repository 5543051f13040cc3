//! Accepted shapes for scope arguments

use serde_json::Value;

use super::config::ScopeConfig;
use super::types::ScopeItem;
use crate::error::{Result, ScopeError};

/// Anything a scope query or constructor accepts
///
/// Raw strings are parsed with the receiving collection's configuration.
/// A `Sequence` is only meaningful as a query, where every element must be
/// authorized; a collection cannot be built from nested sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeInput {
    Str(String),
    Item(ScopeItem),
    Sequence(Vec<ScopeInput>),
}

impl ScopeInput {
    /// Resolves a single-item input into a parsed item
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::TypeMismatch` for a `Sequence`.
    pub fn into_item(self, config: &ScopeConfig) -> Result<ScopeItem> {
        match self {
            ScopeInput::Str(raw) => Ok(ScopeItem::parse(&raw, config)),
            ScopeInput::Item(item) => Ok(item),
            ScopeInput::Sequence(seq) => Err(ScopeError::TypeMismatch {
                found: format!("sequence of {} elements", seq.len()),
            }),
        }
    }
}

impl From<&str> for ScopeInput {
    fn from(raw: &str) -> Self {
        ScopeInput::Str(raw.to_string())
    }
}

impl From<String> for ScopeInput {
    fn from(raw: String) -> Self {
        ScopeInput::Str(raw)
    }
}

impl From<&String> for ScopeInput {
    fn from(raw: &String) -> Self {
        ScopeInput::Str(raw.clone())
    }
}

impl From<ScopeItem> for ScopeInput {
    fn from(item: ScopeItem) -> Self {
        ScopeInput::Item(item)
    }
}

impl From<&ScopeItem> for ScopeInput {
    fn from(item: &ScopeItem) -> Self {
        ScopeInput::Item(item.clone())
    }
}

impl<T: Into<ScopeInput>> From<Vec<T>> for ScopeInput {
    fn from(items: Vec<T>) -> Self {
        ScopeInput::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ScopeInput>, const N: usize> From<[T; N]> for ScopeInput {
    fn from(items: [T; N]) -> Self {
        ScopeInput::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for ScopeInput {
    type Error = ScopeError;

    /// Accepts a string, an array of accepted values, or an item object
    /// `{"path": [...], "permissions": "..."}`
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(raw) => Ok(ScopeInput::Str(raw)),
            Value::Array(values) => values
                .into_iter()
                .map(ScopeInput::try_from)
                .collect::<Result<Vec<_>>>()
                .map(ScopeInput::Sequence),
            object @ Value::Object(_) => {
                let found = object.to_string();
                serde_json::from_value::<ScopeItem>(object)
                    .map(ScopeInput::Item)
                    .map_err(|_| ScopeError::TypeMismatch { found })
            }
            other => Err(ScopeError::TypeMismatch {
                found: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_conversions() {
        assert_eq!(ScopeInput::from("user"), ScopeInput::Str("user".to_string()));

        let seq = ScopeInput::from(vec!["a", "b"]);
        assert!(matches!(seq, ScopeInput::Sequence(ref v) if v.len() == 2));
    }

    #[test]
    fn test_into_item() {
        let config = ScopeConfig::default();
        let item = ScopeInput::from("user/emails+w").into_item(&config).unwrap();
        assert_eq!(item.path(), &["user", "emails"]);

        let err = ScopeInput::from(["a", "b"]).into_item(&config).unwrap_err();
        assert!(matches!(err, ScopeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_try_from_json() {
        let input = ScopeInput::try_from(json!(["user", {"path": ["repo"], "permissions": "w"}]))
            .unwrap();
        match input {
            ScopeInput::Sequence(items) => {
                assert_eq!(items[0], ScopeInput::Str("user".to_string()));
                assert!(matches!(&items[1], ScopeInput::Item(item) if item.path() == ["repo"]));
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_try_from_json_type_mismatch() {
        assert_eq!(
            ScopeInput::try_from(json!(42)),
            Err(ScopeError::TypeMismatch {
                found: "42".to_string()
            })
        );
        assert!(ScopeInput::try_from(json!({"name": "user"})).is_err());
        assert!(ScopeInput::try_from(json!(["user", null])).is_err());
    }

    #[test]
    fn test_try_from_json_empty_path() {
        let result = ScopeInput::try_from(json!({"path": [], "permissions": "r"}));
        assert!(matches!(result, Err(ScopeError::TypeMismatch { .. })));

        let result = ScopeInput::try_from(json!([{"path": [], "permissions": "rwx"}]));
        assert!(matches!(result, Err(ScopeError::TypeMismatch { .. })));
    }
}
