//! Validation failure records.
//!
//! This module provides [`ValidationFailure`] for a single unsatisfied rule and
//! [`ValidationFailures`] for the non-empty, ordered collection a failed run returns.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use stillwater::prelude::*;

use crate::path::PropertyPath;

/// A single unsatisfied rule.
///
/// `ValidationFailure` carries:
/// - **path**: where in the object graph the failure occurred
/// - **message**: the formatted failure message
/// - **attempted_value**: the property value that was judged, if one was present
/// - **code**: machine-readable identifier of the validator that failed
/// - **placeholders**: the named arguments that were bound while formatting the message
///
/// # Example
///
/// ```rust
/// use inquest::{PropertyPath, ValidationFailure};
/// use serde_json::json;
///
/// let failure = ValidationFailure::new(PropertyPath::from_field("Age"), "too young")
///     .with_code("greater_than_or_equal")
///     .with_attempted_value(json!(15));
///
/// assert_eq!(failure.to_string(), "Age: too young (attempted: 15)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// The path to the property that failed validation.
    pub path: PropertyPath,
    /// Human-readable failure message.
    pub message: String,
    /// The value that was validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted_value: Option<Value>,
    /// Machine-readable failure code (e.g., `not_null`).
    pub code: String,
    /// Placeholder values bound into the message template.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub placeholders: IndexMap<String, Value>,
}

impl ValidationFailure {
    /// Creates a new failure with the given path and message.
    ///
    /// The code defaults to "validation_error".
    pub fn new(path: PropertyPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            attempted_value: None,
            code: "validation_error".to_string(),
            placeholders: IndexMap::new(),
        }
    }

    /// Sets the failure code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the attempted value and returns self for chaining.
    pub fn with_attempted_value(mut self, value: Value) -> Self {
        self.attempted_value = Some(value);
        self
    }

    /// Sets the bound placeholder values and returns self for chaining.
    pub fn with_placeholders(mut self, placeholders: IndexMap<String, Value>) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Returns the value bound under `name` while the message was formatted.
    pub fn placeholder(&self, name: &str) -> Option<&Value> {
        self.placeholders.get(name)
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref attempted) = self.attempted_value {
            write!(f, " (attempted: {})", attempted)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};

/// A non-empty, ordered collection of validation failures.
///
/// Order is the order in which the engine produced the failures: rules in
/// declaration order, validators in attachment order, collection elements in
/// ascending index order.
///
/// ```rust
/// use inquest::{PropertyPath, ValidationFailure, ValidationFailures};
/// use stillwater::prelude::*;
///
/// let first = ValidationFailures::single(
///     ValidationFailure::new(PropertyPath::from_field("Name"), "required")
/// );
/// let second = ValidationFailures::single(
///     ValidationFailure::new(PropertyPath::from_field("Email"), "invalid")
/// );
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailures(NonEmptyVec<ValidationFailure>);

impl ValidationFailures {
    /// Creates a collection containing a single failure.
    pub fn single(failure: ValidationFailure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a collection from a `Vec`, or `None` when the vec is empty.
    pub fn from_vec(failures: Vec<ValidationFailure>) -> Option<Self> {
        let mut iter = failures.into_iter();
        let head = Self::single(iter.next()?);
        Some(iter.fold(head, |acc, failure| acc.combine(Self::single(failure))))
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the failures in order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    /// Returns the first failure.
    pub fn first(&self) -> &ValidationFailure {
        self.0.head()
    }

    /// Returns all failures whose path renders as `path`.
    pub fn at_path(&self, path: &str) -> Vec<&ValidationFailure> {
        self.0.iter().filter(|f| f.path.to_string() == path).collect()
    }

    /// Returns all failures with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationFailure> {
        self.0.iter().filter(|f| f.code == code).collect()
    }

    /// Converts into a `Vec<ValidationFailure>`.
    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationFailures {
    fn combine(self, other: Self) -> Self {
        ValidationFailures(self.0.combine(other.0))
    }
}

impl Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} failure(s):", self.len())?;
        for (i, failure) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailures {}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl Serialize for ValidationFailures {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_creation() {
        let failure = ValidationFailure::new(PropertyPath::from_field("Name"), "required");

        assert_eq!(failure.path.to_string(), "Name");
        assert_eq!(failure.message, "required");
        assert_eq!(failure.code, "validation_error");
        assert!(failure.attempted_value.is_none());
        assert!(failure.placeholders.is_empty());
    }

    #[test]
    fn test_failure_display_root() {
        let failure = ValidationFailure::new(PropertyPath::root(), "instance rejected");
        assert_eq!(failure.to_string(), "(root): instance rejected");
    }

    #[test]
    fn test_placeholder_lookup() {
        let mut placeholders = IndexMap::new();
        placeholders.insert("ComparisonValue".to_string(), json!(18));
        let failure = ValidationFailure::new(PropertyPath::from_field("Age"), "too young")
            .with_placeholders(placeholders);

        assert_eq!(failure.placeholder("ComparisonValue"), Some(&json!(18)));
        assert_eq!(failure.placeholder("Missing"), None);
    }

    #[test]
    fn test_from_empty_vec_is_none() {
        assert!(ValidationFailures::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_combine_preserves_order() {
        let a = ValidationFailures::single(ValidationFailure::new(
            PropertyPath::from_field("a"),
            "1",
        ));
        let b = ValidationFailures::from_vec(vec![
            ValidationFailure::new(PropertyPath::from_field("b"), "2"),
            ValidationFailure::new(PropertyPath::from_field("c"), "3").with_code("x"),
        ])
        .unwrap();

        let combined = a.combine(b);
        let messages: Vec<_> = combined.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2", "3"]);
        assert_eq!(combined.with_code("x").len(), 1);
        assert_eq!(combined.at_path("b").len(), 1);
    }

    #[test]
    fn test_serialization() {
        let failures = ValidationFailures::single(
            ValidationFailure::new(PropertyPath::from_field("Addresses").push_index(0), "bad")
                .with_code("not_null"),
        );
        assert_eq!(
            serde_json::to_value(&failures).unwrap(),
            json!([{ "path": "Addresses[0]", "message": "bad", "code": "not_null" }])
        );
    }

    #[test]
    fn test_display_lists_failures() {
        let failures = ValidationFailures::single(ValidationFailure::new(
            PropertyPath::from_field("Email"),
            "invalid",
        ));
        let display = failures.to_string();
        assert!(display.contains("1 failure(s)"));
        assert!(display.contains("Email: invalid"));
    }
}
