//! Failure message construction.
//!
//! [`MessageFormatter`] substitutes named placeholders such as `{PropertyName}`
//! into an already-resolved template, then optionally applies positional
//! placeholders (`{0}`, `{1}`, ...) from additional arguments.
//!
//! # Example
//!
//! ```rust
//! use inquest::MessageFormatter;
//!
//! let mut formatter = MessageFormatter::new();
//! formatter
//!     .append_property_name("Age")
//!     .append_argument("ComparisonValue", 18);
//!
//! assert_eq!(
//!     formatter.build_message("{PropertyName} must equal {ComparisonValue}"),
//!     "Age must equal 18"
//! );
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::value::display_value;

/// Placeholder bound to the display name of the property under validation.
pub const PROPERTY_NAME: &str = "PropertyName";
/// Placeholder bound to the value of the property under validation.
pub const PROPERTY_VALUE: &str = "PropertyValue";
/// Placeholder bound by comparison validators to the value compared against.
pub const COMPARISON_VALUE: &str = "ComparisonValue";

static POSITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{(\d+)\}").expect("positional placeholder pattern is valid")
});

/// Builds failure messages from templates.
///
/// A formatter is scoped to a single validator invocation: arguments bound by
/// one validator never leak into another validator's message.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    placeholder_values: IndexMap<String, Value>,
    additional_arguments: Vec<Value>,
}

impl MessageFormatter {
    /// Creates an empty formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value to the `{name}` placeholder.
    ///
    /// Binding the same name twice keeps the latest value.
    pub fn append_argument(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.placeholder_values.insert(name.into(), value.into());
        self
    }

    /// Binds the `{PropertyName}` placeholder.
    pub fn append_property_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.append_argument(PROPERTY_NAME, name.into())
    }

    /// Sets the positional arguments used for `{0}`, `{1}`, ... placeholders.
    ///
    /// Replaces any previously supplied positional arguments.
    pub fn append_additional_arguments<I>(&mut self, arguments: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.additional_arguments = arguments.into_iter().collect();
        self
    }

    /// Returns the named placeholder values bound so far, in binding order.
    pub fn placeholder_values(&self) -> &IndexMap<String, Value> {
        &self.placeholder_values
    }

    /// Returns the positional arguments.
    pub fn additional_arguments(&self) -> &[Value] {
        &self.additional_arguments
    }

    /// Constructs the final message from `template`.
    ///
    /// Every `{name}` with a bound value is replaced by the value's string form
    /// (a bound `null` replaces with the empty string). Unbound placeholders are
    /// left as literal text. Only when positional arguments were supplied, a
    /// second pass replaces `{N}` with the N-th argument and unescapes `{{`/`}}`;
    /// indices without an argument are left untouched.
    pub fn build_message(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (name, value) in &self.placeholder_values {
            let placeholder = format!("{{{}}}", name);
            result = result.replace(&placeholder, &display_value(value));
        }

        if self.additional_arguments.is_empty() {
            return result;
        }

        POSITIONAL
            .replace_all(&result, |caps: &Captures<'_>| match &caps[0] {
                "{{" => "{".to_string(),
                "}}" => "}".to_string(),
                whole => caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.additional_arguments.get(idx))
                    .map(display_value)
                    .unwrap_or_else(|| whole.to_string()),
            })
            .into_owned()
    }
}

/// Default message templates and failure codes for the built-in validators.
pub mod templates {
    /// `NotNullValidator`
    pub const NOT_NULL: &str = "'{PropertyName}' must not be empty.";
    /// `NotEmptyValidator`
    pub const NOT_EMPTY: &str = "'{PropertyName}' should not be empty.";
    /// `EqualValidator`
    pub const EQUAL: &str = "'{PropertyName}' should be equal to '{ComparisonValue}'.";
    /// `NotEqualValidator`
    pub const NOT_EQUAL: &str = "'{PropertyName}' should not be equal to '{ComparisonValue}'.";
    /// `GreaterThanValidator`
    pub const GREATER_THAN: &str = "'{PropertyName}' must be greater than '{ComparisonValue}'.";
    /// `GreaterThanOrEqualValidator`
    pub const GREATER_THAN_OR_EQUAL: &str =
        "'{PropertyName}' must be greater than or equal to '{ComparisonValue}'.";
    /// `LessThanValidator`
    pub const LESS_THAN: &str = "'{PropertyName}' must be less than '{ComparisonValue}'.";
    /// `LessThanOrEqualValidator`
    pub const LESS_THAN_OR_EQUAL: &str =
        "'{PropertyName}' must be less than or equal to '{ComparisonValue}'.";
    /// `PredicateValidator` and `AsyncPredicateValidator`
    pub const PREDICATE: &str = "The specified condition was not met for '{PropertyName}'.";
    /// `RegularExpressionValidator`
    pub const REGULAR_EXPRESSION: &str = "'{PropertyName}' is not in the correct format.";
}
