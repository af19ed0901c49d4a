//! Equality validators and pluggable equality comparers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::PropertyValidatorContext;
use crate::message::{templates, COMPARISON_VALUE};

use crate::value::values_equal;

use super::comparison::{Comparison, ComparisonTarget, ComparisonValidator};
use super::options::{CustomMessage, MessageOptions};
use super::traits::PropertyCheck;

/// Decides whether two optional values are equal.
///
/// Closures of the matching shape implement this trait directly.
pub trait EqualityComparer: Send + Sync {
    fn equals(&self, left: Option<&Value>, right: Option<&Value>) -> bool;
}

impl<F> EqualityComparer for F
where
    F: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync,
{
    fn equals(&self, left: Option<&Value>, right: Option<&Value>) -> bool {
        self(left, right)
    }
}

/// Compares strings case-insensitively; every other value structurally.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCase;

impl EqualityComparer for IgnoreCase {
    fn equals(&self, left: Option<&Value>, right: Option<&Value>) -> bool {
        match (left, right) {
            (Some(Value::String(l)), Some(Value::String(r))) => l.to_lowercase() == r.to_lowercase(),
            _ => default_equals(left, right),
        }
    }
}

/// Equality used when no comparer is supplied.
///
/// Two absent values are equal; an absent and a present value never are.
/// Scalars compare numerically where possible, so `18` equals `18.0`.
fn default_equals(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => values_equal(l, r),
        (None, None) => true,
        _ => false,
    }
}

#[derive(Clone)]
struct Equality {
    target: ComparisonTarget,
    comparer: Option<Arc<dyn EqualityComparer>>,
    options: MessageOptions,
}

impl Equality {
    fn new(target: ComparisonTarget) -> Self {
        Self {
            target,
            comparer: None,
            options: MessageOptions::default(),
        }
    }

    fn compare(&self, value: Option<&Value>, value_to_compare: Option<&Value>) -> bool {
        match &self.comparer {
            Some(comparer) => comparer.equals(value, value_to_compare),
            None => default_equals(value, value_to_compare),
        }
    }

    /// Runs the check, binding `{ComparisonValue}` when it fails.
    /// An absent subject is compared like any other value.
    fn check(&self, context: &PropertyValidatorContext<'_>, expect_equal: bool) -> bool {
        let comparison_value = self.target.resolve(context.instance());
        if self.compare(context.property_value(), comparison_value.as_ref()) == expect_equal {
            return true;
        }

        context
            .message_formatter()
            .append_argument(COMPARISON_VALUE, comparison_value.unwrap_or(Value::Null));
        false
    }
}

impl fmt::Debug for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equality")
            .field("target", &self.target)
            .field("custom_comparer", &self.comparer.is_some())
            .field("options", &self.options)
            .finish()
    }
}

macro_rules! equality_validator {
    (
        $(#[$doc:meta])*
        $name:ident, $kind:ident, $expect_equal:literal, $template:path, $code:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Equality,
        }

        impl $name {
            /// Compares against a fixed value.
            pub fn new(value: impl Into<Value>) -> Self {
                Self::with_target(ComparisonTarget::Value(value.into()))
            }

            /// Compares against another member of the same instance.
            pub fn member(name: impl Into<String>) -> Self {
                Self::with_target(ComparisonTarget::member(name))
            }

            /// Compares against an explicit target.
            pub fn with_target(target: ComparisonTarget) -> Self {
                Self {
                    inner: Equality::new(target),
                }
            }

            /// Replaces the default structural equality.
            pub fn with_comparer(mut self, comparer: impl EqualityComparer + 'static) -> Self {
                self.inner.comparer = Some(Arc::new(comparer));
                self
            }

            /// The equality verdict for a pair of values, using the active comparer.
            pub fn are_equal(&self, value: Option<&Value>, value_to_compare: Option<&Value>) -> bool {
                self.inner.compare(value, value_to_compare)
            }
        }

        impl ComparisonValidator for $name {
            fn comparison(&self) -> Comparison {
                Comparison::$kind
            }

            fn target(&self) -> &ComparisonTarget {
                &self.inner.target
            }
        }

        impl PropertyCheck for $name {
            fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
                self.inner.check(context, $expect_equal)
            }

            fn default_template(&self) -> &'static str {
                $template
            }

            fn default_code(&self) -> &'static str {
                $code
            }

            fn options(&self) -> &MessageOptions {
                &self.inner.options
            }
        }

        impl CustomMessage for $name {
            fn message_options_mut(&mut self) -> &mut MessageOptions {
                &mut self.inner.options
            }
        }
    };
}

equality_validator!(
    /// Passes when the property equals the comparison value.
    ///
    /// An absent property only equals an absent comparison value.
    ///
    /// ```rust
    /// use inquest::{EqualValidator, IgnoreCase};
    /// use serde_json::json;
    ///
    /// let strict = EqualValidator::new("FOO");
    /// assert!(!strict.are_equal(Some(&json!("foo")), Some(&json!("FOO"))));
    ///
    /// let relaxed = EqualValidator::new("FOO").with_comparer(IgnoreCase);
    /// assert!(relaxed.are_equal(Some(&json!("foo")), Some(&json!("FOO"))));
    /// ```
    EqualValidator,
    Equal,
    true,
    templates::EQUAL,
    "equal"
);

equality_validator!(
    /// Passes when the property differs from the comparison value.
    NotEqualValidator,
    NotEqual,
    false,
    templates::NOT_EQUAL,
    "not_equal"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use crate::rule::PropertyRule;
    use crate::validators::PropertyValidator;
    use serde_json::json;

    fn failures<V: PropertyValidator>(validator: &V, instance: Value) -> Vec<String> {
        let ctx = ValidationContext::new(instance).unwrap();
        let rule = PropertyRule::field("Code");
        let property = PropertyValidatorContext::new(&ctx, &rule);
        validator
            .validate(&property)
            .unwrap()
            .into_iter()
            .map(|f| f.message)
            .collect()
    }

    #[test]
    fn test_equal_and_not_equal_are_complements() {
        for code in [json!("abc"), json!("xyz"), json!(3), json!(3.0), json!([1])] {
            let instance = json!({ "Code": code });
            let equal = failures(&EqualValidator::new("abc"), instance.clone()).is_empty();
            let not_equal = failures(&NotEqualValidator::new("abc"), instance).is_empty();
            assert_ne!(equal, not_equal);
        }
    }

    #[test]
    fn test_numeric_equality_across_representations() {
        assert!(failures(&EqualValidator::new(3), json!({"Code": 3.0})).is_empty());
    }

    #[test]
    fn test_structural_equality_for_composites() {
        let validator = EqualValidator::new(json!({"a": [1, 2]}));
        assert!(failures(&validator, json!({"Code": {"a": [1, 2]}})).is_empty());
        assert_eq!(failures(&validator, json!({"Code": {"a": [2, 1]}})).len(), 1);
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failures(&NotEqualValidator::new("root"), json!({"Code": "root"})),
            vec!["'Code' should not be equal to 'root'."]
        );
    }

    #[test]
    fn test_absent_subject_is_compared_like_any_value() {
        assert_eq!(
            failures(&EqualValidator::member("Password"), json!({"Password": "x"})),
            vec!["'Code' should be equal to 'x'."]
        );
        assert!(failures(&NotEqualValidator::member("Password"), json!({"Password": "x"})).is_empty());
        assert!(failures(&EqualValidator::member("Password"), json!({"Code": null})).is_empty());
    }

    #[test]
    fn test_comparer_sees_absent_subject() {
        let absent_matches = |left: Option<&Value>, _: Option<&Value>| left.is_none();
        assert!(failures(&EqualValidator::new("abc").with_comparer(absent_matches), json!({})).is_empty());

        let never_equal = |_: Option<&Value>, _: Option<&Value>| false;
        assert_eq!(failures(&EqualValidator::new("abc").with_comparer(never_equal), json!({})).len(), 1);
    }

    #[test]
    fn test_absent_target_is_compared_like_any_value() {
        assert_eq!(failures(&EqualValidator::member("Other"), json!({"Code": "x"})).len(), 1);
        assert!(failures(&NotEqualValidator::member("Other"), json!({"Code": "x"})).is_empty());
    }

    #[test]
    fn test_custom_comparer_overrides_default() {
        let ignore_case = EqualValidator::new("ABC").with_comparer(IgnoreCase);
        assert!(failures(&ignore_case, json!({"Code": "abc"})).is_empty());

        let never_equal = |_: Option<&Value>, _: Option<&Value>| false;
        let lenient = NotEqualValidator::new("abc").with_comparer(never_equal);
        assert!(failures(&lenient, json!({"Code": "abc"})).is_empty());
    }

    #[test]
    fn test_cross_field_equality() {
        let confirm = EqualValidator::member("Password");
        let instance = json!({"Code": "hunter2", "Password": "hunter2"});
        assert!(failures(&confirm, instance).is_empty());
        assert_eq!(confirm.member_to_compare(), Some("Password"));
        assert_eq!(confirm.comparison(), Comparison::Equal);
    }

    #[test]
    fn test_default_equality_of_absent_values() {
        let validator = EqualValidator::new(0);
        assert!(validator.are_equal(None, None));
        assert!(!validator.are_equal(Some(&json!(0)), None));
    }
}
