//! Ordering comparison validators.
//!
//! Each validator compares a present property value against either a fixed
//! value or a value read from another member of the same instance. Absent
//! property values always pass; pair the rule with a [`NotNullValidator`]
//! to forbid them.
//!
//! [`NotNullValidator`]: super::NotNullValidator
//!
//! # Example
//!
//! ```rust
//! use inquest::{ComparisonValidator, GreaterThanValidator, LessThanValidator};
//! use serde_json::json;
//!
//! // Fixed comparison value
//! let adult = GreaterThanValidator::new(17);
//! assert!(adult.is_satisfied_by(&json!(18), Some(&json!(17))));
//!
//! // Cross-field comparison, for a StartDate rule
//! let before_end = LessThanValidator::member("EndDate");
//! assert_eq!(before_end.member_to_compare(), Some("EndDate"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::context::PropertyValidatorContext;
use crate::message::{templates, COMPARISON_VALUE};
use crate::rule::Accessor;
use crate::value::compare_values;

use super::options::{CustomMessage, MessageOptions};
use super::traits::PropertyCheck;

/// The kind of comparison a validator performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// What a comparison validator compares against.
#[derive(Clone)]
pub enum ComparisonTarget {
    /// A value bound when the validator was built.
    Value(Value),
    /// A value read from the instance owning the property.
    Member {
        /// Name of the member being read, for messages and metadata.
        member: String,
        /// Reads the comparison value from the instance.
        accessor: Accessor,
    },
}

impl ComparisonTarget {
    /// Compares against another member of the same instance, read by name.
    pub fn member(name: impl Into<String>) -> Self {
        let member = name.into();
        let key = member.clone();
        Self::Member {
            member,
            accessor: Arc::new(move |instance: &Value| instance.get(&key).cloned()),
        }
    }

    /// Compares against a value computed from the instance.
    pub fn computed<F>(member: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        Self::Member {
            member: member.into(),
            accessor: Arc::new(accessor),
        }
    }

    /// Resolves the comparison value for `instance`. `null` is reported as absent.
    pub fn resolve(&self, instance: &Value) -> Option<Value> {
        match self {
            ComparisonTarget::Value(value) => Some(value.clone()),
            ComparisonTarget::Member { accessor, .. } => accessor(instance),
        }
        .filter(|v| !v.is_null())
    }

    /// The member compared against, if this is a cross-field comparison.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            ComparisonTarget::Value(_) => None,
            ComparisonTarget::Member { member, .. } => Some(member),
        }
    }

    /// The fixed comparison value, if one was bound.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ComparisonTarget::Value(value) => Some(value),
            ComparisonTarget::Member { .. } => None,
        }
    }
}

impl fmt::Debug for ComparisonTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonTarget::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ComparisonTarget::Member { member, .. } => {
                f.debug_struct("Member").field("member", member).finish()
            }
        }
    }
}

/// Metadata common to every comparison validator.
///
/// Used by consumers such as client-side rule generators.
pub trait ComparisonValidator {
    /// The comparison performed.
    fn comparison(&self) -> Comparison;

    /// What the property is compared against.
    fn target(&self) -> &ComparisonTarget;

    /// The member compared against, for cross-field comparisons.
    fn member_to_compare(&self) -> Option<&str> {
        self.target().member_name()
    }

    /// The fixed comparison value, if any.
    fn value_to_compare(&self) -> Option<&Value> {
        self.target().value()
    }
}

/// Shared algorithm of the ordering validators.
///
/// Skips absent values, resolves the target, tests the ordering, and binds
/// `{ComparisonValue}` on failure.
fn check_ordering(
    context: &PropertyValidatorContext<'_>,
    target: &ComparisonTarget,
    satisfied: impl Fn(&Value, Option<&Value>) -> bool,
) -> bool {
    let Some(value) = context.property_value() else {
        return true;
    };

    let comparison_value = target.resolve(context.instance());
    if satisfied(value, comparison_value.as_ref()) {
        return true;
    }

    context
        .message_formatter()
        .append_argument(COMPARISON_VALUE, comparison_value.unwrap_or(Value::Null));
    false
}

fn ordering_holds(
    value: &Value,
    value_to_compare: Option<&Value>,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    value_to_compare
        .and_then(|target| compare_values(value, target))
        .is_some_and(accept)
}

macro_rules! ordering_validator {
    (
        $(#[$doc:meta])*
        $name:ident, $kind:ident, $template:path, $code:literal, $accept:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            target: ComparisonTarget,
            options: MessageOptions,
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
                    target,
                    options: MessageOptions::default(),
                }
            }

            /// The ordering test on its own.
            ///
            /// An absent comparison value, or one that cannot be ordered against
            /// `value`, never satisfies the test.
            pub fn is_satisfied_by(&self, value: &Value, value_to_compare: Option<&Value>) -> bool {
                ordering_holds(value, value_to_compare, $accept)
            }
        }

        impl ComparisonValidator for $name {
            fn comparison(&self) -> Comparison {
                Comparison::$kind
            }

            fn target(&self) -> &ComparisonTarget {
                &self.target
            }
        }

        impl PropertyCheck for $name {
            fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
                check_ordering(context, &self.target, |value, target| {
                    self.is_satisfied_by(value, target)
                })
            }

            fn default_template(&self) -> &'static str {
                $template
            }

            fn default_code(&self) -> &'static str {
                $code
            }

            fn options(&self) -> &MessageOptions {
                &self.options
            }
        }

        impl CustomMessage for $name {
            fn message_options_mut(&mut self) -> &mut MessageOptions {
                &mut self.options
            }
        }
    };
}

ordering_validator!(
    /// Passes when the property is strictly greater than the comparison value.
    GreaterThanValidator,
    GreaterThan,
    templates::GREATER_THAN,
    "greater_than",
    |ordering| ordering == Ordering::Greater
);

ordering_validator!(
    /// Passes when the property is greater than or equal to the comparison value.
    GreaterThanOrEqualValidator,
    GreaterThanOrEqual,
    templates::GREATER_THAN_OR_EQUAL,
    "greater_than_or_equal",
    |ordering| ordering != Ordering::Less
);

ordering_validator!(
    /// Passes when the property is strictly less than the comparison value.
    LessThanValidator,
    LessThan,
    templates::LESS_THAN,
    "less_than",
    |ordering| ordering == Ordering::Less
);

ordering_validator!(
    /// Passes when the property is less than or equal to the comparison value.
    LessThanOrEqualValidator,
    LessThanOrEqual,
    templates::LESS_THAN_OR_EQUAL,
    "less_than_or_equal",
    |ordering| ordering != Ordering::Greater
);
