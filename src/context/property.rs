//! Per-(rule, validator) execution context.

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;

use crate::error::ValidationFailure;
use crate::message::{MessageFormatter, PROPERTY_VALUE};
use crate::path::PropertyPath;
use crate::rule::PropertyRule;
use crate::validators::MessageOptions;

use super::ValidationContext;

/// The context a property validator executes in.
///
/// The property value is fetched lazily: the rule's accessor runs on the first
/// call to [`property_value`](Self::property_value) and never again for this
/// context. A validator that decides to skip without reading the value never
/// triggers the accessor at all.
///
/// # Example
///
/// ```rust
/// use inquest::{PropertyRule, PropertyValidatorContext, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::new(json!({"FirstName": "Ada"})).unwrap();
/// let rule = PropertyRule::field("FirstName");
/// let property = PropertyValidatorContext::new(&ctx, &rule);
///
/// assert!(!property.is_property_value_loaded());
/// assert_eq!(property.property_value(), Some(&json!("Ada")));
/// assert_eq!(property.property_description(), "First Name");
/// ```
pub struct PropertyValidatorContext<'a> {
    parent: &'a ValidationContext,
    rule: &'a PropertyRule,
    property_value: OnceCell<Option<Value>>,
    formatter: Mutex<MessageFormatter>,
}

impl<'a> PropertyValidatorContext<'a> {
    /// Creates a context for running one of `rule`'s validators against `parent`.
    pub fn new(parent: &'a ValidationContext, rule: &'a PropertyRule) -> Self {
        Self {
            parent,
            rule,
            property_value: OnceCell::new(),
            formatter: Mutex::new(MessageFormatter::new()),
        }
    }

    /// Creates a context whose property value is already known.
    pub fn with_property_value(
        parent: &'a ValidationContext,
        rule: &'a PropertyRule,
        value: Option<Value>,
    ) -> Self {
        let mut context = Self::new(parent, rule);
        context.set_property_value(value);
        context
    }

    /// The validation context owning this property context.
    pub fn parent_context(&self) -> &'a ValidationContext {
        self.parent
    }

    /// The rule being executed.
    pub fn rule(&self) -> &'a PropertyRule {
        self.rule
    }

    /// Raw property name of the rule.
    pub fn property_name(&self) -> &'a str {
        self.rule.property_name()
    }

    /// Full path of the property from the validation root.
    pub fn property_path(&self) -> PropertyPath {
        self.parent.property_path().push_field(self.rule.property_name())
    }

    /// Human-readable name of the property.
    pub fn property_description(&self) -> String {
        self.rule.display_name()
    }

    /// The instance owning the property.
    pub fn instance(&self) -> &'a Value {
        self.parent.instance()
    }

    /// The property value, fetched on first access and cached afterwards.
    ///
    /// `null` is reported as absent.
    pub fn property_value(&self) -> Option<&Value> {
        self.property_value
            .get_or_init(|| self.rule.value_of(self.parent.instance()))
            .as_ref()
    }

    /// Marks the value as already computed, bypassing the accessor.
    pub fn set_property_value(&mut self, value: Option<Value>) {
        self.property_value = OnceCell::with_value(value.filter(|v| !v.is_null()));
    }

    /// True if the property value has been fetched or set.
    pub fn is_property_value_loaded(&self) -> bool {
        self.property_value.get().is_some()
    }

    /// The fetched value, if it has been fetched. Does not trigger the accessor.
    pub fn loaded_property_value(&self) -> Option<Option<Value>> {
        self.property_value.get().cloned()
    }

    /// The formatter for this validator invocation's failure message.
    ///
    /// The guard must not be held across an `.await`.
    pub fn message_formatter(&self) -> MutexGuard<'_, MessageFormatter> {
        self.formatter.lock()
    }

    /// Builds the failure for this property.
    ///
    /// Binds `{PropertyName}`, `{PropertyValue}`, and any positional arguments
    /// from `options`, then formats the template (the custom one from `options`,
    /// or `default_template`).
    pub fn create_failure(
        &self,
        options: &MessageOptions,
        default_template: &str,
        default_code: &str,
    ) -> ValidationFailure {
        let value = self.property_value().cloned();
        let arguments = options.evaluate_arguments(self.instance(), value.as_ref());

        let mut formatter = self.formatter.lock();
        formatter
            .append_property_name(self.property_description())
            .append_argument(PROPERTY_VALUE, value.clone().unwrap_or(Value::Null));
        if !arguments.is_empty() {
            formatter.append_additional_arguments(arguments);
        }

        let message = formatter.build_message(options.template_or(default_template));
        let mut failure = ValidationFailure::new(self.property_path(), message)
            .with_code(options.code_or(default_code))
            .with_placeholders(formatter.placeholder_values().clone());
        if let Some(value) = value {
            failure = failure.with_attempted_value(value);
        }
        failure
    }
}
