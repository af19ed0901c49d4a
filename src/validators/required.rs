//! Presence validators.

use serde_json::Value;

use crate::context::PropertyValidatorContext;
use crate::message::templates;

use super::options::{CustomMessage, MessageOptions};
use super::traits::PropertyCheck;

/// Fails when the property is absent or `null`.
#[derive(Debug, Clone, Default)]
pub struct NotNullValidator {
    options: MessageOptions,
}

impl NotNullValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyCheck for NotNullValidator {
    fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
        context.property_value().is_some()
    }

    fn default_template(&self) -> &'static str {
        templates::NOT_NULL
    }

    fn default_code(&self) -> &'static str {
        "not_null"
    }

    fn options(&self) -> &MessageOptions {
        &self.options
    }
}

impl CustomMessage for NotNullValidator {
    fn message_options_mut(&mut self) -> &mut MessageOptions {
        &mut self.options
    }
}

/// Fails when the property is absent, a blank string, or an empty array or object.
#[derive(Debug, Clone, Default)]
pub struct NotEmptyValidator {
    options: MessageOptions,
}

impl NotEmptyValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl PropertyCheck for NotEmptyValidator {
    fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
        context.property_value().is_some_and(|value| !is_empty(value))
    }

    fn default_template(&self) -> &'static str {
        templates::NOT_EMPTY
    }

    fn default_code(&self) -> &'static str {
        "not_empty"
    }

    fn options(&self) -> &MessageOptions {
        &self.options
    }
}

impl CustomMessage for NotEmptyValidator {
    fn message_options_mut(&mut self) -> &mut MessageOptions {
        &mut self.options
    }
}
