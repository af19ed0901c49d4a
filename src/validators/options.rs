//! Failure message customisation shared by the built-in validators.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Computes a positional message argument from `(instance, property value)`.
pub type MessageArgument = Arc<dyn Fn(&Value, Option<&Value>) -> Value + Send + Sync>;

/// Custom template, code, and positional arguments for a validator's failures.
#[derive(Clone, Default)]
pub struct MessageOptions {
    template: Option<String>,
    code: Option<String>,
    arguments: Vec<MessageArgument>,
}

impl MessageOptions {
    /// The custom template, or `default` when none was set.
    pub fn template_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.template.as_deref().unwrap_or(default)
    }

    /// The custom code, or `default` when none was set.
    pub fn code_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.code.as_deref().unwrap_or(default)
    }

    /// Evaluates the positional arguments in declaration order.
    pub fn evaluate_arguments(&self, instance: &Value, value: Option<&Value>) -> Vec<Value> {
        self.arguments
            .iter()
            .map(|argument| argument(instance, value))
            .collect()
    }
}

impl fmt::Debug for MessageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageOptions")
            .field("template", &self.template)
            .field("code", &self.code)
            .field("arguments", &self.arguments.len())
            .finish()
    }
}

/// Builder methods for validators that carry [`MessageOptions`].
///
/// ```rust
/// use inquest::{CustomMessage, NotNullValidator};
/// use serde_json::json;
///
/// let validator = NotNullValidator::new()
///     .with_message("{PropertyName} is required for {0}")
///     .with_code("required")
///     .with_message_argument(|instance, _| instance["Kind"].clone());
/// ```
pub trait CustomMessage: Sized {
    /// Mutable access to the options.
    fn message_options_mut(&mut self) -> &mut MessageOptions;

    /// Replaces the default message template.
    fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message_options_mut().template = Some(template.into());
        self
    }

    /// Replaces the default failure code.
    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message_options_mut().code = Some(code.into());
        self
    }

    /// Appends a positional argument (`{0}`, `{1}`, ...) computed per failure.
    fn with_message_argument<F>(mut self, argument: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> Value + Send + Sync + 'static,
    {
        self.message_options_mut().arguments.push(Arc::new(argument));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Holder(MessageOptions);

    impl CustomMessage for Holder {
        fn message_options_mut(&mut self) -> &mut MessageOptions {
            &mut self.0
        }
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let options = MessageOptions::default();
        assert_eq!(options.template_or("default"), "default");
        assert_eq!(options.code_or("code"), "code");
        assert!(options.evaluate_arguments(&json!({}), None).is_empty());
    }

    #[test]
    fn test_overrides() {
        let Holder(options) = Holder(MessageOptions::default())
            .with_message("custom")
            .with_code("custom_code")
            .with_message_argument(|_, value| value.cloned().unwrap_or(Value::Null))
            .with_message_argument(|instance, _| instance["Kind"].clone());

        assert_eq!(options.template_or("default"), "custom");
        assert_eq!(options.code_or("code"), "custom_code");
        assert_eq!(
            options.evaluate_arguments(&json!({"Kind": "retail"}), Some(&json!(3))),
            vec![json!(3), json!("retail")]
        );
    }
}
