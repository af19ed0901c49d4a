//! Regular expression matching.

use regex::Regex;

use crate::context::PropertyValidatorContext;
use crate::message::templates;

use super::options::{CustomMessage, MessageOptions};
use super::traits::PropertyCheck;

/// Placeholder bound to the pattern source on failure.
pub const REGULAR_EXPRESSION: &str = "RegularExpression";

/// Passes when a present string property matches the pattern.
///
/// Absent values pass. Present values that are not strings fail.
///
/// ```rust
/// use inquest::RegularExpressionValidator;
///
/// let zip = RegularExpressionValidator::new(r"^\d{5}$").unwrap();
/// assert_eq!(zip.pattern(), r"^\d{5}$");
/// assert!(RegularExpressionValidator::new("(unclosed").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RegularExpressionValidator {
    regex: Regex,
    options: MessageOptions,
}

impl RegularExpressionValidator {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Wraps an already compiled expression.
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            options: MessageOptions::default(),
        }
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl PropertyCheck for RegularExpressionValidator {
    fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
        let Some(value) = context.property_value() else {
            return true;
        };
        if value.as_str().is_some_and(|s| self.regex.is_match(s)) {
            return true;
        }

        context
            .message_formatter()
            .append_argument(REGULAR_EXPRESSION, self.pattern());
        false
    }

    fn default_template(&self) -> &'static str {
        templates::REGULAR_EXPRESSION
    }

    fn default_code(&self) -> &'static str {
        "regular_expression"
    }

    fn options(&self) -> &MessageOptions {
        &self.options
    }
}

impl CustomMessage for RegularExpressionValidator {
    fn message_options_mut(&mut self) -> &mut MessageOptions {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use crate::rule::PropertyRule;
    use crate::validators::PropertyValidator;
    use serde_json::{json, Value};

    fn failures(validator: &RegularExpressionValidator, instance: Value) -> Vec<crate::ValidationFailure> {
        let ctx = ValidationContext::new(instance).unwrap();
        let rule = PropertyRule::field("Zip");
        let property = PropertyValidatorContext::new(&ctx, &rule);
        validator.validate(&property).unwrap()
    }

    #[test]
    fn test_matching_and_absent_values_pass() {
        let validator = RegularExpressionValidator::new(r"^\d{5}$").unwrap();
        assert!(failures(&validator, json!({"Zip": "12345"})).is_empty());
        assert!(failures(&validator, json!({})).is_empty());
    }

    #[test]
    fn test_mismatch_binds_pattern() {
        let validator = RegularExpressionValidator::new(r"^\d{5}$").unwrap();
        let result = failures(&validator, json!({"Zip": "1234"}));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "'Zip' is not in the correct format.");
        assert_eq!(
            result[0].placeholder(REGULAR_EXPRESSION),
            Some(&json!(r"^\d{5}$"))
        );
    }

    #[test]
    fn test_non_string_fails() {
        let validator = RegularExpressionValidator::new(r"^\d{5}$")
            .unwrap()
            .with_message("{PropertyName} must match {RegularExpression}");
        let result = failures(&validator, json!({"Zip": 12345}));
        assert_eq!(result[0].message, r"Zip must match ^\d{5}$");
    }
}
