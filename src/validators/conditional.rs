//! Conditional execution of another validator.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::PropertyValidatorContext;
use crate::error::{EngineResult, ValidationFailure};
use crate::rule::Condition;

use super::traits::PropertyValidator;

/// Runs the inner validator only when the condition holds for the instance.
///
/// A false condition yields no failures and leaves the property value unread.
/// Both entry points delegate to the matching entry point of the inner
/// validator, which keeps their results consistent.
#[derive(Clone)]
pub struct DelegatingValidator {
    condition: Condition,
    inner: Arc<dyn PropertyValidator>,
}

impl DelegatingValidator {
    pub fn new(condition: Condition, inner: Arc<dyn PropertyValidator>) -> Self {
        Self { condition, inner }
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &Arc<dyn PropertyValidator> {
        &self.inner
    }
}

#[async_trait]
impl PropertyValidator for DelegatingValidator {
    fn is_async(&self) -> bool {
        self.inner.is_async()
    }

    fn validate(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        if !(self.condition)(context.instance()) {
            return Ok(Vec::new());
        }
        self.inner.validate(context)
    }

    async fn validate_async(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        if !(self.condition)(context.instance()) {
            return Ok(Vec::new());
        }
        self.inner.validate_async(context).await
    }
}

impl fmt::Debug for DelegatingValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingValidator")
            .field("inner_is_async", &self.inner.is_async())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationContext;
    use crate::rule::PropertyRule;
    use crate::validators::NotNullValidator;
    use serde_json::{json, Value};

    fn is_business(instance: &Value) -> bool {
        instance["Kind"] == "business"
    }

    #[test]
    fn test_false_condition_skips_without_reading_value() {
        let condition: Condition = Arc::new(is_business);
        let validator = DelegatingValidator::new(condition, Arc::new(NotNullValidator::new()));

        let ctx = ValidationContext::new(json!({"Kind": "personal"})).unwrap();
        let rule = PropertyRule::field("VatNumber");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        assert!(validator.validate(&property).unwrap().is_empty());
        assert!(!property.is_property_value_loaded());
    }

    #[tokio::test]
    async fn test_true_condition_delegates() {
        let condition: Condition = Arc::new(is_business);
        let validator = DelegatingValidator::new(condition, Arc::new(NotNullValidator::new()));

        let ctx = ValidationContext::new(json!({"Kind": "business"})).unwrap();
        let rule = PropertyRule::field("VatNumber");

        let sync = validator
            .validate(&PropertyValidatorContext::new(&ctx, &rule))
            .unwrap();
        let async_ = validator
            .validate_async(&PropertyValidatorContext::new(&ctx, &rule))
            .await
            .unwrap();

        assert_eq!(sync.len(), 1);
        assert_eq!(sync, async_);
        assert!(!validator.is_async());
    }
}
