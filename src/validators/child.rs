//! Validation of a single nested object.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::context::{PropertyValidatorContext, ValidationContext};
use crate::error::{EngineError, EngineResult, ValidationFailure};
use crate::validator::Validator;

use super::provider::{FixedProvider, ValidatorProvider};
use super::traits::PropertyValidator;

/// Runs another validator against the nested object held by a property.
///
/// Absent values and values for which the provider resolves no validator
/// produce no failures. The nested validator's failures are returned as-is;
/// their paths already carry the property name as a prefix.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use inquest::{ChildValidatorAdaptor, NotNullValidator, ObjectValidator, PropertyRule, Validator};
/// use serde_json::json;
///
/// let address = ObjectValidator::new()
///     .rule(PropertyRule::field("City").validator(NotNullValidator::new()));
/// let customer = ObjectValidator::new().rule(
///     PropertyRule::field("Address").validator(ChildValidatorAdaptor::new(Arc::new(address))),
/// );
///
/// let result = customer.validate(&json!({"Address": {"City": null}})).unwrap();
/// let failures = result.into_result().unwrap_err();
/// assert_eq!(failures.first().path.to_string(), "Address.City");
/// ```
#[derive(Clone)]
pub struct ChildValidatorAdaptor {
    provider: Arc<dyn ValidatorProvider>,
}

impl ChildValidatorAdaptor {
    /// Validates the nested object with `validator`.
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self::with_provider(FixedProvider::new(validator))
    }

    /// Validates the nested object with whatever `provider` resolves.
    pub fn with_provider(provider: impl ValidatorProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    fn prepare(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Option<(ValidationContext, Arc<dyn Validator>)>> {
        let rule = context.rule();
        if rule.member().is_none() {
            return Err(EngineError::NonMemberRule {
                property: rule.property_name().to_string(),
            });
        }

        let Some(value) = context.property_value() else {
            return Ok(None);
        };
        let Some(validator) = self.provider.resolve(context, value)? else {
            return Ok(None);
        };

        let mut child = context.parent_context().clone_for_child_validator(value.clone());
        child.push_property(rule.property_name());
        trace!(path = %child.property_path(), "descending into nested object");
        Ok(Some((child, validator)))
    }
}

#[async_trait]
impl PropertyValidator for ChildValidatorAdaptor {
    fn is_async(&self) -> bool {
        true
    }

    fn validate(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        futures::executor::block_on(self.validate_async(context))
    }

    async fn validate_async(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        match self.prepare(context)? {
            Some((child, validator)) => validator.validate_context_async(&child).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Debug for ChildValidatorAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildValidatorAdaptor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::PropertyRule;
    use crate::validator::ObjectValidator;
    use crate::validators::{FnProvider, NotNullValidator};
    use serde_json::{json, Value};

    fn address_validator() -> Arc<dyn Validator> {
        Arc::new(
            ObjectValidator::new()
                .rule(PropertyRule::field("City").validator(NotNullValidator::new())),
        )
    }

    #[test]
    fn test_nested_failures_are_prefixed() {
        let ctx = ValidationContext::new(json!({"Address": {"City": null}})).unwrap();
        let rule = PropertyRule::field("Address");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let failures = ChildValidatorAdaptor::new(address_validator())
            .validate(&property)
            .unwrap();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path.to_string(), "Address.City");
    }

    #[test]
    fn test_absent_value_produces_no_failures() {
        let ctx = ValidationContext::new(json!({"Address": null})).unwrap();
        let rule = PropertyRule::field("Address");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let adaptor = ChildValidatorAdaptor::new(address_validator());
        assert!(adaptor.validate(&property).unwrap().is_empty());
    }

    #[test]
    fn test_unresolved_validator_produces_no_failures() {
        let ctx = ValidationContext::new(json!({"Address": {"City": null}})).unwrap();
        let rule = PropertyRule::field("Address");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let adaptor = ChildValidatorAdaptor::with_provider(FnProvider::new(|_, _| None));
        assert!(adaptor.validate(&property).unwrap().is_empty());
    }

    #[test]
    fn test_non_member_rule_is_a_configuration_error() {
        let ctx = ValidationContext::new(json!({"Address": {}})).unwrap();
        let rule = PropertyRule::computed("Address", |instance: &Value| instance.get("Address").cloned());
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let err = ChildValidatorAdaptor::new(address_validator())
            .validate(&property)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::NonMemberRule {
                property: "Address".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_async_path_matches_sync_path() {
        let ctx = ValidationContext::new(json!({"Address": {"City": null}})).unwrap();
        let rule = PropertyRule::field("Address");
        let adaptor = ChildValidatorAdaptor::new(address_validator());

        let sync = adaptor
            .validate(&PropertyValidatorContext::new(&ctx, &rule))
            .unwrap();
        let async_ = adaptor
            .validate_async(&PropertyValidatorContext::new(&ctx, &rule))
            .await
            .unwrap();

        assert!(adaptor.is_async());
        assert_eq!(sync, async_);
    }
}
