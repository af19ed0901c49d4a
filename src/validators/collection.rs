//! Validation of every element of a nested collection.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use crate::context::{PropertyValidatorContext, ValidationContext};
use crate::error::{EngineError, EngineResult, ValidationFailure};
use crate::validator::Validator;

use super::provider::{FixedProvider, ValidatorProvider};
use super::traits::PropertyValidator;

type ElementFilter = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Runs a validator against each element of an array property.
///
/// Elements are visited in order. `null` elements are skipped, and so are
/// elements rejected by the optional filter. Skipping an element never shifts
/// the index reported for later ones: the failure for the third element is
/// always located at `Property[2]`.
///
/// Values that are absent or not arrays produce no failures.
#[derive(Clone)]
pub struct ChildCollectionValidatorAdaptor {
    provider: Arc<dyn ValidatorProvider>,
    filter: Option<ElementFilter>,
}

impl ChildCollectionValidatorAdaptor {
    /// Validates each element with `validator`.
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self::with_provider(FixedProvider::new(validator))
    }

    /// Validates each element with whatever `provider` resolves for it.
    pub fn with_provider(provider: impl ValidatorProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            filter: None,
        }
    }

    /// Only validates elements for which `filter(instance, element)` is true.
    pub fn with_predicate<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Builds one child context per element that should be validated.
    fn element_contexts(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<(ValidationContext, Arc<dyn Validator>)>> {
        let rule = context.rule();
        if rule.member().is_none() {
            return Err(EngineError::NonMemberRule {
                property: rule.property_name().to_string(),
            });
        }

        let Some(Value::Array(elements)) = context.property_value() else {
            return Ok(Vec::new());
        };

        let parent = context.parent_context();
        let mut prepared = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            if element.is_null() {
                trace!(property = rule.property_name(), index, "skipping absent element");
                continue;
            }
            if let Some(filter) = &self.filter {
                if !filter(context.instance(), element) {
                    trace!(property = rule.property_name(), index, "element filtered out");
                    continue;
                }
            }
            let Some(validator) = self.provider.resolve(context, element)? else {
                continue;
            };

            let mut child = parent.clone_for_child_validator(element.clone());
            child.push_property(rule.property_name());
            child.push_index(index);
            trace!(path = %child.property_path(), "descending into collection element");
            prepared.push((child, validator));
        }
        Ok(prepared)
    }
}

#[async_trait]
impl PropertyValidator for ChildCollectionValidatorAdaptor {
    fn is_async(&self) -> bool {
        true
    }

    fn validate(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        for (child, validator) in self.element_contexts(context)? {
            failures.extend(validator.validate_context(&child)?);
        }
        Ok(failures)
    }

    async fn validate_async(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        for (child, validator) in self.element_contexts(context)? {
            failures.extend(validator.validate_context_async(&child).await?);
        }
        Ok(failures)
    }
}

impl fmt::Debug for ChildCollectionValidatorAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildCollectionValidatorAdaptor")
            .field("filtered", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::PropertyRule;
    use crate::validator::ObjectValidator;
    use crate::validators::NotNullValidator;
    use serde_json::json;

    fn city_required() -> Arc<dyn Validator> {
        Arc::new(
            ObjectValidator::new()
                .rule(PropertyRule::field("City").validator(NotNullValidator::new())),
        )
    }

    fn paths(failures: &[ValidationFailure]) -> Vec<String> {
        failures.iter().map(|f| f.path.to_string()).collect()
    }

    #[test]
    fn test_element_paths_use_original_indices() {
        let ctx = ValidationContext::new(json!({
            "Addresses": [{"City": null}, null, {"City": "Rome"}, {"City": null}]
        }))
        .unwrap();
        let rule = PropertyRule::field("Addresses");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let failures = ChildCollectionValidatorAdaptor::new(city_required())
            .validate(&property)
            .unwrap();

        assert_eq!(paths(&failures), vec!["Addresses[0].City", "Addresses[3].City"]);
    }

    #[test]
    fn test_filter_skips_elements_without_shifting_indices() {
        let ctx = ValidationContext::new(json!({
            "Addresses": [
                {"City": null, "Active": false},
                {"City": null, "Active": true}
            ]
        }))
        .unwrap();
        let rule = PropertyRule::field("Addresses");
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let failures = ChildCollectionValidatorAdaptor::new(city_required())
            .with_predicate(|_, element| element["Active"] == true)
            .validate(&property)
            .unwrap();

        assert_eq!(paths(&failures), vec!["Addresses[1].City"]);
    }

    #[test]
    fn test_non_array_values_produce_no_failures() {
        let adaptor = ChildCollectionValidatorAdaptor::new(city_required());
        let rule = PropertyRule::field("Addresses");
        for instance in [json!({}), json!({"Addresses": {"City": null}}), json!({"Addresses": "x"})] {
            let ctx = ValidationContext::new(instance).unwrap();
            let property = PropertyValidatorContext::new(&ctx, &rule);
            assert!(adaptor.validate(&property).unwrap().is_empty());
        }
    }

    #[test]
    fn test_non_member_rule_is_a_configuration_error() {
        let ctx = ValidationContext::new(json!({"Addresses": []})).unwrap();
        let rule = PropertyRule::computed("Addresses", |instance: &Value| {
            instance.get("Addresses").cloned()
        });
        let property = PropertyValidatorContext::new(&ctx, &rule);

        let result = ChildCollectionValidatorAdaptor::new(city_required()).validate(&property);
        assert!(matches!(result, Err(EngineError::NonMemberRule { .. })));
    }

    #[tokio::test]
    async fn test_async_order_matches_sync_order() {
        let ctx = ValidationContext::new(json!({
            "Addresses": [{"City": null}, {"City": null}, {"City": null}]
        }))
        .unwrap();
        let rule = PropertyRule::field("Addresses");
        let adaptor = ChildCollectionValidatorAdaptor::new(city_required());

        let sync = adaptor
            .validate(&PropertyValidatorContext::new(&ctx, &rule))
            .unwrap();
        let async_ = adaptor
            .validate_async(&PropertyValidatorContext::new(&ctx, &rule))
            .await
            .unwrap();

        assert_eq!(sync, async_);
        assert_eq!(
            paths(&async_),
            vec!["Addresses[0].City", "Addresses[1].City", "Addresses[2].City"]
        );
    }
}
