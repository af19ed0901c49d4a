//! Object validators: ordered rule sets run against one instance.
//!
//! [`ObjectValidator`] is the orchestrating layer. For each rule, in declaration
//! order, it asks the context's selector whether the rule applies, then runs the
//! rule's validators in attachment order, each in a fresh
//! [`PropertyValidatorContext`]. The synchronous and asynchronous runs visit the
//! same rules in the same order and return the same failures.
//!
//! # Example
//!
//! ```rust
//! use inquest::{GreaterThanOrEqualValidator, NotNullValidator, ObjectValidator, PropertyRule, Validator};
//! use serde_json::json;
//!
//! let person = ObjectValidator::new()
//!     .rule(PropertyRule::field("Name").validator(NotNullValidator::new()))
//!     .rule(PropertyRule::field("Age").validator(GreaterThanOrEqualValidator::new(18)));
//!
//! let result = person.validate(&json!({"Name": "Ada", "Age": 15})).unwrap();
//! assert!(result.is_failure());
//!
//! let failures = result.into_result().unwrap_err();
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures.first().path.to_string(), "Age");
//! assert_eq!(failures.first().message, "'Age' must be greater than or equal to '18'.");
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace, warn};

use crate::config::{CascadeMode, EngineConfig};
use crate::context::{PropertyValidatorContext, ValidationContext};
use crate::error::{EngineResult, ValidationFailure, ValidationFailures};
use crate::rule::PropertyRule;
use crate::selector::ValidatorSelector;

/// Outcome of validating a whole instance.
pub type ValidationResult = Validation<(), ValidationFailures>;

/// Folds a failure list into a [`ValidationResult`].
pub fn into_validation(failures: Vec<ValidationFailure>) -> ValidationResult {
    match ValidationFailures::from_vec(failures) {
        Some(failures) => Validation::Failure(failures),
        None => Validation::Success(()),
    }
}

/// Something that validates whole instances.
///
/// Implementors provide the two context-level entry points; the instance-level
/// entry points build a root context with the default selector.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Validates `context.instance()` synchronously.
    fn validate_context(&self, context: &ValidationContext) -> EngineResult<Vec<ValidationFailure>>;

    /// Validates `context.instance()` asynchronously.
    async fn validate_context_async(
        &self,
        context: &ValidationContext,
    ) -> EngineResult<Vec<ValidationFailure>>;

    /// Validates `instance` synchronously.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`](crate::EngineError) if `instance` is `null` or the rules are misconfigured.
    fn validate(&self, instance: &Value) -> EngineResult<ValidationResult> {
        let context = ValidationContext::new(instance.clone())?;
        self.validate_context(&context).map(into_validation)
    }

    /// Validates `instance` asynchronously.
    async fn validate_async(&self, instance: &Value) -> EngineResult<ValidationResult> {
        let context = ValidationContext::new(instance.clone())?;
        self.validate_context_async(&context)
            .await
            .map(into_validation)
    }
}

/// An ordered list of property rules.
#[derive(Default)]
pub struct ObjectValidator {
    rules: Vec<PropertyRule>,
    config: EngineConfig,
}

impl ObjectValidator {
    /// Creates a validator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with `config`.
    ///
    /// The configuration applies to rules added afterwards.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Appends a rule. Rules run in the order they are added.
    pub fn rule(mut self, mut rule: PropertyRule) -> Self {
        rule.set_display_style(self.config.display_names);
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[PropertyRule] {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates a typed instance by serializing it to JSON first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`](crate::EngineError::Serialization) if `instance` cannot be represented as JSON.
    pub fn validate_serialize<T: Serialize>(&self, instance: &T) -> EngineResult<ValidationResult> {
        let value = serde_json::to_value(instance)?;
        self.validate(&value)
    }

    /// Validates `instance`, running only the rules `selector` picks.
    pub fn validate_with(
        &self,
        instance: &Value,
        selector: impl ValidatorSelector + 'static,
    ) -> EngineResult<ValidationResult> {
        let context = ValidationContext::with_selector(instance.clone(), Arc::new(selector))?;
        self.validate_context(&context).map(into_validation)
    }

    /// Async counterpart of [`validate_with`](Self::validate_with).
    pub async fn validate_with_async(
        &self,
        instance: &Value,
        selector: impl ValidatorSelector + 'static,
    ) -> EngineResult<ValidationResult> {
        let context = ValidationContext::with_selector(instance.clone(), Arc::new(selector))?;
        self.validate_context_async(&context)
            .await
            .map(into_validation)
    }

    fn applies(&self, rule: &PropertyRule, context: &ValidationContext) -> bool {
        let path = context.property_path().push_field(rule.property_name());
        let applies = context.selector().can_execute(rule, &path, context);
        if !applies {
            trace!(path = %path, "rule skipped by selector");
        }
        applies
    }

    fn cascade_mode(&self, rule: &PropertyRule) -> CascadeMode {
        rule.cascade_mode().unwrap_or(self.config.cascade_mode)
    }

    fn finish(
        &self,
        context: &ValidationContext,
        outcome: EngineResult<Vec<ValidationFailure>>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        match &outcome {
            Ok(failures) => debug!(
                path = %context.property_path(),
                failures = failures.len(),
                "object validation finished"
            ),
            Err(err) if !context.is_child_context() => {
                warn!(error = %err, "validation aborted by a configuration error")
            }
            Err(_) => {}
        }
        outcome
    }

    fn run(&self, context: &ValidationContext) -> EngineResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            if !self.applies(rule, context) {
                continue;
            }
            let cascade = self.cascade_mode(rule);
            let mut loaded = None;
            for validator in rule.validators() {
                let property = property_context(context, rule, &loaded);
                let result = validator.validate(&property)?;
                if loaded.is_none() {
                    loaded = property.loaded_property_value();
                }
                let failed = !result.is_empty();
                failures.extend(result);
                if failed && cascade == CascadeMode::StopOnFirstFailure {
                    break;
                }
            }
        }
        Ok(failures)
    }

    async fn run_async(&self, context: &ValidationContext) -> EngineResult<Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            if !self.applies(rule, context) {
                continue;
            }
            let cascade = self.cascade_mode(rule);
            let mut loaded = None;
            for validator in rule.validators() {
                let property = property_context(context, rule, &loaded);
                let result = if validator.is_async() {
                    validator.validate_async(&property).await?
                } else {
                    validator.validate(&property)?
                };
                if loaded.is_none() {
                    loaded = property.loaded_property_value();
                }
                let failed = !result.is_empty();
                failures.extend(result);
                if failed && cascade == CascadeMode::StopOnFirstFailure {
                    break;
                }
            }
        }
        Ok(failures)
    }
}

/// Creates the context for the next validator of `rule`, reusing a value an
/// earlier validator of the same rule already fetched.
fn property_context<'a>(
    context: &'a ValidationContext,
    rule: &'a PropertyRule,
    loaded: &Option<Option<Value>>,
) -> PropertyValidatorContext<'a> {
    match loaded {
        Some(value) => PropertyValidatorContext::with_property_value(context, rule, value.clone()),
        None => PropertyValidatorContext::new(context, rule),
    }
}

#[async_trait]
impl Validator for ObjectValidator {
    fn validate_context(&self, context: &ValidationContext) -> EngineResult<Vec<ValidationFailure>> {
        debug!(path = %context.property_path(), rules = self.rules.len(), "object validation started");
        let outcome = self.run(context);
        self.finish(context, outcome)
    }

    async fn validate_context_async(
        &self,
        context: &ValidationContext,
    ) -> EngineResult<Vec<ValidationFailure>> {
        debug!(path = %context.property_path(), rules = self.rules.len(), "async object validation started");
        let outcome = self.run_async(context).await;
        self.finish(context, outcome)
    }
}

impl fmt::Debug for ObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish()
    }
}
