//! User-supplied predicates, synchronous and asynchronous.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::context::PropertyValidatorContext;
use crate::error::{EngineResult, ValidationFailure};
use crate::message::templates;

use super::options::{CustomMessage, MessageOptions};
use super::traits::{PropertyCheck, PropertyValidator};

type Predicate = Arc<dyn Fn(&Value, Option<&Value>) -> bool + Send + Sync>;

/// An asynchronous predicate over `(instance, property value)`.
pub type AsyncPredicate =
    Arc<dyn Fn(Arc<Value>, Option<Value>) -> BoxFuture<'static, bool> + Send + Sync>;

/// Passes when `predicate(instance, value)` returns true.
///
/// Unlike the built-in checks, the predicate also sees absent values.
///
/// ```rust
/// use inquest::PredicateValidator;
///
/// let even = PredicateValidator::new(|_, value| {
///     value.and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0)
/// });
/// ```
#[derive(Clone)]
pub struct PredicateValidator {
    predicate: Predicate,
    options: MessageOptions,
}

impl PredicateValidator {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            options: MessageOptions::default(),
        }
    }
}

impl PropertyCheck for PredicateValidator {
    fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool {
        (self.predicate)(context.instance(), context.property_value())
    }

    fn default_template(&self) -> &'static str {
        templates::PREDICATE
    }

    fn default_code(&self) -> &'static str {
        "predicate"
    }

    fn options(&self) -> &MessageOptions {
        &self.options
    }
}

impl CustomMessage for PredicateValidator {
    fn message_options_mut(&mut self) -> &mut MessageOptions {
        &mut self.options
    }
}

impl fmt::Debug for PredicateValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateValidator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Passes when the asynchronous predicate resolves to true.
///
/// The synchronous entry point blocks the calling thread on the predicate's
/// future, so predicates that need a specific runtime's reactor should only be
/// run through the async entry points.
///
/// ```rust
/// use inquest::AsyncPredicateValidator;
///
/// let unique = AsyncPredicateValidator::new(|_instance, value| async move {
///     value.and_then(|v| v.as_str().map(str::to_owned)).as_deref() != Some("taken")
/// });
/// ```
#[derive(Clone)]
pub struct AsyncPredicateValidator {
    predicate: AsyncPredicate,
    options: MessageOptions,
}

impl AsyncPredicateValidator {
    pub fn new<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Arc<Value>, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            predicate: Arc::new(move |instance, value| predicate(instance, value).boxed()),
            options: MessageOptions::default(),
        }
    }
}

#[async_trait]
impl PropertyValidator for AsyncPredicateValidator {
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
        let instance = Arc::clone(context.parent_context().instance_arc());
        let value = context.property_value().cloned();

        if (self.predicate)(instance, value).await {
            return Ok(Vec::new());
        }
        Ok(vec![context.create_failure(
            &self.options,
            templates::PREDICATE,
            "async_predicate",
        )])
    }
}

impl CustomMessage for AsyncPredicateValidator {
    fn message_options_mut(&mut self) -> &mut MessageOptions {
        &mut self.options
    }
}

impl fmt::Debug for AsyncPredicateValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPredicateValidator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
