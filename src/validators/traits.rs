//! The property validator contract.

use async_trait::async_trait;

use crate::context::PropertyValidatorContext;
use crate::error::{EngineResult, ValidationFailure};

use super::options::MessageOptions;

/// The unit of rule evaluation.
///
/// `validate` and `validate_async` must agree failure-for-failure. A native-sync
/// validator gets `validate_async` for free as an immediately resolved wrapper;
/// a native-async validator reports [`is_async`](Self::is_async) and implements
/// `validate` by blocking on `validate_async`.
///
/// An `Err` is a configuration error and aborts the run; validation failures
/// are always returned in the `Ok` list.
#[async_trait]
pub trait PropertyValidator: Send + Sync {
    /// True if this validator's native implementation is asynchronous.
    fn is_async(&self) -> bool {
        false
    }

    /// Validates the property synchronously.
    fn validate(&self, context: &PropertyValidatorContext<'_>)
        -> EngineResult<Vec<ValidationFailure>>;

    /// Validates the property asynchronously.
    async fn validate_async(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        self.validate(context)
    }
}

/// A synchronous yes/no check producing at most one failure.
///
/// Every `PropertyCheck` is a [`PropertyValidator`]: when `is_valid` returns
/// false, the failure is built from the check's [`MessageOptions`] and defaults.
pub trait PropertyCheck: Send + Sync {
    /// Returns true if the property satisfies the check.
    ///
    /// Implementations may bind extra message arguments through
    /// [`PropertyValidatorContext::message_formatter`] before returning false.
    fn is_valid(&self, context: &PropertyValidatorContext<'_>) -> bool;

    /// Template used when no custom message is configured.
    fn default_template(&self) -> &'static str;

    /// Failure code used when no custom code is configured.
    fn default_code(&self) -> &'static str;

    /// Message customisation for this check.
    fn options(&self) -> &MessageOptions;
}

impl<C: PropertyCheck> PropertyValidator for C {
    fn validate(
        &self,
        context: &PropertyValidatorContext<'_>,
    ) -> EngineResult<Vec<ValidationFailure>> {
        if self.is_valid(context) {
            return Ok(Vec::new());
        }
        Ok(vec![context.create_failure(
            self.options(),
            self.default_template(),
            self.default_code(),
        )])
    }
}
