//! Resolution of the validator applied to a nested object.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::PropertyValidatorContext;
use crate::error::EngineResult;
use crate::validator::Validator;

/// Chooses the validator for a nested value.
///
/// `context.instance()` is the object containing the nested value, so a
/// provider may select on either. Returning `Ok(None)` means the value is not
/// validated; an `Err` aborts the run.
pub trait ValidatorProvider: Send + Sync {
    fn resolve(
        &self,
        context: &PropertyValidatorContext<'_>,
        value: &Value,
    ) -> EngineResult<Option<Arc<dyn Validator>>>;
}

/// Always resolves to the same validator.
#[derive(Clone)]
pub struct FixedProvider {
    validator: Arc<dyn Validator>,
}

impl FixedProvider {
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self { validator }
    }
}

impl ValidatorProvider for FixedProvider {
    fn resolve(
        &self,
        _: &PropertyValidatorContext<'_>,
        _: &Value,
    ) -> EngineResult<Option<Arc<dyn Validator>>> {
        Ok(Some(Arc::clone(&self.validator)))
    }
}

impl fmt::Debug for FixedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedProvider").finish_non_exhaustive()
    }
}

/// Resolves with a closure over `(containing instance, nested value)`.
///
/// ```rust
/// use std::sync::Arc;
/// use inquest::{FnProvider, NotNullValidator, ObjectValidator, PropertyRule, Validator};
///
/// let company: Arc<dyn Validator> = Arc::new(
///     ObjectValidator::new().rule(PropertyRule::field("VatNumber").validator(NotNullValidator::new())),
/// );
/// let provider = FnProvider::new(move |_, nested| {
///     (nested["Kind"] == "company").then(|| Arc::clone(&company))
/// });
/// ```
pub struct FnProvider<F> {
    resolve: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&Value, &Value) -> Option<Arc<dyn Validator>> + Send + Sync,
{
    pub fn new(resolve: F) -> Self {
        Self { resolve }
    }
}

impl<F> ValidatorProvider for FnProvider<F>
where
    F: Fn(&Value, &Value) -> Option<Arc<dyn Validator>> + Send + Sync,
{
    fn resolve(
        &self,
        context: &PropertyValidatorContext<'_>,
        value: &Value,
    ) -> EngineResult<Option<Arc<dyn Validator>>> {
        Ok((self.resolve)(context.instance(), value))
    }
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}
