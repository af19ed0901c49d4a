//! Validator registry for named validator storage and late-bound nesting.
//!
//! This module provides the [`ValidatorRegistry`] type that stores named
//! validators, and [`RegistryProvider`], which lets child and collection
//! adaptors look nested validators up at validation time. Because the lookup
//! happens per run, a validator can refer to itself by name, which is how
//! recursive object graphs are validated.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::PropertyValidatorContext;
use crate::error::{EngineResult, RegistryError};
use crate::validator::{ValidationResult, Validator};
use crate::validators::ValidatorProvider;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<String, Arc<dyn Validator>>>>;

/// A thread-safe registry for storing and retrieving named validators.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use inquest::{
///     ChildCollectionValidatorAdaptor, NotEmptyValidator, ObjectValidator, PropertyRule,
///     RegistryProvider, ValidatorRegistry,
/// };
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::new();
///
/// // A category validator that validates its own subcategories
/// registry
///     .register(
///         "Category",
///         ObjectValidator::new()
///             .rule(PropertyRule::field("Name").validator(NotEmptyValidator::new()))
///             .rule(PropertyRule::field("Children").validator(
///                 ChildCollectionValidatorAdaptor::with_provider(RegistryProvider::named(
///                     registry.clone(),
///                     "Category",
///                 )),
///             )),
///     )
///     .unwrap();
///
/// let tree = json!({"Name": "root", "Children": [{"Name": "", "Children": []}]});
/// let failures = registry.validate("Category", &tree).unwrap().into_result().unwrap_err();
/// assert_eq!(failures.first().path.to_string(), "Children[0].Name");
/// ```
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: ValidatorMap,
}

impl ValidatorRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::{ObjectValidator, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::new();
    /// registry.register("Address", ObjectValidator::new()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Address", ObjectValidator::new()).is_err());
    /// ```
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        self.register_arc(name, Arc::new(validator))
    }

    /// Registers a shared validator with the given name.
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        validator: Arc<dyn Validator>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        validators.insert(name, validator);
        Ok(())
    }

    /// Retrieves a validator by name.
    ///
    /// Returns `None` if no validator with the given name is registered.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.read().get(name).cloned()
    }

    /// Names of all registered validators, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Looks up a validator, reporting a missing one as an error.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Validator>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Validates a value against a named validator.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Registry` if the name isn't registered, or any
    /// configuration error raised while validating.
    pub fn validate(&self, name: &str, value: &Value) -> EngineResult<ValidationResult> {
        self.require(name)?.validate(value)
    }

    /// Async counterpart of [`validate`](Self::validate).
    pub async fn validate_async(&self, name: &str, value: &Value) -> EngineResult<ValidationResult> {
        let validator = self.require(name)?;
        validator.validate_async(value).await
    }
}

#[derive(Clone)]
enum Lookup {
    Named(String),
    Discriminator(String),
}

/// Resolves nested validators from a [`ValidatorRegistry`] at validation time.
///
/// - [`named`](Self::named) always uses the same registered validator. A name
///   that is not registered when validation runs is a configuration error.
/// - [`by_discriminator`](Self::by_discriminator) reads a string field of the
///   nested value and uses the validator registered under that name. Values
///   without the field are not validated; a field naming an unregistered
///   validator is a configuration error.
#[derive(Clone)]
pub struct RegistryProvider {
    registry: ValidatorRegistry,
    lookup: Lookup,
}

impl RegistryProvider {
    pub fn named(registry: ValidatorRegistry, name: impl Into<String>) -> Self {
        Self {
            registry,
            lookup: Lookup::Named(name.into()),
        }
    }

    pub fn by_discriminator(registry: ValidatorRegistry, field: impl Into<String>) -> Self {
        Self {
            registry,
            lookup: Lookup::Discriminator(field.into()),
        }
    }
}

impl ValidatorProvider for RegistryProvider {
    fn resolve(
        &self,
        _: &PropertyValidatorContext<'_>,
        value: &Value,
    ) -> EngineResult<Option<Arc<dyn Validator>>> {
        let name = match &self.lookup {
            Lookup::Named(name) => name.as_str(),
            Lookup::Discriminator(field) => match value.get(field).and_then(Value::as_str) {
                Some(name) => name,
                None => return Ok(None),
            },
        };
        Ok(Some(self.registry.require(name)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::rule::PropertyRule;
    use crate::validator::ObjectValidator;
    use crate::validators::NotNullValidator;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let registry = ValidatorRegistry::new();
        registry.register("Address", ObjectValidator::new()).unwrap();

        assert!(registry.get("Address").is_some());
        assert!(registry.get("Unknown").is_none());
        assert_eq!(registry.names(), vec!["Address"]);
    }

    #[test]
    fn test_duplicate_name() {
        let registry = ValidatorRegistry::new();
        registry.register("Address", ObjectValidator::new()).unwrap();
        assert_eq!(
            registry.register("Address", ObjectValidator::new()),
            Err(RegistryError::DuplicateName("Address".to_string()))
        );
    }

    #[test]
    fn test_validate_unknown_name() {
        let registry = ValidatorRegistry::new();
        assert_eq!(
            registry.validate("Address", &json!({})).unwrap_err(),
            EngineError::Registry(RegistryError::NotFound("Address".to_string()))
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = ValidatorRegistry::new();
        let clone = registry.clone();
        clone
            .register(
                "Address",
                ObjectValidator::new()
                    .rule(PropertyRule::field("City").validator(NotNullValidator::new())),
            )
            .unwrap();

        let result = registry.validate("Address", &json!({"City": null})).unwrap();
        assert!(result.is_failure());
    }
}
