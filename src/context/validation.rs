//! Per-run validation context.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::path::PropertyPath;
use crate::selector::{DefaultValidatorSelector, ValidatorSelector};

/// State for validating one node of the object graph.
///
/// A context is created at the root of a run and cloned for every nested
/// object or collection element. Clones never mutate their parent: each owns
/// its own instance pointer, path, and child flag, while the selector is
/// shared by reference.
///
/// # Example
///
/// ```rust
/// use inquest::ValidationContext;
/// use serde_json::json;
///
/// let root = ValidationContext::new(json!({"Address": {"City": "Rome"}})).unwrap();
/// assert!(!root.is_child_context());
///
/// let mut child = root.clone_for_child_validator(json!({"City": "Rome"}));
/// child.push_property("Address");
///
/// assert!(child.is_child_context());
/// assert_eq!(child.property_path().to_string(), "Address");
/// assert!(root.property_path().is_root());
/// ```
#[derive(Clone)]
pub struct ValidationContext {
    instance: Arc<Value>,
    property_path: PropertyPath,
    selector: Arc<dyn ValidatorSelector>,
    is_child_context: bool,
}

impl ValidationContext {
    /// Creates a root context with an empty path and the default selector.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingInstance`] if `instance` is `null`.
    pub fn new(instance: impl Into<Arc<Value>>) -> EngineResult<Self> {
        Self::from_parts(
            instance,
            PropertyPath::root(),
            Arc::new(DefaultValidatorSelector),
        )
    }

    /// Creates a root context that uses `selector` to choose applicable rules.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingInstance`] if `instance` is `null`.
    pub fn with_selector(
        instance: impl Into<Arc<Value>>,
        selector: Arc<dyn ValidatorSelector>,
    ) -> EngineResult<Self> {
        Self::from_parts(instance, PropertyPath::root(), selector)
    }

    /// Creates a context from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingInstance`] if `instance` is `null`.
    pub fn from_parts(
        instance: impl Into<Arc<Value>>,
        property_path: PropertyPath,
        selector: Arc<dyn ValidatorSelector>,
    ) -> EngineResult<Self> {
        let instance = instance.into();
        if instance.is_null() {
            return Err(EngineError::MissingInstance);
        }
        Ok(Self {
            instance,
            property_path,
            selector,
            is_child_context: false,
        })
    }

    /// The node currently under validation.
    pub fn instance(&self) -> &Value {
        &self.instance
    }

    /// Shared handle to the node currently under validation.
    pub fn instance_arc(&self) -> &Arc<Value> {
        &self.instance
    }

    /// Path from the validation root to [`instance`](Self::instance).
    pub fn property_path(&self) -> &PropertyPath {
        &self.property_path
    }

    /// Policy deciding which rules apply to this run.
    pub fn selector(&self) -> &Arc<dyn ValidatorSelector> {
        &self.selector
    }

    /// True once this context was produced by [`clone_for_child_validator`](Self::clone_for_child_validator).
    pub fn is_child_context(&self) -> bool {
        self.is_child_context
    }

    /// Rebinds the context, substituting only the supplied overrides.
    ///
    /// An instance override of `null` is treated as absent. The result is a
    /// fresh, non-child context.
    pub fn clone_with(
        &self,
        property_path: Option<PropertyPath>,
        instance: Option<Arc<Value>>,
        selector: Option<Arc<dyn ValidatorSelector>>,
    ) -> Self {
        Self {
            instance: instance
                .filter(|i| !i.is_null())
                .unwrap_or_else(|| Arc::clone(&self.instance)),
            property_path: property_path.unwrap_or_else(|| self.property_path.clone()),
            selector: selector.unwrap_or_else(|| Arc::clone(&self.selector)),
            is_child_context: false,
        }
    }

    /// Clones the context for descending into `instance`.
    ///
    /// The path and selector are reused verbatim; callers append the segment
    /// for the property (and index) being descended into.
    pub fn clone_for_child_validator(&self, instance: impl Into<Arc<Value>>) -> Self {
        Self {
            instance: instance.into(),
            property_path: self.property_path.clone(),
            selector: Arc::clone(&self.selector),
            is_child_context: true,
        }
    }

    /// Appends a property name to this context's path.
    pub fn push_property(&mut self, name: impl Into<String>) {
        self.property_path.add(name);
    }

    /// Appends a collection index to this context's path.
    pub fn push_index(&mut self, index: usize) {
        self.property_path.add_index(index);
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("instance", &self.instance)
            .field("property_path", &self.property_path.to_string())
            .field("selector", &self.selector)
            .field("is_child_context", &self.is_child_context)
            .finish()
    }
}
