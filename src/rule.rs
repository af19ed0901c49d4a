//! Property rules: a property accessor bound to an ordered list of validators.
//!
//! # Example
//!
//! ```rust
//! use inquest::{GreaterThanOrEqualValidator, NotNullValidator, PropertyRule};
//! use serde_json::json;
//!
//! let rule = PropertyRule::field("Age")
//!     .validator(NotNullValidator::new())
//!     .validator(GreaterThanOrEqualValidator::new(18));
//!
//! assert_eq!(rule.validators().len(), 2);
//! assert_eq!(rule.value_of(&json!({"Age": 15})), Some(json!(15)));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::{CascadeMode, DisplayNameStyle};
use crate::validators::{DelegatingValidator, PropertyValidator};

/// Reads a property value from an instance.
pub type Accessor = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// A condition evaluated against the instance owning a property.
pub type Condition = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A declared binding of a property accessor to one or more validators.
pub struct PropertyRule {
    property_name: String,
    member: Option<String>,
    display_name: Option<String>,
    display_style: DisplayNameStyle,
    accessor: Accessor,
    validators: Vec<Arc<dyn PropertyValidator>>,
    cascade_mode: Option<CascadeMode>,
    rule_sets: Vec<String>,
}

impl PropertyRule {
    /// Creates a member rule reading `instance[name]`.
    ///
    /// Member rules have a resolvable member identity, which child and collection
    /// adaptors require.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name.clone();
        let mut rule = Self::computed(name.clone(), move |instance: &Value| {
            instance.get(&key).cloned()
        });
        rule.member = Some(name);
        rule
    }

    /// Creates a rule over a computed value.
    ///
    /// The rule has no member identity: `name` is used for paths and messages only.
    pub fn computed<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            property_name: name.into(),
            member: None,
            display_name: None,
            display_style: DisplayNameStyle::default(),
            accessor: Arc::new(accessor),
            validators: Vec::new(),
            cascade_mode: None,
            rule_sets: Vec::new(),
        }
    }

    /// Overrides the human-readable name used in messages.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the cascade mode for this rule, overriding the engine default.
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.cascade_mode = Some(mode);
        self
    }

    /// Adds this rule to a named rule set.
    pub fn in_rule_set(mut self, name: impl Into<String>) -> Self {
        self.rule_sets.push(name.into());
        self
    }

    /// Attaches a validator. Validators run in attachment order.
    pub fn validator<V>(self, validator: V) -> Self
    where
        V: PropertyValidator + 'static,
    {
        self.validator_arc(Arc::new(validator))
    }

    /// Attaches a shared validator.
    pub fn validator_arc(mut self, validator: Arc<dyn PropertyValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Applies `condition` to every validator attached so far.
    ///
    /// When the condition is false for an instance, those validators are skipped
    /// without reading the property value.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let condition: Condition = Arc::new(condition);
        self.validators = self
            .validators
            .into_iter()
            .map(|inner| {
                Arc::new(DelegatingValidator::new(Arc::clone(&condition), inner))
                    as Arc<dyn PropertyValidator>
            })
            .collect();
        self
    }

    /// Applies the negation of `condition` to every validator attached so far.
    pub fn unless<F>(self, condition: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.when(move |instance| !condition(instance))
    }

    /// Raw property name.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Member identity, present only for rules created by [`field`](Self::field).
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Display name: the explicit one, or one derived from the property name.
    pub fn display_name(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => self.display_style.apply(&self.property_name),
        }
    }

    /// Attached validators in attachment order.
    pub fn validators(&self) -> &[Arc<dyn PropertyValidator>] {
        &self.validators
    }

    /// Cascade mode set on this rule, if any.
    pub fn cascade_mode(&self) -> Option<CascadeMode> {
        self.cascade_mode
    }

    /// Rule sets this rule belongs to.
    pub fn rule_sets(&self) -> &[String] {
        &self.rule_sets
    }

    /// Invokes the accessor. `null` is reported as absent.
    pub fn value_of(&self, instance: &Value) -> Option<Value> {
        (self.accessor)(instance).filter(|v| !v.is_null())
    }

    pub(crate) fn set_display_style(&mut self, style: DisplayNameStyle) {
        self.display_style = style;
    }
}

impl fmt::Debug for PropertyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRule")
            .field("property_name", &self.property_name)
            .field("member", &self.member)
            .field("display_name", &self.display_name)
            .field("validators", &self.validators.len())
            .field("cascade_mode", &self.cascade_mode)
            .field("rule_sets", &self.rule_sets)
            .finish()
    }
}
