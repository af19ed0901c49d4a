//! Rule selection policies.
//!
//! A [`ValidatorSelector`] decides whether a rule applies to the current run.
//! The engine consults it once per rule, before any property value is read.

use std::fmt::Debug;

use indexmap::IndexSet;

use crate::context::ValidationContext;
use crate::path::PropertyPath;
use crate::rule::PropertyRule;

/// Rule set name that selects every rule.
pub const ALL_RULE_SETS: &str = "*";
/// Rule set name that selects rules declared outside any rule set.
pub const DEFAULT_RULE_SET: &str = "default";

/// Decides which declared rules apply to a run.
pub trait ValidatorSelector: Debug + Send + Sync {
    /// Returns true if `rule`, located at `property_path`, should execute.
    fn can_execute(
        &self,
        rule: &PropertyRule,
        property_path: &PropertyPath,
        context: &ValidationContext,
    ) -> bool;
}

/// Runs every rule that is not part of a named rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidatorSelector;

impl ValidatorSelector for DefaultValidatorSelector {
    fn can_execute(&self, rule: &PropertyRule, _: &PropertyPath, _: &ValidationContext) -> bool {
        rule.rule_sets().is_empty()
    }
}

/// Runs rules belonging to any of the named rule sets.
///
/// `"*"` selects every rule; `"default"` also selects rules declared outside a set.
///
/// ```rust
/// use inquest::{PropertyRule, RuleSetValidatorSelector, ValidationContext, ValidatorSelector};
/// use serde_json::json;
///
/// let selector = RuleSetValidatorSelector::new(["Create"]);
/// let ctx = ValidationContext::new(json!({})).unwrap();
/// let rule = PropertyRule::field("Id").in_rule_set("Update");
///
/// assert!(!selector.can_execute(&rule, &"Id".into(), &ctx));
/// ```
#[derive(Debug, Clone)]
pub struct RuleSetValidatorSelector {
    rule_sets: IndexSet<String>,
}

impl RuleSetValidatorSelector {
    /// Creates a selector for the given rule set names.
    pub fn new<I, S>(rule_sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_sets: rule_sets.into_iter().map(Into::into).collect(),
        }
    }

    /// The selected rule set names.
    pub fn rule_sets(&self) -> impl Iterator<Item = &str> {
        self.rule_sets.iter().map(String::as_str)
    }
}

impl ValidatorSelector for RuleSetValidatorSelector {
    fn can_execute(&self, rule: &PropertyRule, _: &PropertyPath, _: &ValidationContext) -> bool {
        if self.rule_sets.contains(ALL_RULE_SETS) {
            return true;
        }
        if rule.rule_sets().is_empty() {
            return self.rule_sets.contains(DEFAULT_RULE_SET);
        }
        rule.rule_sets().iter().any(|set| self.rule_sets.contains(set))
    }
}

/// Runs only rules for the named properties.
///
/// Names are rendered paths such as `Customer.Name` or `Addresses`, parsed once
/// on construction. A rule runs when its path equals a name or is nested under
/// one. Inside child contexts every rule runs, so selecting `Addresses`
/// validates each address in full.
#[derive(Debug, Clone)]
pub struct MemberNameValidatorSelector {
    member_paths: IndexSet<PropertyPath>,
}

impl MemberNameValidatorSelector {
    /// Creates a selector for the given property paths.
    pub fn new<I, S>(member_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            member_paths: member_names
                .into_iter()
                .map(|name| PropertyPath::parse(name.as_ref()))
                .collect(),
        }
    }
}

impl ValidatorSelector for MemberNameValidatorSelector {
    fn can_execute(
        &self,
        _: &PropertyRule,
        property_path: &PropertyPath,
        context: &ValidationContext,
    ) -> bool {
        context.is_child_context()
            || self
                .member_paths
                .iter()
                .any(|member| property_path.starts_with(member))
    }
}
