//! Engine configuration.
//!
//! [`EngineConfig`] holds defaults that individual rules may override. It
//! deserializes from any serde source; missing fields take their defaults.
//!
//! ```rust
//! use inquest::{CascadeMode, EngineConfig};
//! use serde_json::json;
//!
//! let config: EngineConfig =
//!     serde_json::from_value(json!({"cascade_mode": "stop_on_first_failure"})).unwrap();
//! assert_eq!(config.cascade_mode, CascadeMode::StopOnFirstFailure);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static UPPERCASE: Lazy<Regex> =
    Lazy::new(|| Regex::new("([A-Z])").expect("uppercase pattern is valid"));

/// Whether a rule keeps running validators after one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Run every validator attached to the rule.
    #[default]
    Continue,
    /// Stop at the first validator that reports a failure.
    StopOnFirstFailure,
}

/// How a rule derives its display name when none is given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayNameStyle {
    /// `"FirstName"` is displayed as `"First Name"`.
    #[default]
    SplitPascalCase,
    /// The property name is displayed unchanged.
    Verbatim,
}

impl DisplayNameStyle {
    /// Derives a display name from `property_name`.
    pub fn apply(&self, property_name: &str) -> String {
        match self {
            DisplayNameStyle::SplitPascalCase => split_pascal_case(property_name),
            DisplayNameStyle::Verbatim => property_name.to_string(),
        }
    }
}

/// Engine-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cascade mode for rules that do not set one.
    pub cascade_mode: CascadeMode,
    /// Display name derivation for rules without an explicit display name.
    pub display_names: DisplayNameStyle,
}

/// Splits pascal case, so `"FooBar"` becomes `"Foo Bar"`.
pub fn split_pascal_case(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    UPPERCASE.replace_all(input, " $1").trim().to_string()
}
