//! # Inquest
//!
//! A rule-based validation engine for nested object graphs, with matching
//! synchronous and asynchronous execution.
//!
//! ## Overview
//!
//! A validator is an ordered list of property rules. Each rule reads one
//! property from the instance and runs its validators against it. Failures are
//! ordinary values: a run collects every failure, each carrying the path of the
//! offending property (`Addresses[2].City`), a formatted message, and the
//! attempted value. Misconfigured rule graphs are reported separately as an
//! [`EngineError`] and abort the run.
//!
//! Nested objects and collections are validated by adaptors that descend into
//! the property value with a child context, so nested failures come back with
//! fully-qualified paths.
//!
//! ## Core Types
//!
//! - [`ObjectValidator`] / [`Validator`]: run rules against an instance
//! - [`PropertyRule`]: binds a property accessor to validators
//! - [`PropertyValidator`]: the unit of rule evaluation
//! - [`ValidationContext`] / [`PropertyValidatorContext`]: execution state
//! - [`ValidationFailure`] / [`ValidationFailures`]: what a failed run returns
//! - [`MessageFormatter`]: placeholder substitution for failure messages
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use inquest::prelude::*;
//! use serde_json::json;
//!
//! let address = ObjectValidator::new()
//!     .rule(PropertyRule::field("City").validator(NotNullValidator::new()));
//!
//! let customer = ObjectValidator::new()
//!     .rule(PropertyRule::field("Age").validator(GreaterThanOrEqualValidator::new(18)))
//!     .rule(
//!         PropertyRule::field("Addresses")
//!             .validator(ChildCollectionValidatorAdaptor::new(Arc::new(address))),
//!     );
//!
//! let result = customer
//!     .validate(&json!({
//!         "Age": 15,
//!         "Addresses": [{"City": null}, {"City": "Rome"}]
//!     }))
//!     .unwrap();
//!
//! let failures = result.into_result().unwrap_err();
//! let paths: Vec<String> = failures.iter().map(|f| f.path.to_string()).collect();
//! assert_eq!(paths, vec!["Age", "Addresses[0].City"]);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod path;
pub mod registry;
pub mod rule;
pub mod selector;
pub mod validator;
pub mod validators;
pub mod value;

pub use config::{CascadeMode, DisplayNameStyle, EngineConfig};
pub use context::{PropertyValidatorContext, ValidationContext};
pub use error::{EngineError, EngineResult, RegistryError, ValidationFailure, ValidationFailures};
pub use message::MessageFormatter;
pub use path::{PathSegment, PropertyPath};
pub use registry::{RegistryProvider, ValidatorRegistry};
pub use rule::{Accessor, Condition, PropertyRule};
pub use selector::{
    DefaultValidatorSelector, MemberNameValidatorSelector, RuleSetValidatorSelector,
    ValidatorSelector,
};
pub use validator::{ObjectValidator, ValidationResult, Validator};
pub use validators::{
    AsyncPredicate, AsyncPredicateValidator, ChildCollectionValidatorAdaptor,
    ChildValidatorAdaptor, Comparison, ComparisonTarget, ComparisonValidator, CustomMessage,
    DelegatingValidator, EqualValidator, EqualityComparer, FixedProvider, FnProvider,
    GreaterThanOrEqualValidator, GreaterThanValidator, IgnoreCase, LessThanOrEqualValidator,
    LessThanValidator, MessageArgument, MessageOptions, NotEmptyValidator, NotEqualValidator,
    NotNullValidator, PredicateValidator, PropertyCheck, PropertyValidator,
    RegularExpressionValidator, ValidatorProvider,
};

/// Common imports for declaring and running validators.
pub mod prelude {
    pub use crate::{
        CascadeMode, ChildCollectionValidatorAdaptor, ChildValidatorAdaptor, CustomMessage,
        EngineConfig, EqualValidator, GreaterThanOrEqualValidator, GreaterThanValidator,
        LessThanOrEqualValidator, LessThanValidator, NotEmptyValidator, NotEqualValidator,
        NotNullValidator, ObjectValidator, PredicateValidator, PropertyRule,
        RegularExpressionValidator, ValidationFailures, ValidationResult, Validator,
    };
}
