//! Execution state threaded through a validation run.
//!
//! - [`ValidationContext`]: per-run (and per nested descent) state: the instance,
//!   its property path, the rule selector, and whether this is a child context.
//! - [`PropertyValidatorContext`]: per-(rule, validator) state with a lazily
//!   fetched property value and a message formatter.

mod property;
mod validation;

pub use property::PropertyValidatorContext;
pub use validation::ValidationContext;
