//! Error types for validation runs.
//!
//! Two kinds of outcome are kept apart:
//! - [`ValidationFailure`] / [`ValidationFailures`]: data-dependent results that are
//!   returned as ordinary values and accumulated across the whole run.
//! - [`EngineError`]: a malformed rule graph or misuse of the engine. These abort the
//!   current validation call.

mod engine_error;
mod failure;

pub use engine_error::{EngineError, EngineResult, RegistryError};
pub use failure::{ValidationFailure, ValidationFailures};
