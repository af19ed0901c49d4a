//! Configuration and precondition errors.

/// Result alias used by every validator entry point.
pub type EngineResult<T> = Result<T, EngineError>;

/// A fatal misuse of the engine.
///
/// Unlike [`ValidationFailure`](super::ValidationFailure), an `EngineError` means the
/// rule graph itself is malformed. It is never folded into the failure list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A validation context was constructed without an instance.
    #[error("cannot validate a null instance")]
    MissingInstance,

    /// A child or collection adaptor was attached to a rule that does not read a member.
    #[error("nested validators can only be used with member rules (rule '{property}')")]
    NonMemberRule {
        /// Name of the offending rule.
        property: String,
    },

    /// A registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A typed instance could not be converted to a JSON value.
    #[error("cannot serialize instance: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a validator name that doesn't exist.
    #[error("validator '{0}' not found")]
    NotFound(String),
}
