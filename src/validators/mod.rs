//! Property validators.
//!
//! Every validator implements [`PropertyValidator`], which has a synchronous and an
//! asynchronous entry point. Validators whose native implementation is synchronous
//! implement [`PropertyCheck`] and inherit both entry points; natively asynchronous
//! validators bridge their synchronous entry point by blocking on the async one.
//!
//! - Simple checks: [`NotNullValidator`], [`NotEmptyValidator`], [`PredicateValidator`],
//!   [`RegularExpressionValidator`], and the natively async [`AsyncPredicateValidator`]
//! - Comparisons: [`EqualValidator`], [`NotEqualValidator`], [`GreaterThanValidator`],
//!   [`GreaterThanOrEqualValidator`], [`LessThanValidator`], [`LessThanOrEqualValidator`]
//! - Structural adaptors: [`ChildValidatorAdaptor`], [`ChildCollectionValidatorAdaptor`]
//! - [`DelegatingValidator`]: runs an inner validator only when a condition holds

mod child;
mod collection;
mod comparison;
mod conditional;
mod equality;
mod options;
mod pattern;
mod predicate;
mod provider;
mod required;
mod traits;

pub use child::ChildValidatorAdaptor;
pub use collection::ChildCollectionValidatorAdaptor;
pub use comparison::{
    Comparison, ComparisonTarget, ComparisonValidator, GreaterThanOrEqualValidator,
    GreaterThanValidator, LessThanOrEqualValidator, LessThanValidator,
};
pub use conditional::DelegatingValidator;
pub use equality::{EqualValidator, EqualityComparer, IgnoreCase, NotEqualValidator};
pub use options::{CustomMessage, MessageArgument, MessageOptions};
pub use pattern::RegularExpressionValidator;
pub use predicate::{AsyncPredicate, AsyncPredicateValidator, PredicateValidator};
pub use provider::{FixedProvider, FnProvider, ValidatorProvider};
pub use required::{NotEmptyValidator, NotNullValidator};
pub use traits::{PropertyCheck, PropertyValidator};
