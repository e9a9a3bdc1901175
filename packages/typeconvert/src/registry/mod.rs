//! Converter registry for dispatching conversions by type descriptor.
//!
//! Exact rules are keyed by `(source, destination)`. Any-source rules are
//! keyed by destination only and are tried in registration order, each
//! guarded by a predicate over the source value.

mod config;
mod core;
pub mod predicate;
mod rule;

pub use config::create_default_registry;
pub use core::TypeConverterRegistry;
pub use rule::{ConverterFn, Dispatch, PredicateFn, RuleKind, TypeConverterRegistrar};
