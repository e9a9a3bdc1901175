//! Rule and registrar definitions.

use std::sync::Arc;

use super::core::TypeConverterRegistry;
use crate::error::Result;
use crate::types::{Value, ValueType};

/// Conversion function stored in the registry.
///
/// Receives the registry so element conversions can go through the same
/// dispatch.
pub type ConverterFn = dyn Fn(&Value, &TypeConverterRegistry) -> Result<Value> + Send + Sync;

/// Applicability check of an any-source rule.
pub type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// Kind of a registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Keyed by the exact `(source, destination)` pair.
    Exact,
    /// Keyed by destination, guarded by a predicate on the source.
    AnySourceFixedDestination,
}

/// How `convert` would handle a given value and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The value already has the destination type.
    Identity,
    /// An exact rule applies.
    Exact,
    /// The any-source rule at this registration index applies.
    AnySource(usize),
}

impl Dispatch {
    /// Rule kind behind this dispatch, `None` for identity.
    pub fn rule_kind(self) -> Option<RuleKind> {
        match self {
            Dispatch::Identity => None,
            Dispatch::Exact => Some(RuleKind::Exact),
            Dispatch::AnySource(_) => Some(RuleKind::AnySourceFixedDestination),
        }
    }
}

/// An any-source rule: predicate plus converter for one destination.
#[derive(Clone)]
pub(crate) struct AnySourceRule {
    pub(crate) predicate: Arc<PredicateFn>,
    pub(crate) converter: Arc<ConverterFn>,
}

/// Exact rule for one `(source, destination)` pair.
#[derive(Clone)]
pub(crate) struct ExactRule {
    pub(crate) converter: Arc<ConverterFn>,
}

/// A component that contributes rules to a registry.
///
/// Registrars are installed explicitly at startup with
/// [`TypeConverterRegistry::install`]; the registry never discovers them.
pub trait TypeConverterRegistrar {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Register this registrar's rules.
    ///
    /// # Errors
    /// Returns `DuplicateRule` if a rule clashes with one already present
    /// and the registry rejects duplicates.
    fn register_type_converters(&self, registry: &mut TypeConverterRegistry) -> Result<()>;
}

/// Identifies a rule in log output.
pub(crate) fn describe(source: Option<ValueType>, destination: ValueType) -> String {
    match source {
        Some(source) => format!("{source} -> {destination}"),
        None => format!("* -> {destination}"),
    }
}
