//! Type converter registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::rule::{describe, AnySourceRule, Dispatch, ExactRule, TypeConverterRegistrar};
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::error::{ConvertError, Result};
use crate::types::{Value, ValueType};

/// Registry mapping `(source, destination)` type pairs to converters.
///
/// A registry is built once, by registering rules directly or by
/// installing registrars, and then only read. It is `Send + Sync`, so a
/// finished registry can be shared behind an `Arc`.
pub struct TypeConverterRegistry {
    config: RegistryConfig,
    exact: HashMap<(ValueType, ValueType), ExactRule>,
    any_source: HashMap<ValueType, Vec<AnySourceRule>>,
}

impl TypeConverterRegistry {
    /// Create a new empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_capacity(config, 0)
    }

    /// Create a new empty registry with room for `exact_rules` exact rules.
    #[must_use]
    pub fn with_capacity(config: RegistryConfig, exact_rules: usize) -> Self {
        Self {
            config,
            exact: HashMap::with_capacity(exact_rules),
            any_source: HashMap::new(),
        }
    }

    /// Get the configuration of this registry.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register an exact rule for `(source, destination)`.
    ///
    /// # Errors
    /// Returns `DuplicateRule` if a rule for the pair exists and the
    /// duplicate policy is [`DuplicatePolicy::Reject`].
    pub fn register<F>(
        &mut self,
        source: ValueType,
        destination: ValueType,
        converter: F,
    ) -> Result<()>
    where
        F: Fn(&Value, &TypeConverterRegistry) -> Result<Value> + Send + Sync + 'static,
    {
        let key = (source, destination);
        if self.exact.contains_key(&key) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(ConvertError::DuplicateRule {
                        source_type: source,
                        destination_type: destination,
                    });
                }
                DuplicatePolicy::Replace => {
                    tracing::warn!(
                        rule = %describe(Some(source), destination),
                        "Replacing existing converter"
                    );
                }
            }
        }

        self.exact.insert(
            key,
            ExactRule {
                converter: Arc::new(converter),
            },
        );
        tracing::debug!(rule = %describe(Some(source), destination), "Registered converter");
        Ok(())
    }

    /// Register an any-source rule for `destination`.
    ///
    /// The rule is consulted after the exact lookup failed, in registration
    /// order with the other any-source rules of the same destination, and
    /// only for values accepted by `predicate`.
    pub fn register_any_source<P, F>(&mut self, destination: ValueType, predicate: P, converter: F)
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
        F: Fn(&Value, &TypeConverterRegistry) -> Result<Value> + Send + Sync + 'static,
    {
        let rules = self.any_source.entry(destination).or_default();
        rules.push(AnySourceRule {
            predicate: Arc::new(predicate),
            converter: Arc::new(converter),
        });
        tracing::debug!(
            rule = %describe(None, destination),
            position = rules.len() - 1,
            "Registered any-source converter"
        );
    }

    /// Run a registrar against this registry.
    ///
    /// # Errors
    /// Propagates the registrar's first registration error.
    pub fn install<R>(&mut self, registrar: &R) -> Result<()>
    where
        R: TypeConverterRegistrar + ?Sized,
    {
        let before = self.exact_rule_count() + self.any_source_rule_count();
        registrar.register_type_converters(self)?;
        let after = self.exact_rule_count() + self.any_source_rule_count();
        tracing::debug!(
            registrar = registrar.name(),
            rules = after.saturating_sub(before),
            "Installed registrar"
        );
        Ok(())
    }

    /// Convert `value` to `destination`.
    ///
    /// Dispatch order:
    /// 1. the value already has the destination type: returned unchanged
    /// 2. an exact rule for `(value type, destination)`
    /// 3. the first any-source rule for `destination` accepting the value
    ///
    /// # Errors
    /// Returns `NoConverterFound` if nothing matches, or the converter's
    /// own error.
    pub fn convert(&self, value: &Value, destination: ValueType) -> Result<Value> {
        match self.dispatch(value, destination) {
            Some(Dispatch::Identity) => {
                tracing::trace!(value_type = %destination, "Value already has destination type");
                Ok(value.clone())
            }
            Some(Dispatch::Exact) => {
                let rule = self.exact_rule(value.value_type(), destination)?;
                (rule.converter)(value, self)
            }
            Some(Dispatch::AnySource(index)) => {
                let rule = self
                    .any_source
                    .get(&destination)
                    .and_then(|rules| rules.get(index))
                    .ok_or_else(|| not_found(value.value_type(), destination))?;
                (rule.converter)(value, self)
            }
            None => {
                tracing::debug!(
                    source = %value.value_type(),
                    destination = %destination,
                    "No converter found"
                );
                Err(not_found(value.value_type(), destination))
            }
        }
    }

    /// Determine how [`convert`](Self::convert) would handle the request
    /// without running a converter.
    #[must_use]
    pub fn dispatch(&self, value: &Value, destination: ValueType) -> Option<Dispatch> {
        let source = value.value_type();
        if source == destination {
            return Some(Dispatch::Identity);
        }

        if self.exact.contains_key(&(source, destination)) {
            return Some(Dispatch::Exact);
        }

        self.any_source
            .get(&destination)?
            .iter()
            .position(|rule| (rule.predicate)(value))
            .map(Dispatch::AnySource)
    }

    /// Check if an exact rule exists for the pair.
    #[must_use]
    pub fn has_exact_rule(&self, source: ValueType, destination: ValueType) -> bool {
        self.exact.contains_key(&(source, destination))
    }

    /// Number of registered exact rules.
    #[must_use]
    pub fn exact_rule_count(&self) -> usize {
        self.exact.len()
    }

    /// Number of registered any-source rules over all destinations.
    #[must_use]
    pub fn any_source_rule_count(&self) -> usize {
        self.any_source.values().map(Vec::len).sum()
    }

    /// Remove every rule, keeping the configuration.
    pub fn clear(&mut self) {
        self.exact.clear();
        self.any_source.clear();
        tracing::debug!("Cleared converter registry");
    }

    fn exact_rule(&self, source: ValueType, destination: ValueType) -> Result<&ExactRule> {
        self.exact
            .get(&(source, destination))
            .ok_or_else(|| not_found(source, destination))
    }
}

fn not_found(source: ValueType, destination: ValueType) -> ConvertError {
    ConvertError::NoConverterFound {
        source_type: source,
        destination_type: destination,
    }
}

impl Default for TypeConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverterRegistry")
            .field("config", &self.config)
            .field("exact_rules", &self.exact_rule_count())
            .field("any_source_rules", &self.any_source_rule_count())
            .finish()
    }
}
