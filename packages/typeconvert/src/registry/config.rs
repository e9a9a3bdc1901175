//! Default registry configuration.

use super::core::TypeConverterRegistry;
use crate::config::{RegistryConfig, DEFAULT_EXACT_RULE_CAPACITY};
use crate::error::Result;
use crate::registrars::{ArrayRegistrar, CollectionRegistrar, ScalarRegistrar};

/// Create a registry with all built-in registrars installed.
///
/// Scalar rules come first because the array and collection converters
/// convert their elements through them.
///
/// # Errors
/// Returns `DuplicateRule` if the built-in registrars clash, which only
/// happens if they are changed inconsistently.
pub fn create_default_registry(config: RegistryConfig) -> Result<TypeConverterRegistry> {
    let mut registry = TypeConverterRegistry::with_capacity(config, DEFAULT_EXACT_RULE_CAPACITY);
    registry.install(&ScalarRegistrar)?;
    registry.install(&ArrayRegistrar)?;
    registry.install(&CollectionRegistrar)?;
    Ok(registry)
}
