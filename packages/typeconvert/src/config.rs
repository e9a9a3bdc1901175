//! Registry configuration.
//!
//! The only runtime knob is how the registry reacts to a second exact
//! rule for a pair that already has one. Everything else is fixed at
//! compile time.

use serde::Deserialize;

/// Initial capacity of the exact rule table of a default registry.
///
/// The built-in registrars register a little over one hundred exact rules.
pub const DEFAULT_EXACT_RULE_CAPACITY: usize = 128;

/// What to do when an exact rule for an already covered pair is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `ConvertError::DuplicateRule`.
    #[default]
    Reject,
    /// Replace the existing rule and log a warning.
    Replace,
}

/// Settings for a [`TypeConverterRegistry`](crate::TypeConverterRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl RegistryConfig {
    /// Create a config with the given duplicate policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_duplicates() {
        assert_eq!(
            RegistryConfig::default().duplicate_policy,
            DuplicatePolicy::Reject
        );
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());

        let config: RegistryConfig =
            serde_json::from_str(r#"{"duplicate_policy":"replace"}"#).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
    }
}
