//! Namespace-qualified names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace URI plus local name, used as attribute identity.
///
/// An empty namespace URI is stored as "no namespace", so
/// `QName::namespaced("", "a") == QName::new("a")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    namespace_uri: Option<String>,
    local_name: String,
}

impl QName {
    /// Create a name without namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            namespace_uri: None,
            local_name: local_name.into(),
        }
    }

    /// Create a name in the given namespace.
    #[must_use]
    pub fn namespaced(namespace_uri: impl Into<String>, local_name: impl Into<String>) -> Self {
        let namespace_uri = namespace_uri.into();
        Self {
            namespace_uri: (!namespace_uri.is_empty()).then_some(namespace_uri),
            local_name: local_name.into(),
        }
    }

    /// Create a name from an optional namespace URI.
    #[must_use]
    pub fn with_optional_namespace(
        namespace_uri: Option<&str>,
        local_name: impl Into<String>,
    ) -> Self {
        match namespace_uri {
            Some(ns) => Self::namespaced(ns, local_name),
            None => Self::new(local_name),
        }
    }

    /// Get the namespace URI, `None` for no namespace.
    #[must_use]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// Get the local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Check if the name has a namespace.
    #[must_use]
    pub fn has_namespace(&self) -> bool {
        self.namespace_uri.is_some()
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{namespace}local` or just `local`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_uri {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

impl From<&str> for QName {
    fn from(local_name: &str) -> Self {
        QName::new(local_name)
    }
}

impl From<String> for QName {
    fn from(local_name: String) -> Self {
        QName::new(local_name)
    }
}

impl From<&QName> for QName {
    fn from(name: &QName) -> Self {
        name.clone()
    }
}

impl From<(&str, &str)> for QName {
    /// `(namespace_uri, local_name)`
    fn from((namespace_uri, local_name): (&str, &str)) -> Self {
        QName::namespaced(namespace_uri, local_name)
    }
}
