//! Insertion-ordered attribute storage.

use indexmap::IndexMap;

use crate::change::Change;
use crate::qname::QName;

/// Attributes of one element, keyed by [`QName`].
///
/// Iteration follows insertion order. Overwriting a value keeps the
/// attribute's position; new attributes are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: IndexMap<QName, String>,
}

impl AttributeMap {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &QName) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check if an attribute is present.
    #[must_use]
    pub fn contains(&self, name: &QName) -> bool {
        self.entries.contains_key(name)
    }

    /// Set or remove an attribute.
    ///
    /// `None` or an empty value removes the attribute. Setting the value
    /// an attribute already has is reported as [`Change::Unchanged`].
    pub fn set(&mut self, name: QName, value: Option<&str>) -> Change {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return self.remove(&name),
        };

        match self.entries.get_mut(&name) {
            Some(existing) if existing == value => Change::Unchanged,
            Some(existing) => {
                value.clone_into(existing);
                Change::Changed
            }
            None => {
                self.entries.insert(name, value.to_string());
                Change::Changed
            }
        }
    }

    /// Remove an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &QName) -> Change {
        self.entries.shift_remove(name).is_some().into()
    }

    /// Remove all attributes.
    pub fn clear(&mut self) -> Change {
        if self.entries.is_empty() {
            return Change::Unchanged;
        }
        self.entries.clear();
        Change::Changed
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&QName, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &QName> {
        self.entries.keys()
    }

    /// Owned copy of all attributes.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<QName, String> {
        self.entries.clone()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a QName, &'a String);
    type IntoIter = indexmap::map::Iter<'a, QName, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
