//! Elements and their attribute container.

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;
use microcommons_typeconvert::{TypeConverterRegistry, Value, ValueType};
use tracing::debug;

use crate::attributes::AttributeMap;
use crate::change::Change;
use crate::node::MicroNode;
use crate::parent::MicroParent;
use crate::qname::QName;

/// An element with optional namespace, attributes and children.
///
/// The tag name may carry a prefix (`xs:element`); the namespace URI is
/// stored separately and is what namespace checks compare against.
#[derive(Debug, Clone, PartialEq)]
pub struct MicroElement {
    namespace_uri: Option<String>,
    tag_name: String,
    attributes: AttributeMap,
    children: Vec<MicroNode>,
}

impl MicroElement {
    /// Create an element without namespace.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            namespace_uri: None,
            tag_name: tag_name.into(),
            attributes: AttributeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an element in a namespace. An empty URI means no namespace.
    #[must_use]
    pub fn with_namespace(namespace_uri: &str, tag_name: impl Into<String>) -> Self {
        let mut element = Self::new(tag_name);
        element.set_namespace_uri(Some(namespace_uri));
        element
    }

    // -- naming --

    /// Get the tag name, including any prefix.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Tag name without prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.tag_name
            .split_once(':')
            .map_or(self.tag_name.as_str(), |(_, local)| local)
    }

    /// Get the prefix of the tag name, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.tag_name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Get the namespace URI, `None` for no namespace.
    #[must_use]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    pub fn set_namespace_uri(&mut self, namespace_uri: Option<&str>) -> Change {
        let namespace_uri = namespace_uri.filter(|ns| !ns.is_empty());
        if self.namespace_uri.as_deref() == namespace_uri {
            return Change::Unchanged;
        }
        self.namespace_uri = namespace_uri.map(str::to_string);
        Change::Changed
    }

    /// Check if the element is in a namespace.
    #[must_use]
    pub fn has_namespace(&self) -> bool {
        self.namespace_uri.is_some()
    }

    /// Check the namespace URI; an empty argument matches "no namespace".
    #[must_use]
    pub fn has_namespace_uri(&self, namespace_uri: &str) -> bool {
        self.namespace_uri.as_deref().unwrap_or_default() == namespace_uri
    }

    /// Check the tag name, including any prefix.
    #[must_use]
    pub fn has_tag_name(&self, tag_name: &str) -> bool {
        self.tag_name == tag_name
    }

    /// Check the tag name ignoring ASCII case.
    #[must_use]
    pub fn has_tag_name_ignore_case(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }

    /// Check the tag name without prefix.
    #[must_use]
    pub fn has_local_name(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    // -- attributes --

    /// Set an attribute; `None` or an empty value removes it.
    pub fn set_attribute<'v>(
        &mut self,
        name: impl Into<QName>,
        value: impl Into<Option<&'v str>>,
    ) -> Change {
        self.attributes.set(name.into(), value.into())
    }

    /// Set an attribute from any displayable value.
    pub fn set_attribute_value(&mut self, name: impl Into<QName>, value: impl Display) -> Change {
        self.attributes.set(name.into(), Some(&value.to_string()))
    }

    /// Set an attribute from a dynamic value, converted to a string by the
    /// registry. [`Value::Null`] removes the attribute.
    ///
    /// # Errors
    /// Propagates the registry's conversion error.
    pub fn set_attribute_with_conversion(
        &mut self,
        name: impl Into<QName>,
        value: &Value,
        registry: &TypeConverterRegistry,
    ) -> microcommons_typeconvert::Result<Change> {
        let name = name.into();
        if value.is_null() {
            return Ok(self.attributes.remove(&name));
        }
        let text = microcommons_typeconvert::convert::to_string(registry, value)?;
        Ok(self.attributes.set(name, Some(&text)))
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute_value(&self, name: impl Into<QName>) -> Option<&str> {
        self.attributes.get(&name.into())
    }

    /// Check if an attribute is present.
    #[must_use]
    pub fn has_attribute(&self, name: impl Into<QName>) -> bool {
        self.attributes.contains(&name.into())
    }

    /// Check if the element has any attribute.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Attribute as `i32`, or `default` when missing or not an integer.
    #[must_use]
    pub fn attribute_value_as_int(&self, name: impl Into<QName>, default: i32) -> i32 {
        parse_or(self.attribute_value(name), default)
    }

    /// Attribute as `i64`, or `default` when missing or not an integer.
    #[must_use]
    pub fn attribute_value_as_long(&self, name: impl Into<QName>, default: i64) -> i64 {
        parse_or(self.attribute_value(name), default)
    }

    /// Attribute as `f32`, or `default` when missing or not a number.
    #[must_use]
    pub fn attribute_value_as_float(&self, name: impl Into<QName>, default: f32) -> f32 {
        parse_or(self.attribute_value(name), default)
    }

    /// Attribute as `f64`, or `default` when missing or not a number.
    #[must_use]
    pub fn attribute_value_as_double(&self, name: impl Into<QName>, default: f64) -> f64 {
        parse_or(self.attribute_value(name), default)
    }

    /// Attribute as `bool`: `true`/`false` in any case, otherwise `default`.
    #[must_use]
    pub fn attribute_value_as_bool(&self, name: impl Into<QName>, default: bool) -> bool {
        match self.attribute_value(name).map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }

    /// Convert an attribute through the registry.
    ///
    /// Returns `Ok(None)` when the attribute is missing.
    ///
    /// # Errors
    /// Fails when the registry cannot convert the value; there is no
    /// default to fall back to.
    pub fn attribute_value_with_conversion(
        &self,
        name: impl Into<QName>,
        destination: ValueType,
        registry: &TypeConverterRegistry,
    ) -> microcommons_typeconvert::Result<Option<Value>> {
        let name = name.into();
        let Some(raw) = self.attributes.get(&name) else {
            return Ok(None);
        };
        debug!(attribute = %name, %destination, "Converting attribute value");
        registry.convert(&Value::from(raw), destination).map(Some)
    }

    pub fn remove_attribute(&mut self, name: impl Into<QName>) -> Change {
        self.attributes.remove(&name.into())
    }

    pub fn remove_all_attributes(&mut self) -> Change {
        self.attributes.clear()
    }

    /// Get the attribute container.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Attribute names in insertion order.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&QName> {
        self.attributes.names().collect()
    }

    /// Owned copy of all attributes in insertion order.
    #[must_use]
    pub fn all_attributes(&self) -> IndexMap<QName, String> {
        self.attributes.to_map()
    }

    pub fn for_all_attributes<F>(&self, mut f: F)
    where
        F: FnMut(&QName, &str),
    {
        for (name, value) in self.attributes.iter() {
            f(name, value);
        }
    }
}

impl MicroParent for MicroElement {
    fn children(&self) -> &[MicroNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<MicroNode> {
        &mut self.children
    }
}

/// Lenient parse: surrounding whitespace is ignored, failures give `default`.
fn parse_or<T: FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use microcommons_typeconvert::{create_default_registry, ConvertError, RegistryConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_naming() {
        let element = MicroElement::with_namespace("urn:x", "x:item");
        assert_eq!(element.local_name(), "item");
        assert_eq!(element.prefix(), Some("x"));
        assert!(element.has_namespace_uri("urn:x"));
        assert!(element.has_tag_name_ignore_case("X:ITEM"));
        assert!(MicroElement::new("a").has_namespace_uri(""));
        assert!(!MicroElement::with_namespace("", "a").has_namespace());
    }

    #[test]
    fn test_set_namespace_uri_change() {
        let mut element = MicroElement::new("a");
        assert!(element.set_namespace_uri(Some("urn:x")).is_changed());
        assert!(element.set_namespace_uri(Some("urn:x")).is_unchanged());
        assert!(element.set_namespace_uri(Some("")).is_changed());
        assert_eq!(element.namespace_uri(), None);
    }

    #[test]
    fn test_set_and_remove_attribute() {
        let mut element = MicroElement::new("a");
        assert!(element.set_attribute("id", "v").is_changed());
        assert_eq!(element.attribute_value("id"), Some("v"));

        assert!(element.set_attribute("id", None).is_changed());
        assert!(!element.has_attribute("id"));
        assert!(element.remove_attribute("id").is_unchanged());
    }

    #[test]
    fn test_typed_getters_are_lenient() {
        let mut element = MicroElement::new("a");
        element.set_attribute("n", "abc");
        element.set_attribute("m", " 17 ");
        element.set_attribute("b", "TRUE");
        element.set_attribute("d", "2.5");

        assert_eq!(element.attribute_value_as_int("n", -1), -1);
        assert_eq!(element.attribute_value_as_int("missing", 9), 9);
        assert_eq!(element.attribute_value_as_int("m", 0), 17);
        assert_eq!(element.attribute_value_as_long("m", 0), 17);
        assert!(element.attribute_value_as_bool("b", false));
        assert!(element.attribute_value_as_bool("n", true));
        assert_eq!(element.attribute_value_as_double("d", 0.0), 2.5);
        assert_eq!(element.attribute_value_as_float("n", 1.5), 1.5);
    }

    #[test]
    fn test_conversion_is_strict() {
        let registry = create_default_registry(RegistryConfig::default()).unwrap();
        let mut element = MicroElement::new("a");
        element.set_attribute("n", "42");
        element.set_attribute("bad", "abc");

        assert_eq!(
            element
                .attribute_value_with_conversion("n", ValueType::Int, &registry)
                .unwrap(),
            Some(Value::Int(42))
        );
        assert_eq!(
            element
                .attribute_value_with_conversion("missing", ValueType::Int, &registry)
                .unwrap(),
            None
        );
        let err = element
            .attribute_value_with_conversion("bad", ValueType::Int, &registry)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }

    #[test]
    fn test_typed_setters() {
        let registry = create_default_registry(RegistryConfig::default()).unwrap();
        let mut element = MicroElement::new("a");
        element.set_attribute_value("count", 3);
        assert_eq!(element.attribute_value("count"), Some("3"));

        element
            .set_attribute_with_conversion("flag", &Value::Bool(true), &registry)
            .unwrap();
        assert_eq!(element.attribute_value("flag"), Some("true"));

        let change = element
            .set_attribute_with_conversion("flag", &Value::Null, &registry)
            .unwrap();
        assert!(change.is_changed());
        assert!(!element.has_attribute("flag"));
    }

    #[test]
    fn test_attribute_views() {
        let mut element = MicroElement::new("a");
        element.set_attribute("b", "1");
        element.set_attribute(("urn:x", "c"), "2");

        let names: Vec<String> = element.attribute_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["b", "{urn:x}c"]);

        let mut visited = Vec::new();
        element.for_all_attributes(|name, value| visited.push(format!("{name}={value}")));
        assert_eq!(visited, vec!["b=1", "{urn:x}c=2"]);

        let copy = element.all_attributes();
        assert!(element.remove_all_attributes().is_changed());
        assert_eq!(copy.len(), 2);
        assert_eq!(element.attribute_count(), 0);
        assert!(element.remove_all_attributes().is_unchanged());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut element = MicroElement::new("a");
        element.append_element("b").set_attribute("x", "1");
        let mut copy = element.clone();
        copy.first_child_element_mut(None).unwrap().set_attribute("x", "2");

        let original = element.first_child_element(None).unwrap();
        assert_eq!(original.attribute_value("x"), Some("1"));
        assert_ne!(copy, element);
    }
}
