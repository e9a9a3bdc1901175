//! Conversions to collection types.

use crate::error::Result;
use crate::registry::{TypeConverterRegistrar, TypeConverterRegistry};
use crate::types::{Value, ValueType};

/// Array types boxed into collections by exact rules.
const ARRAY_TYPES: [ValueType; 10] = [
    ValueType::BoolArray,
    ValueType::ByteArray,
    ValueType::CharArray,
    ValueType::ShortArray,
    ValueType::IntArray,
    ValueType::LongArray,
    ValueType::FloatArray,
    ValueType::DoubleArray,
    ValueType::StringArray,
    ValueType::ObjectArray,
];

/// Registers collection conversions.
///
/// - exact rules from every array type to `List`, `OrderedSet` and
///   `SortedSet`, boxing the elements in order
/// - any-source rules to the same three types for every non-array value:
///   a collection is copied, anything else becomes a one-element collection
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionRegistrar;

impl TypeConverterRegistrar for CollectionRegistrar {
    fn register_type_converters(&self, registry: &mut TypeConverterRegistry) -> Result<()> {
        for source in ARRAY_TYPES {
            for destination in ValueType::COLLECTIONS {
                registry.register(source, destination, move |value, _| {
                    Ok(collect_into(destination, value.elements().unwrap_or_default()))
                })?;
            }
        }

        for destination in ValueType::COLLECTIONS {
            registry.register_any_source(
                destination,
                |value| !value.is_array() && !value.is_null(),
                move |value, _| {
                    let items = value.elements().unwrap_or_else(|| vec![value.clone()]);
                    Ok(collect_into(destination, items))
                },
            );
        }

        Ok(())
    }
}

/// Build a collection of the given kind from boxed items.
fn collect_into(destination: ValueType, items: Vec<Value>) -> Value {
    match destination {
        ValueType::OrderedSet => Value::ordered_set(items),
        ValueType::SortedSet => Value::sorted_set(items),
        _ => Value::List(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> TypeConverterRegistry {
        let mut registry = TypeConverterRegistry::new();
        registry.install(&CollectionRegistrar).unwrap();
        registry
    }

    #[test]
    fn test_rule_counts() {
        let registry = registry();
        assert_eq!(registry.exact_rule_count(), 30);
        assert_eq!(registry.any_source_rule_count(), 3);
    }

    #[test]
    fn test_int_array_to_list_boxes_in_order() {
        let result = registry()
            .convert(&Value::IntArray(vec![1, 2, 3]), ValueType::List)
            .unwrap();
        assert_eq!(
            result,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_array_to_sets() {
        let registry = registry();
        let source = Value::IntArray(vec![3, 1, 3, 2]);
        assert_eq!(
            registry.convert(&source, ValueType::OrderedSet).unwrap(),
            Value::OrderedSet(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            registry.convert(&source, ValueType::SortedSet).unwrap(),
            Value::SortedSet(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_double_array_to_set_kinds_same_size() {
        let registry = registry();
        let source = Value::DoubleArray(vec![f64::NAN, f64::NAN, 0.0, -0.0]);
        let ordered = registry.convert(&source, ValueType::OrderedSet).unwrap();
        let sorted = registry.convert(&source, ValueType::SortedSet).unwrap();
        assert_eq!(ordered.len(), Some(3));
        assert_eq!(sorted.len(), Some(3));
    }

    #[test]
    fn test_collection_copied_between_kinds() {
        let list = Value::List(vec![Value::from("b"), Value::from("a"), Value::from("b")]);
        assert_eq!(
            registry().convert(&list, ValueType::SortedSet).unwrap(),
            Value::SortedSet(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_scalar_becomes_singleton() {
        assert_eq!(
            registry().convert(&Value::Long(5), ValueType::List).unwrap(),
            Value::List(vec![Value::Long(5)])
        );
    }
}
