//! End-to-end tests for the converter registry with the built-in
//! registrars and a custom registrar installed.

use microcommons_typeconvert::{
    create_default_registry, predicate, ConvertError, Dispatch, RegistryConfig, Result,
    TypeConverterRegistrar, TypeConverterRegistry, Value, ValueType,
};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn default_registry() -> TypeConverterRegistry {
    init_tracing();
    create_default_registry(RegistryConfig::default()).expect("built-in registrars are consistent")
}

/// One sample value per type.
fn samples() -> Vec<Value> {
    vec![
        Value::Bool(true),
        Value::Byte(7),
        Value::Char('c'),
        Value::Short(-3),
        Value::Int(42),
        Value::Long(1 << 40),
        Value::Float(1.5),
        Value::Double(-2.25),
        Value::from("text"),
        Value::BoolArray(vec![true, false]),
        Value::ByteArray(vec![1, 2]),
        Value::CharArray(vec!['a']),
        Value::ShortArray(vec![1]),
        Value::IntArray(vec![1, 2, 3]),
        Value::LongArray(vec![]),
        Value::FloatArray(vec![0.5]),
        Value::DoubleArray(vec![0.25, 0.5]),
        Value::StringArray(vec!["x".to_string()]),
        Value::ObjectArray(vec![Value::Int(1), Value::from("y")]),
        Value::List(vec![Value::Int(1)]),
        Value::ordered_set(vec![Value::Int(2), Value::Int(1)]),
        Value::sorted_set(vec![Value::Int(2), Value::Int(1)]),
    ]
}

#[test]
fn identity_short_circuit_for_every_type() {
    let registry = default_registry();
    for value in samples() {
        let converted = registry.convert(&value, value.value_type()).unwrap();
        assert_eq!(converted, value);
        assert_eq!(
            registry.dispatch(&value, value.value_type()),
            Some(Dispatch::Identity)
        );
    }
}

#[test]
fn primitive_array_targets_keep_length_for_all_shapes() {
    let registry = default_registry();
    let numeric_targets = [
        ValueType::BoolArray,
        ValueType::ByteArray,
        ValueType::ShortArray,
        ValueType::IntArray,
        ValueType::LongArray,
        ValueType::FloatArray,
        ValueType::DoubleArray,
        ValueType::StringArray,
    ];

    let array = Value::IntArray(vec![1, 0, 1]);
    let collection = Value::List(vec![Value::Int(1), Value::Int(0), Value::Int(1)]);
    let scalar = Value::Int(1);

    for target in numeric_targets {
        let from_array = registry.convert(&array, target).unwrap();
        let from_collection = registry.convert(&collection, target).unwrap();
        let from_scalar = registry.convert(&scalar, target).unwrap();

        assert_eq!(from_array.len(), Some(3), "array -> {target}");
        assert_eq!(from_collection.len(), Some(3), "collection -> {target}");
        assert_eq!(from_scalar.len(), Some(1), "scalar -> {target}");
        assert_eq!(from_array, from_collection, "order preserved for {target}");
    }

    // char[] accepts code points
    let chars = registry
        .convert(&Value::IntArray(vec![104, 105]), ValueType::CharArray)
        .unwrap();
    assert_eq!(chars, Value::CharArray(vec!['h', 'i']));
}

#[test]
fn array_order_preserved_through_strings() {
    let registry = default_registry();
    let result = registry
        .convert(&Value::DoubleArray(vec![3.5, -1.0, 2.0]), ValueType::StringArray)
        .unwrap();
    assert_eq!(
        result,
        Value::StringArray(vec!["3.5".to_string(), "-1".to_string(), "2".to_string()])
    );
}

#[test]
fn int_array_to_list_scenario() {
    let registry = default_registry();
    let result = registry
        .convert(&Value::IntArray(vec![1, 2, 3]), ValueType::List)
        .unwrap();
    assert_eq!(
        result,
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn element_failure_has_no_partial_output() {
    let registry = default_registry();
    let source = Value::StringArray(vec!["1".into(), "2".into(), "three".into()]);
    let err = registry.convert(&source, ValueType::IntArray).unwrap_err();
    assert!(matches!(err, ConvertError::ElementConversion { index: 2, .. }));
}

#[test]
fn no_converter_for_unrelated_types() {
    let registry = default_registry();
    let err = registry
        .convert(&Value::IntArray(vec![1]), ValueType::Int)
        .unwrap_err();
    assert!(matches!(err, ConvertError::NoConverterFound { .. }));
}

/// Registrar mapping lists of strings to a comma separated string.
struct JoinRegistrar;

impl TypeConverterRegistrar for JoinRegistrar {
    fn name(&self) -> &str {
        "join"
    }

    fn register_type_converters(&self, registry: &mut TypeConverterRegistry) -> Result<()> {
        registry.register(ValueType::StringArray, ValueType::String, |value, _| {
            Ok(Value::String(match value {
                Value::StringArray(items) => items.join(","),
                other => other.to_string(),
            }))
        })
    }
}

#[test]
fn custom_registrar_exact_rule_applies() {
    let mut registry = default_registry();
    registry.install(&JoinRegistrar).unwrap();

    let result = registry
        .convert(
            &Value::StringArray(vec!["a".into(), "b".into()]),
            ValueType::String,
        )
        .unwrap();
    assert_eq!(result, Value::from("a,b"));

    // Installing twice clashes under the default policy
    let err = registry.install(&JoinRegistrar).unwrap_err();
    assert!(matches!(err, ConvertError::DuplicateRule { .. }));
}

#[test]
fn custom_any_source_rule_after_builtin_rules() {
    let mut registry = default_registry();
    registry.register_any_source(ValueType::Int, predicate::is_collection, |value, _| {
        Ok(Value::Int(value.len().unwrap_or(0) as i32))
    });

    let size = registry
        .convert(&Value::List(vec![Value::Null, Value::Null]), ValueType::Int)
        .unwrap();
    assert_eq!(size, Value::Int(2));
}

#[test]
fn finished_registry_can_be_shared() {
    let registry = std::sync::Arc::new(default_registry());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .convert(&Value::Int(i), ValueType::String)
                    .map(|v| v.to_string())
            })
        })
        .collect();

    let mut results: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    results.sort();
    assert_eq!(results, vec!["0", "1", "2", "3"]);
}
