//! Conversions to array types.
//!
//! Every primitive array type and `string[]` accepts three source shapes:
//!
//! - an array: converted element by element
//! - a collection: converted element by element in iteration order
//! - anything else: wrapped into a single-element array
//!
//! Exact rules win over this dispatch: `String` to `char[]` yields one
//! element per character and `String` to `byte[]` decodes Base64, so both
//! can return several elements for a single scalar.
//!
//! Elements go through the registry, so `["1", "2"]` becomes `[1, 2]` when
//! the scalar rules are installed. The first failing element aborts the
//! whole conversion.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::convert;
use crate::error::{ConvertError, Result};
use crate::registry::{predicate, TypeConverterRegistrar, TypeConverterRegistry};
use crate::types::{Value, ValueType};

/// Registers any-source rules for every array type plus the
/// `char[] <-> string` and `byte[] <-> string` (Base64) exact rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayRegistrar;

impl TypeConverterRegistrar for ArrayRegistrar {
    fn register_type_converters(&self, registry: &mut TypeConverterRegistry) -> Result<()> {
        registry.register(ValueType::CharArray, ValueType::String, |value, _| match value {
            Value::CharArray(chars) => Ok(Value::String(chars.iter().collect())),
            other => Err(mismatch(other, ValueType::String)),
        })?;
        registry.register(ValueType::String, ValueType::CharArray, |value, _| match value {
            Value::String(s) => Ok(Value::CharArray(s.chars().collect())),
            other => Err(mismatch(other, ValueType::CharArray)),
        })?;
        registry.register(ValueType::ByteArray, ValueType::String, |value, _| match value {
            Value::ByteArray(bytes) => Ok(Value::String(STANDARD.encode(bytes))),
            other => Err(mismatch(other, ValueType::String)),
        })?;
        registry.register(ValueType::String, ValueType::ByteArray, |value, _| match value {
            Value::String(s) => STANDARD
                .decode(s.trim())
                .map(Value::ByteArray)
                .map_err(|_| ConvertError::Parse {
                    value: s.clone(),
                    target: ValueType::ByteArray,
                }),
            other => Err(mismatch(other, ValueType::ByteArray)),
        })?;

        registry.register_any_source(ValueType::BoolArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_bool).map(Value::BoolArray)
        });
        registry.register_any_source(ValueType::ByteArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_byte).map(Value::ByteArray)
        });
        registry.register_any_source(ValueType::CharArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_char).map(Value::CharArray)
        });
        registry.register_any_source(ValueType::ShortArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_short).map(Value::ShortArray)
        });
        registry.register_any_source(ValueType::IntArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_int).map(Value::IntArray)
        });
        registry.register_any_source(ValueType::LongArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_long).map(Value::LongArray)
        });
        registry.register_any_source(ValueType::FloatArray, predicate::non_null, |value, registry| {
            to_array(value, registry, convert::to_float).map(Value::FloatArray)
        });
        registry.register_any_source(
            ValueType::DoubleArray,
            predicate::non_null,
            |value, registry| to_array(value, registry, convert::to_double).map(Value::DoubleArray),
        );
        registry.register_any_source(
            ValueType::StringArray,
            predicate::non_null,
            |value, registry| to_array(value, registry, convert::to_string).map(Value::StringArray),
        );

        // object[] keeps elements as they are
        registry.register_any_source(ValueType::ObjectArray, predicate::non_null, |value, _| {
            Ok(Value::ObjectArray(
                value.elements().unwrap_or_else(|| vec![value.clone()]),
            ))
        });

        Ok(())
    }
}

/// Three-way conversion of a source value into a vector of `T`.
///
/// `convert_element` converts a single boxed element through the registry.
pub fn to_array<T>(
    value: &Value,
    registry: &TypeConverterRegistry,
    convert_element: fn(&TypeConverterRegistry, &Value) -> Result<T>,
) -> Result<Vec<T>> {
    if value.is_array() {
        // Array: element by element
        let elements = value.elements().unwrap_or_default();
        convert_each(&elements, registry, convert_element)
    } else if value.is_collection() {
        // Collection: element by element, iteration order
        let elements = value.elements().unwrap_or_default();
        convert_each(&elements, registry, convert_element)
    } else {
        // Scalar: single-element array
        Ok(vec![convert_element(registry, value)?])
    }
}

fn convert_each<T>(
    elements: &[Value],
    registry: &TypeConverterRegistry,
    convert_element: fn(&TypeConverterRegistry, &Value) -> Result<T>,
) -> Result<Vec<T>> {
    let mut converted = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let item =
            convert_element(registry, element).map_err(|err| ConvertError::element(index, err))?;
        converted.push(item);
    }
    Ok(converted)
}

fn mismatch(value: &Value, destination: ValueType) -> ConvertError {
    ConvertError::NoConverterFound {
        source_type: value.value_type(),
        destination_type: destination,
    }
}
