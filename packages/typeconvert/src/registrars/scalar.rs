//! Conversions between scalar types.

use crate::error::{ConvertError, Result};
use crate::registry::{TypeConverterRegistrar, TypeConverterRegistry};
use crate::types::{Value, ValueType};

/// Scalar types covered by [`ScalarRegistrar`].
pub const SCALAR_TYPES: [ValueType; 9] = [
    ValueType::Bool,
    ValueType::Byte,
    ValueType::Char,
    ValueType::Short,
    ValueType::Int,
    ValueType::Long,
    ValueType::Float,
    ValueType::Double,
    ValueType::String,
];

/// Registers exact rules between every pair of scalar types.
///
/// - strings are parsed strictly (surrounding whitespace is ignored)
/// - integer narrowing is checked and fails with `OutOfRange`
/// - floating point to integer truncates toward zero
/// - `bool` maps to and from `0`/`1` (any non-zero number is `true`)
/// - `char` maps to and from its Unicode code point
///
/// There is no rule between `bool` and `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarRegistrar;

impl TypeConverterRegistrar for ScalarRegistrar {
    fn register_type_converters(&self, registry: &mut TypeConverterRegistry) -> Result<()> {
        for source in SCALAR_TYPES {
            for destination in SCALAR_TYPES {
                if source == destination || !is_supported(source, destination) {
                    continue;
                }
                registry.register(source, destination, move |value, _| {
                    convert_scalar(value, destination)
                })?;
            }
        }
        Ok(())
    }
}

fn is_supported(source: ValueType, destination: ValueType) -> bool {
    !matches!(
        (source, destination),
        (ValueType::Bool, ValueType::Char) | (ValueType::Char, ValueType::Bool)
    )
}

/// Convert a scalar value to a scalar destination type.
fn convert_scalar(value: &Value, destination: ValueType) -> Result<Value> {
    match destination {
        ValueType::Bool => to_bool(value).map(Value::Bool),
        ValueType::Byte => to_integer(value, destination).map(Value::Byte),
        ValueType::Char => to_char(value).map(Value::Char),
        ValueType::Short => to_integer(value, destination).map(Value::Short),
        ValueType::Int => to_integer(value, destination).map(Value::Int),
        ValueType::Long => to_integer(value, destination).map(Value::Long),
        ValueType::Float => to_float(value).map(Value::Float),
        ValueType::Double => to_double(value, destination).map(Value::Double),
        ValueType::String => Ok(Value::String(value.to_string())),
        other => Err(ConvertError::NoConverterFound {
            source_type: value.value_type(),
            destination_type: other,
        }),
    }
}

fn parse_error(value: &str, target: ValueType) -> ConvertError {
    ConvertError::Parse {
        value: value.to_string(),
        target,
    }
}

fn unsupported(value: &Value, target: ValueType) -> ConvertError {
    ConvertError::NoConverterFound {
        source_type: value.value_type(),
        destination_type: target,
    }
}

fn to_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(parse_error(s, ValueType::Bool))
            }
        }
        Value::Float(f) => Ok(*f != 0.0),
        Value::Double(d) => Ok(*d != 0.0),
        other => other
            .as_long()
            .map(|l| l != 0)
            .ok_or_else(|| unsupported(other, ValueType::Bool)),
    }
}

/// Widen any scalar to `i64`, reporting errors against `target`.
fn to_wide_integer(value: &Value, target: ValueType) -> Result<i64> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Char(c) => Ok(i64::from(u32::from(*c))),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| parse_error(s, target)),
        Value::Float(_) | Value::Double(_) => {
            let d = value.as_double().unwrap_or(f64::NAN);
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            if d.is_finite() && d >= i64::MIN as f64 && d < i64::MAX as f64 {
                Ok(d.trunc() as i64)
            } else {
                Err(ConvertError::OutOfRange {
                    value: d.to_string(),
                    target,
                })
            }
        }
        other => other.as_long().ok_or_else(|| unsupported(other, target)),
    }
}

fn to_integer<T: TryFrom<i64>>(value: &Value, target: ValueType) -> Result<T> {
    let wide = to_wide_integer(value, target)?;
    T::try_from(wide).map_err(|_| ConvertError::OutOfRange {
        value: wide.to_string(),
        target,
    })
}

fn to_double(value: &Value, target: ValueType) -> Result<f64> {
    match value {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Char(c) => Ok(f64::from(u32::from(*c))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| parse_error(s, target)),
        other => other.as_double().ok_or_else(|| unsupported(other, target)),
    }
}

fn to_float(value: &Value) -> Result<f32> {
    let d = to_double(value, ValueType::Float)?;
    let f = d as f32;
    if d.is_finite() && f.is_infinite() {
        return Err(ConvertError::OutOfRange {
            value: d.to_string(),
            target: ValueType::Float,
        });
    }
    Ok(f)
}

fn to_char(value: &Value) -> Result<char> {
    match value {
        Value::Char(c) => Ok(*c),
        Value::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(parse_error(s, ValueType::Char)),
            }
        }
        other => {
            let code = to_wide_integer(other, ValueType::Char)?;
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| ConvertError::OutOfRange {
                    value: code.to_string(),
                    target: ValueType::Char,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> TypeConverterRegistry {
        let mut registry = TypeConverterRegistry::new();
        registry.install(&ScalarRegistrar).unwrap();
        registry
    }

    #[test]
    fn test_rule_count() {
        // 9 * 8 ordered pairs minus bool <-> char
        assert_eq!(registry().exact_rule_count(), 70);
    }

    #[test]
    fn test_string_to_numbers() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::from(" 42 "), ValueType::Int).unwrap(),
            Value::Int(42)
        );
        assert_eq!(
            registry.convert(&Value::from("2.5"), ValueType::Double).unwrap(),
            Value::Double(2.5)
        );
        assert!(matches!(
            registry.convert(&Value::from("abc"), ValueType::Int),
            Err(ConvertError::Parse { .. })
        ));
        assert!(matches!(
            registry.convert(&Value::from("2.5"), ValueType::Long),
            Err(ConvertError::Parse { .. })
        ));
    }

    #[test]
    fn test_narrowing_is_checked() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::Int(200), ValueType::Byte).unwrap(),
            Value::Byte(200)
        );
        assert!(matches!(
            registry.convert(&Value::Int(300), ValueType::Byte),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            registry.convert(&Value::Long(i64::MAX), ValueType::Int),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            registry.convert(&Value::from("-1"), ValueType::Byte),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_float_to_integer_truncates() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::Double(-1.9), ValueType::Int).unwrap(),
            Value::Int(-1)
        );
        assert!(matches!(
            registry.convert(&Value::Double(f64::NAN), ValueType::Long),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(matches!(
            registry.convert(&Value::Double(1e300), ValueType::Float),
            Err(ConvertError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_bool_conversions() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::Int(0), ValueType::Bool).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            registry.convert(&Value::Bool(true), ValueType::Long).unwrap(),
            Value::Long(1)
        );
        assert_eq!(
            registry.convert(&Value::from("False"), ValueType::Bool).unwrap(),
            Value::Bool(false)
        );
        assert!(registry.convert(&Value::from("yes"), ValueType::Bool).is_err());
        assert!(matches!(
            registry.convert(&Value::Bool(true), ValueType::Char),
            Err(ConvertError::NoConverterFound { .. })
        ));
    }

    #[test]
    fn test_char_conversions() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::Char('A'), ValueType::Int).unwrap(),
            Value::Int(65)
        );
        assert_eq!(
            registry.convert(&Value::Int(97), ValueType::Char).unwrap(),
            Value::Char('a')
        );
        assert!(registry.convert(&Value::from("ab"), ValueType::Char).is_err());
        assert!(registry.convert(&Value::Int(-5), ValueType::Char).is_err());
    }

    #[test]
    fn test_to_string() {
        let registry = registry();
        assert_eq!(
            registry.convert(&Value::Double(1.5), ValueType::String).unwrap(),
            Value::from("1.5")
        );
        assert_eq!(
            registry.convert(&Value::Bool(true), ValueType::String).unwrap(),
            Value::from("true")
        );
    }
}
