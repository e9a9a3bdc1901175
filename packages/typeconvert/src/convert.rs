//! Typed helpers layered on [`TypeConverterRegistry::convert`].
//!
//! Each helper converts through the registry and unwraps the resulting
//! variant. A converter that returns a value of the wrong type is reported
//! as `NoConverterFound`.

use crate::error::{ConvertError, Result};
use crate::registry::TypeConverterRegistry;
use crate::types::{Value, ValueType};

macro_rules! typed_helper {
    ($(#[$doc:meta])* $name:ident -> $ty:ty, $variant:ident) => {
        $(#[$doc])*
        ///
        /// # Errors
        /// Propagates the registry's conversion error.
        pub fn $name(registry: &TypeConverterRegistry, value: &Value) -> Result<$ty> {
            match registry.convert(value, ValueType::$variant)? {
                Value::$variant(v) => Ok(v),
                other => Err(ConvertError::NoConverterFound {
                    source_type: other.value_type(),
                    destination_type: ValueType::$variant,
                }),
            }
        }
    };
}

typed_helper!(
    /// Convert a value to `bool`.
    to_bool -> bool, Bool
);
typed_helper!(
    /// Convert a value to a byte.
    to_byte -> u8, Byte
);
typed_helper!(
    /// Convert a value to `char`.
    to_char -> char, Char
);
typed_helper!(
    /// Convert a value to `i16`.
    to_short -> i16, Short
);
typed_helper!(
    /// Convert a value to `i32`.
    to_int -> i32, Int
);
typed_helper!(
    /// Convert a value to `i64`.
    to_long -> i64, Long
);
typed_helper!(
    /// Convert a value to `f32`.
    to_float -> f32, Float
);
typed_helper!(
    /// Convert a value to `f64`.
    to_double -> f64, Double
);
typed_helper!(
    /// Convert a value to its string form.
    to_string -> String, String
);
