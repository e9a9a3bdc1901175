//! Core value model: the runtime type descriptor and the dynamic value.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Type descriptor used as dispatch key by the registry.
///
/// Every [`Value`] reports exactly one `ValueType` through
/// [`Value::value_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Null,
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    BoolArray,
    ByteArray,
    CharArray,
    ShortArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    StringArray,
    ObjectArray,
    List,
    OrderedSet,
    SortedSet,
}

impl ValueType {
    /// All primitive array types, including `StringArray`.
    pub const PRIMITIVE_ARRAYS: [ValueType; 9] = [
        ValueType::BoolArray,
        ValueType::ByteArray,
        ValueType::CharArray,
        ValueType::ShortArray,
        ValueType::IntArray,
        ValueType::LongArray,
        ValueType::FloatArray,
        ValueType::DoubleArray,
        ValueType::StringArray,
    ];

    /// All collection types.
    pub const COLLECTIONS: [ValueType; 3] =
        [ValueType::List, ValueType::OrderedSet, ValueType::SortedSet];

    /// Check if this is one of the array types.
    pub fn is_array(self) -> bool {
        matches!(
            self,
            ValueType::BoolArray
                | ValueType::ByteArray
                | ValueType::CharArray
                | ValueType::ShortArray
                | ValueType::IntArray
                | ValueType::LongArray
                | ValueType::FloatArray
                | ValueType::DoubleArray
                | ValueType::StringArray
                | ValueType::ObjectArray
        )
    }

    /// Check if this is one of the collection types.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            ValueType::List | ValueType::OrderedSet | ValueType::SortedSet
        )
    }

    /// Check if this is a scalar (neither array nor collection).
    pub fn is_scalar(self) -> bool {
        !self.is_array() && !self.is_collection()
    }

    /// Element type of an array type, `None` for everything else.
    ///
    /// `ObjectArray` has no fixed element type and also yields `None`.
    pub fn element_type(self) -> Option<ValueType> {
        match self {
            ValueType::BoolArray => Some(ValueType::Bool),
            ValueType::ByteArray => Some(ValueType::Byte),
            ValueType::CharArray => Some(ValueType::Char),
            ValueType::ShortArray => Some(ValueType::Short),
            ValueType::IntArray => Some(ValueType::Int),
            ValueType::LongArray => Some(ValueType::Long),
            ValueType::FloatArray => Some(ValueType::Float),
            ValueType::DoubleArray => Some(ValueType::Double),
            ValueType::StringArray => Some(ValueType::String),
            _ => None,
        }
    }

    /// Name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Byte => "byte",
            ValueType::Char => "char",
            ValueType::Short => "short",
            ValueType::Int => "int",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::BoolArray => "bool[]",
            ValueType::ByteArray => "byte[]",
            ValueType::CharArray => "char[]",
            ValueType::ShortArray => "short[]",
            ValueType::IntArray => "int[]",
            ValueType::LongArray => "long[]",
            ValueType::FloatArray => "float[]",
            ValueType::DoubleArray => "double[]",
            ValueType::StringArray => "string[]",
            ValueType::ObjectArray => "object[]",
            ValueType::List => "list",
            ValueType::OrderedSet => "ordered-set",
            ValueType::SortedSet => "sorted-set",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value flowing through the registry.
///
/// Arrays carry their primitive element type; collections hold boxed
/// values. `OrderedSet` keeps insertion order without duplicates and
/// `SortedSet` is kept ascending by [`Value::total_cmp`], use the
/// [`Value::ordered_set`] and [`Value::sorted_set`] constructors to keep
/// those invariants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    BoolArray(Vec<bool>),
    ByteArray(Vec<u8>),
    CharArray(Vec<char>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    ObjectArray(Vec<Value>),
    List(Vec<Value>),
    OrderedSet(Vec<Value>),
    SortedSet(Vec<Value>),
}

impl Value {
    /// Runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Byte(_) => ValueType::Byte,
            Value::Char(_) => ValueType::Char,
            Value::Short(_) => ValueType::Short,
            Value::Int(_) => ValueType::Int,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::BoolArray(_) => ValueType::BoolArray,
            Value::ByteArray(_) => ValueType::ByteArray,
            Value::CharArray(_) => ValueType::CharArray,
            Value::ShortArray(_) => ValueType::ShortArray,
            Value::IntArray(_) => ValueType::IntArray,
            Value::LongArray(_) => ValueType::LongArray,
            Value::FloatArray(_) => ValueType::FloatArray,
            Value::DoubleArray(_) => ValueType::DoubleArray,
            Value::StringArray(_) => ValueType::StringArray,
            Value::ObjectArray(_) => ValueType::ObjectArray,
            Value::List(_) => ValueType::List,
            Value::OrderedSet(_) => ValueType::OrderedSet,
            Value::SortedSet(_) => ValueType::SortedSet,
        }
    }

    /// Build an insertion-ordered set, dropping later duplicates.
    ///
    /// Duplicates are detected with [`Value::total_cmp`], the same relation
    /// [`Value::sorted_set`] uses.
    pub fn ordered_set(values: impl IntoIterator<Item = Value>) -> Value {
        let items: Vec<Value> = values.into_iter().collect();

        // Stable sort: the first occurrence leads each run of equal values
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| items[a].total_cmp(&items[b]));

        let mut keep = vec![false; items.len()];
        let mut run_start: Option<usize> = None;
        for index in order {
            let is_new = match run_start {
                Some(start) => items[start].total_cmp(&items[index]) != Ordering::Equal,
                None => true,
            };
            if is_new {
                keep[index] = true;
                run_start = Some(index);
            }
        }

        Value::OrderedSet(
            items
                .into_iter()
                .zip(keep)
                .filter_map(|(value, keep)| keep.then_some(value))
                .collect(),
        )
    }

    /// Build an ascending set without duplicates.
    pub fn sorted_set(values: impl IntoIterator<Item = Value>) -> Value {
        let mut items: Vec<Value> = values.into_iter().collect();
        items.sort_by(Value::total_cmp);
        items.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        Value::SortedSet(items)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is one of the array variants
    pub fn is_array(&self) -> bool {
        self.value_type().is_array()
    }

    /// Check if value is one of the collection variants
    pub fn is_collection(&self) -> bool {
        self.value_type().is_collection()
    }

    /// Number of elements of an array or collection, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        let len = match self {
            Value::BoolArray(v) => v.len(),
            Value::ByteArray(v) => v.len(),
            Value::CharArray(v) => v.len(),
            Value::ShortArray(v) => v.len(),
            Value::IntArray(v) => v.len(),
            Value::LongArray(v) => v.len(),
            Value::FloatArray(v) => v.len(),
            Value::DoubleArray(v) => v.len(),
            Value::StringArray(v) => v.len(),
            Value::ObjectArray(v) | Value::List(v) | Value::OrderedSet(v) | Value::SortedSet(v) => {
                v.len()
            }
            _ => return None,
        };
        Some(len)
    }

    /// Boxed elements of an array or collection in iteration order.
    ///
    /// Returns `None` for scalars.
    pub fn elements(&self) -> Option<Vec<Value>> {
        fn boxed<T: Clone + Into<Value>>(items: &[T]) -> Vec<Value> {
            items.iter().cloned().map(Into::into).collect()
        }

        let elements = match self {
            Value::BoolArray(v) => boxed(v),
            Value::ByteArray(v) => boxed(v),
            Value::CharArray(v) => boxed(v),
            Value::ShortArray(v) => boxed(v),
            Value::IntArray(v) => boxed(v),
            Value::LongArray(v) => boxed(v),
            Value::FloatArray(v) => boxed(v),
            Value::DoubleArray(v) => boxed(v),
            Value::StringArray(v) => boxed(v),
            Value::ObjectArray(v) | Value::List(v) | Value::OrderedSet(v) | Value::SortedSet(v) => {
                v.clone()
            }
            _ => return None,
        };
        Some(elements)
    }

    /// Try to get value as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get value as i64, widening the smaller integer types
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Byte(b) => Some(i64::from(*b)),
            Value::Short(s) => Some(i64::from(*s)),
            Value::Int(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Try to get value as f64, widening every numeric type
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f64::from(*f)),
            Value::Double(d) => Some(*d),
            other => other.as_long().map(|l| l as f64),
        }
    }

    /// Try to get value as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Total order over values: first by type, then by content.
    ///
    /// Floating point values use IEEE total ordering so that NaN sorts
    /// deterministically.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        fn slices<T>(a: &[T], b: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
            for (x, y) in a.iter().zip(b) {
                match cmp(x, y) {
                    Ordering::Equal => {}
                    non_eq => return non_eq,
                }
            }
            a.len().cmp(&b.len())
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::BoolArray(a), Value::BoolArray(b)) => a.cmp(b),
            (Value::ByteArray(a), Value::ByteArray(b)) => a.cmp(b),
            (Value::CharArray(a), Value::CharArray(b)) => a.cmp(b),
            (Value::ShortArray(a), Value::ShortArray(b)) => a.cmp(b),
            (Value::IntArray(a), Value::IntArray(b)) => a.cmp(b),
            (Value::LongArray(a), Value::LongArray(b)) => a.cmp(b),
            (Value::FloatArray(a), Value::FloatArray(b)) => slices(a, b, f32::total_cmp),
            (Value::DoubleArray(a), Value::DoubleArray(b)) => slices(a, b, f64::total_cmp),
            (Value::StringArray(a), Value::StringArray(b)) => a.cmp(b),
            (Value::ObjectArray(a), Value::ObjectArray(b))
            | (Value::List(a), Value::List(b))
            | (Value::OrderedSet(a), Value::OrderedSet(b))
            | (Value::SortedSet(a), Value::SortedSet(b)) => slices(a, b, Value::total_cmp),
            (a, b) => a.value_type().cmp(&b.value_type()),
        }
    }
}

impl fmt::Display for Value {
    /// Textual form used by the `to string` conversions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Byte(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Short(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Double(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            other => {
                let items = other.elements().unwrap_or_default();
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

macro_rules! impl_from_array {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for Value {
                fn from(v: Vec<$ty>) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    u8 => Byte,
    char => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
}

impl_from_array! {
    bool => BoolArray,
    u8 => ByteArray,
    char => CharArray,
    i16 => ShortArray,
    i32 => IntArray,
    i64 => LongArray,
    f32 => FloatArray,
    f64 => DoubleArray,
    String => StringArray,
    Value => ObjectArray,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_type_categories() {
        assert!(ValueType::IntArray.is_array());
        assert!(ValueType::ObjectArray.is_array());
        assert!(ValueType::SortedSet.is_collection());
        assert!(ValueType::Double.is_scalar());
        assert!(!ValueType::List.is_scalar());
        assert_eq!(ValueType::StringArray.element_type(), Some(ValueType::String));
        assert_eq!(ValueType::ObjectArray.element_type(), None);
    }

    #[test]
    fn test_value_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(Value::from(vec![1i32, 2]), Value::IntArray(vec![1, 2]));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_elements_boxes_in_order() {
        let value = Value::IntArray(vec![3, 1, 2]);
        assert_eq!(
            value.elements(),
            Some(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
        );
        assert_eq!(value.len(), Some(3));
        assert_eq!(Value::Int(1).elements(), None);
        assert_eq!(Value::Int(1).len(), None);
    }

    #[test]
    fn test_ordered_set_drops_duplicates() {
        let set = Value::ordered_set(vec![Value::Int(2), Value::Int(1), Value::Int(2)]);
        assert_eq!(set, Value::OrderedSet(vec![Value::Int(2), Value::Int(1)]));
    }

    #[test]
    fn test_set_kinds_agree_on_duplicates() {
        let values = vec![
            Value::Double(f64::NAN),
            Value::Double(f64::NAN),
            Value::Double(0.0),
            Value::Double(-0.0),
            Value::Double(0.0),
        ];

        let Value::OrderedSet(ordered) = Value::ordered_set(values.clone()) else {
            panic!("Expected ordered set");
        };
        let bits: Vec<u64> = ordered
            .iter()
            .filter_map(Value::as_double)
            .map(f64::to_bits)
            .collect();
        assert_eq!(
            bits,
            vec![f64::NAN.to_bits(), 0.0f64.to_bits(), (-0.0f64).to_bits()]
        );

        let Value::SortedSet(sorted) = Value::sorted_set(values) else {
            panic!("Expected sorted set");
        };
        assert_eq!(sorted.len(), ordered.len());
    }

    #[test]
    fn test_ordered_set_keeps_first_occurrence_order() {
        let values = (0..1000).rev().chain(0..1000).map(Value::Int);
        let Value::OrderedSet(items) = Value::ordered_set(values) else {
            panic!("Expected ordered set");
        };
        assert_eq!(items.len(), 1000);
        assert_eq!(items.first(), Some(&Value::Int(999)));
        assert_eq!(items.last(), Some(&Value::Int(0)));
    }

    #[test]
    fn test_sorted_set_orders_and_dedups() {
        let set = Value::sorted_set(vec![
            Value::from("b"),
            Value::from("a"),
            Value::from("b"),
        ]);
        assert_eq!(
            set,
            Value::SortedSet(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_total_cmp_mixed_types_orders_by_type() {
        assert_eq!(Value::Bool(true).total_cmp(&Value::Int(0)), Ordering::Less);
        assert_eq!(
            Value::Double(f64::NAN).total_cmp(&Value::Double(f64::NAN)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::IntArray(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_value_type_serde() {
        let json = serde_json::to_string(&ValueType::DoubleArray).unwrap();
        assert_eq!(json, "\"double_array\"");
        let parsed: ValueType = serde_json::from_str("\"sorted_set\"").unwrap();
        assert_eq!(parsed, ValueType::SortedSet);
    }
}
