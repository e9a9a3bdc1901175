//! Ready-made applicability predicates for any-source rules.

use crate::types::{Value, ValueType};

/// Accept every value.
pub fn any(_: &Value) -> bool {
    true
}

/// Accept every non-null value.
pub fn non_null(value: &Value) -> bool {
    !value.is_null()
}

/// Accept arrays of any element type.
pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// Accept collections (`List`, `OrderedSet`, `SortedSet`).
pub fn is_collection(value: &Value) -> bool {
    value.is_collection()
}

/// Accept values that are neither arrays nor collections.
pub fn is_scalar(value: &Value) -> bool {
    value.value_type().is_scalar()
}

/// Accept values of exactly the given type.
pub fn of_type(value_type: ValueType) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value| value.value_type() == value_type
}
