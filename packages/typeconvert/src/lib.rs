//! Microcommons type conversion
//!
//! A registry of conversion rules between dynamically typed [`Value`]s,
//! keyed by the [`ValueType`] descriptor:
//! - exact rules for a `(source, destination)` pair
//! - any-source rules for a destination, guarded by a predicate and tried
//!   in registration order
//! - built-in registrars for scalars, arrays and collections
//!
//! # Example
//!
//! ```
//! use microcommons_typeconvert::{create_default_registry, RegistryConfig, Value, ValueType};
//!
//! let registry = create_default_registry(RegistryConfig::default()).unwrap();
//!
//! // int[] to list, boxing every element
//! let list = registry
//!     .convert(&Value::IntArray(vec![1, 2, 3]), ValueType::List)
//!     .unwrap();
//! assert_eq!(list, Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
//!
//! // A scalar becomes a single-element array
//! let array = registry.convert(&Value::from("42"), ValueType::IntArray).unwrap();
//! assert_eq!(array, Value::IntArray(vec![42]));
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod registrars;
pub mod registry;
pub mod types;

// Re-export commonly used items
pub use config::{DuplicatePolicy, RegistryConfig};
pub use error::{ConvertError, Result};
pub use registry::{
    create_default_registry, predicate, Dispatch, RuleKind, TypeConverterRegistrar,
    TypeConverterRegistry,
};
pub use types::{Value, ValueType};
