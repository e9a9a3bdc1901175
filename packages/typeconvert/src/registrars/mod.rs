//! Built-in registrars.
//!
//! Install them with [`TypeConverterRegistry::install`](crate::TypeConverterRegistry::install)
//! or all at once with [`create_default_registry`](crate::create_default_registry).

mod array;
mod collection;
mod scalar;

pub use array::{to_array, ArrayRegistrar};
pub use collection::CollectionRegistrar;
pub use scalar::{ScalarRegistrar, SCALAR_TYPES};
