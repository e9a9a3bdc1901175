//! Error types for the type converter registry.

use thiserror::Error;

use crate::types::ValueType;

/// Main error type for conversion and registration.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Neither an exact nor an any-source rule matches the request.
    #[error("No converter found from {source_type} to {destination_type}")]
    NoConverterFound {
        source_type: ValueType,
        destination_type: ValueType,
    },

    /// An exact rule for the pair is already registered.
    #[error("A converter from {source_type} to {destination_type} is already registered")]
    DuplicateRule {
        source_type: ValueType,
        destination_type: ValueType,
    },

    /// One element of an array or collection conversion failed.
    #[error("Failed to convert element {index}: {cause}")]
    ElementConversion {
        index: usize,
        #[source]
        cause: Box<ConvertError>,
    },

    /// A string could not be parsed into the requested scalar type.
    #[error("Cannot parse '{value}' as {target}")]
    Parse { value: String, target: ValueType },

    /// A numeric value does not fit the requested scalar type.
    #[error("Value {value} is out of range for {target}")]
    OutOfRange { value: String, target: ValueType },
}

impl ConvertError {
    /// Wrap an element failure with its position inside the batch.
    #[must_use]
    pub fn element(index: usize, cause: ConvertError) -> Self {
        ConvertError::ElementConversion {
            index,
            cause: Box::new(cause),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
