//! Error types for FRU image generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::area::AreaKind;

/// Result type alias for FRU operations.
pub type Result<T> = std::result::Result<T, FruError>;

/// Errors that can occur while loading a FRU description or encoding an image.
#[derive(Debug, Error)]
pub enum FruError {
    /// The internal-use companion file referenced by the configuration does not exist.
    #[error("Internal info area file {} not found", .path.display())]
    ConfigurationMissing {
        /// Resolved path of the missing file.
        path: PathBuf,
    },

    /// A hex string contains non-hex characters or has the wrong length.
    #[error("Malformed hex string '{value}': {reason}")]
    MalformedHex {
        /// The offending input string.
        value: String,
        /// Why the string was rejected.
        reason: String,
    },

    /// Text that must be ASCII contains characters outside the ASCII range.
    #[error("Text '{value}' cannot be encoded as ASCII")]
    UnencodableText {
        /// The offending input string.
        value: String,
    },

    /// A field type tag outside the supported set.
    #[error("Unsupported field type '{type_name}'")]
    UnsupportedFieldType {
        /// The unrecognized tag.
        type_name: String,
    },

    /// The board manufacture date is missing or cannot be represented.
    #[error("Invalid manufacture timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The timestamp as given (empty when missing).
        value: String,
        /// Why the timestamp was rejected.
        reason: String,
    },

    /// A multirecord payload does not fit the one-byte record length.
    #[error("Multirecord {index} payload is {len} bytes, maximum is 255")]
    RecordTooLarge {
        /// Position of the record in the input list.
        index: usize,
        /// Payload length in bytes.
        len: usize,
    },

    /// A type/length field payload does not fit the 6-bit length.
    #[error("Field payload is {len} bytes, maximum is {max}")]
    FieldTooLong {
        /// Payload length in bytes.
        len: usize,
        /// Largest encodable length.
        max: usize,
    },

    /// An area (or the image) is too large to be addressed in 8-byte units by one byte.
    #[error("{area} area is {len} bytes, too large to address")]
    AreaTooLarge {
        /// The area that overflowed.
        area: AreaKind,
        /// Size in bytes.
        len: usize,
    },

    /// The configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// I/O error while reading the configuration or writing the image.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FruError {
    /// Creates a new `ConfigurationMissing` error.
    pub fn configuration_missing(path: impl Into<PathBuf>) -> Self {
        Self::ConfigurationMissing { path: path.into() }
    }

    /// Creates a new `MalformedHex` error.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::FruError;
    ///
    /// let err = FruError::malformed_hex("zz", "invalid character 'z' at position 0");
    /// assert!(err.to_string().contains("zz"));
    /// ```
    pub fn malformed_hex(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHex {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `UnencodableText` error.
    pub fn unencodable_text(value: impl Into<String>) -> Self {
        Self::UnencodableText {
            value: value.into(),
        }
    }

    /// Creates a new `UnsupportedFieldType` error.
    pub fn unsupported_field_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedFieldType {
            type_name: type_name.into(),
        }
    }

    /// Creates a new `InvalidTimestamp` error.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::FruError;
    ///
    /// let err = FruError::invalid_timestamp("2020-01-01", "expected YYYY/MM/DD HH:MM:SS");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid manufacture timestamp '2020-01-01': expected YYYY/MM/DD HH:MM:SS"
    /// );
    /// ```
    pub fn invalid_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `AreaTooLarge` error.
    pub fn area_too_large(area: AreaKind, len: usize) -> Self {
        Self::AreaTooLarge { area, len }
    }
}
