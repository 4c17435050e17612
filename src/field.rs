//! Type/length field encoding.
//!
//! Every variable-length field in the chassis, board, and product areas is a
//! type/length byte followed by the field payload:
//!
//! | Bits | Meaning |
//! |------|---------|
//! | 7:6 | Type code (see [`FieldType`]) |
//! | 5:0 | Payload length in bytes (0-63) |
//!
//! # Example
//!
//! ```
//! use frugen::{encode_field, EncodedField, FieldType, LengthOverflow};
//!
//! let field = encode_field(FieldType::AsciiLatin1, "AB", LengthOverflow::Reject).unwrap();
//! assert_eq!(field, EncodedField::Bytes(vec![0xC2, 0x41, 0x42]));
//!
//! let field = encode_field(FieldType::Binary, "deadbeef", LengthOverflow::Reject).unwrap();
//! assert_eq!(field.as_bytes(), &[0x04, 0xDE, 0xAD, 0xBE, 0xEF]);
//! ```

use std::str::FromStr;

use crate::error::{FruError, Result};
use crate::utils::decode_hex;

/// Largest payload a type/length byte can describe.
pub const MAX_FIELD_LEN: usize = 0x3F;

/// Type/length byte with type 0b11 and length 1, reserved as the end-of-fields marker.
pub const END_OF_FIELDS: u8 = 0xC1;

/// Type/length byte with type 0b00 and length 0, marking a field as not present.
pub const EMPTY_FIELD: u8 = 0x00;

const LENGTH_MASK: u8 = 0x3F;

/// Field encodings understood by the type/length byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Binary or unspecified data, given as a hex string.
    Binary,
    /// BCD plus (digits, space, dash, period).
    BcdPlus,
    /// 6-bit packed ASCII.
    SixBitAscii,
    /// 8-bit ASCII + Latin 1 text.
    AsciiLatin1,
}

impl FieldType {
    /// Returns the 2-bit type code placed in bits 7:6 of the type/length byte.
    pub fn type_code(self) -> u8 {
        match self {
            FieldType::Binary => 0b00,
            FieldType::BcdPlus => 0b01,
            FieldType::SixBitAscii => 0b10,
            FieldType::AsciiLatin1 => 0b11,
        }
    }

    /// Returns the tag used for this type in configuration documents.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Binary => "binary",
            FieldType::BcdPlus => "bcd-plus",
            FieldType::SixBitAscii => "6bit-ascii",
            FieldType::AsciiLatin1 => "ascii-latin1",
        }
    }

    /// Returns whether this crate can produce bytes for the type.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::FieldType;
    ///
    /// assert!(FieldType::Binary.is_implemented());
    /// assert!(!FieldType::BcdPlus.is_implemented());
    /// ```
    pub fn is_implemented(self) -> bool {
        matches!(self, FieldType::Binary | FieldType::AsciiLatin1)
    }
}

impl FromStr for FieldType {
    type Err = FruError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binary" => Ok(FieldType::Binary),
            "bcd-plus" => Ok(FieldType::BcdPlus),
            "6bit-ascii" => Ok(FieldType::SixBitAscii),
            "ascii-latin1" => Ok(FieldType::AsciiLatin1),
            other => Err(FruError::unsupported_field_type(other)),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a field payload is longer than [`MAX_FIELD_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthOverflow {
    /// Fail with `FruError::FieldTooLong`.
    #[default]
    Reject,
    /// Keep the low 6 bits of the length and emit the full payload anyway.
    ///
    /// This reproduces images made by older generators, which are not
    /// decodable past the truncated field.
    Truncate,
}

/// Result of encoding a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedField {
    /// The complete type/length byte followed by the payload.
    Bytes(Vec<u8>),
    /// The type is recognized but has no encoder yet; nothing is emitted.
    Unimplemented(FieldType),
}

impl EncodedField {
    /// Returns the encoded bytes, empty for unimplemented types.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EncodedField::Bytes(bytes) => bytes,
            EncodedField::Unimplemented(_) => &[],
        }
    }

    /// Returns whether the field was skipped because its type has no encoder.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, EncodedField::Unimplemented(_))
    }
}

/// Encodes one typed value as a type/length field.
///
/// # Arguments
///
/// * `field_type` - Encoding to apply
/// * `value` - Hex string for [`FieldType::Binary`], text otherwise
/// * `overflow` - Policy for payloads longer than [`MAX_FIELD_LEN`]
///
/// # Errors
///
/// - `FruError::MalformedHex` if a binary value is not valid hex
/// - `FruError::UnencodableText` if ASCII text contains non-ASCII characters
/// - `FruError::FieldTooLong` if the payload exceeds 63 bytes under [`LengthOverflow::Reject`]
pub fn encode_field(
    field_type: FieldType,
    value: &str,
    overflow: LengthOverflow,
) -> Result<EncodedField> {
    let payload = match field_type {
        FieldType::Binary => decode_hex(value)?,
        FieldType::AsciiLatin1 => {
            if !value.is_ascii() {
                return Err(FruError::unencodable_text(value));
            }
            value.as_bytes().to_vec()
        }
        FieldType::BcdPlus | FieldType::SixBitAscii => {
            tracing::info!(field_type = %field_type, data = value, "no encoder for field type, skipping");
            return Ok(EncodedField::Unimplemented(field_type));
        }
    };

    let len = length_bits(payload.len(), overflow)?;
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push((field_type.type_code() << 6) | len);
    out.extend_from_slice(&payload);
    Ok(EncodedField::Bytes(out))
}

/// Encodes a value whose type is given as a configuration tag.
///
/// # Errors
///
/// Returns `FruError::UnsupportedFieldType` for unknown tags, otherwise the
/// errors of [`encode_field`].
///
/// # Example
///
/// ```
/// use frugen::{encode_tagged_field, FruError, LengthOverflow};
///
/// let field = encode_tagged_field("bcd-plus", "1234", LengthOverflow::Reject).unwrap();
/// assert!(field.is_unimplemented());
///
/// let err = encode_tagged_field("utf-16", "x", LengthOverflow::Reject).unwrap_err();
/// assert!(matches!(err, FruError::UnsupportedFieldType { .. }));
/// ```
pub fn encode_tagged_field(
    tag: &str,
    value: &str,
    overflow: LengthOverflow,
) -> Result<EncodedField> {
    encode_field(tag.parse()?, value, overflow)
}

fn length_bits(len: usize, overflow: LengthOverflow) -> Result<u8> {
    if len > MAX_FIELD_LEN {
        match overflow {
            LengthOverflow::Reject => {
                return Err(FruError::FieldTooLong {
                    len,
                    max: MAX_FIELD_LEN,
                })
            }
            LengthOverflow::Truncate => {
                tracing::warn!(len, "field length truncated to 6 bits");
            }
        }
    }
    Ok((len as u8) & LENGTH_MASK)
}
