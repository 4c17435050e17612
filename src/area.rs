//! Area encoders.
//!
//! A FRU image holds up to five areas, always laid out in this order:
//!
//! | Area | Header | Alignment | Checksum |
//! |------|--------|:---------:|:--------:|
//! | Internal use | version byte only | 8 bytes | ✗ |
//! | Chassis info | version + length | 8 bytes | ✓ |
//! | Board info | version + length | 8 bytes | ✓ |
//! | Product info | version + length | 8 bytes | ✓ |
//! | Multirecord | per record | none | per record |
//!
//! The chassis, board, and product areas share one layout:
//!
//! ```text
//! +---------+--------+----------------+-------------------+---------------+------+-----+----------+
//! | version | length | leading bytes  | standard fields   | custom fields | 0xC1 | pad | checksum |
//! +---------+--------+----------------+-------------------+---------------+------+-----+----------+
//! ```
//!
//! where `length` counts the whole area in 8-byte units and `checksum` makes
//! the area sum to zero modulo 256.

use crate::config::{BoardConfig, ChassisConfig, CustomField, ProductConfig};
use crate::date::encode_mfg_date;
use crate::error::{FruError, Result};
use crate::field::{
    encode_field, encode_tagged_field, EncodedField, FieldType, LengthOverflow, EMPTY_FIELD,
    END_OF_FIELDS,
};
use crate::utils::{pad_until, zero_checksum};

/// Areas are aligned to and measured in blocks of this many bytes.
pub const BLOCK_SIZE: usize = 8;

/// Format version written at the start of the internal-use area.
pub const INTERNAL_FORMAT_VERSION: u8 = 0x01;

/// Format version written at the start of the chassis, board, and product areas.
pub const AREA_FORMAT_VERSION: u8 = 0x01;

/// Largest size, in bytes, that a one-byte count of blocks can describe.
pub const MAX_AREA_SIZE: usize = u8::MAX as usize * BLOCK_SIZE;

/// The five areas of a FRU image, in image order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaKind {
    /// Internal-use area.
    Internal,
    /// Chassis info area.
    Chassis,
    /// Board info area.
    Board,
    /// Product info area.
    Product,
    /// Multirecord area.
    MultiRecord,
}

impl AreaKind {
    /// All areas in the order they appear in an image.
    pub const ALL: [AreaKind; 5] = [
        AreaKind::Internal,
        AreaKind::Chassis,
        AreaKind::Board,
        AreaKind::Product,
        AreaKind::MultiRecord,
    ];

    /// Position of this area in the image and in the common header offsets.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for AreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaKind::Internal => write!(f, "Internal use"),
            AreaKind::Chassis => write!(f, "Chassis"),
            AreaKind::Board => write!(f, "Board"),
            AreaKind::Product => write!(f, "Product"),
            AreaKind::MultiRecord => write!(f, "Multirecord"),
        }
    }
}

/// An encoded area, ready to be placed in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    kind: AreaKind,
    bytes: Vec<u8>,
    unimplemented: Vec<FieldType>,
}

impl Area {
    pub(crate) fn new(kind: AreaKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            bytes,
            unimplemented: Vec::new(),
        }
    }

    /// Returns which area this is.
    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    /// Returns the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the area encoded to zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Types of the custom fields that were skipped because they have no encoder.
    pub fn unimplemented_fields(&self) -> &[FieldType] {
        &self.unimplemented
    }
}

/// Encodes the internal-use area: the format version, the payload, then
/// zero padding to the next 8-byte boundary.
///
/// # Example
///
/// ```
/// use frugen::encode_internal;
///
/// let area = encode_internal(&[0xAA, 0xBB]);
/// assert_eq!(area.as_bytes(), &[0x01, 0xAA, 0xBB, 0, 0, 0, 0, 0]);
/// ```
pub fn encode_internal(data: &[u8]) -> Area {
    let mut bytes = Vec::with_capacity(data.len() + BLOCK_SIZE);
    bytes.push(INTERNAL_FORMAT_VERSION);
    bytes.extend_from_slice(data);
    pad_until(&mut bytes, BLOCK_SIZE, 0);
    Area::new(AreaKind::Internal, bytes)
}

/// Encodes the chassis info area.
///
/// The chassis type byte is written only when configured. Standard fields
/// are part number then serial number.
///
/// # Errors
///
/// Fails on any invalid field (see [`encode_field`]) or if the area exceeds
/// [`MAX_AREA_SIZE`].
///
/// # Example
///
/// ```
/// use frugen::{encode_chassis, ChassisConfig, LengthOverflow};
///
/// let config = ChassisConfig {
///     chassis_type: Some(0x17),
///     serial_number: Some("S1".into()),
///     ..ChassisConfig::default()
/// };
/// let area = encode_chassis(&config, LengthOverflow::Reject).unwrap();
/// assert_eq!(area.len(), 16);
/// assert_eq!(&area.as_bytes()[..8], &[0x01, 0x02, 0x17, 0x00, 0xC2, b'S', b'1', 0xC1]);
/// ```
pub fn encode_chassis(config: &ChassisConfig, overflow: LengthOverflow) -> Result<Area> {
    let mut writer = InfoAreaWriter::new(AreaKind::Chassis, overflow);
    if let Some(chassis_type) = config.chassis_type {
        writer.push_byte(chassis_type);
    }
    writer.push_standard_fields(&config.standard_fields())?;
    writer.push_custom_fields(&config.custom)?;
    writer.finish()
}

/// Encodes the board info area.
///
/// Leading bytes are the language code and the 3-byte manufacture date.
/// Standard fields are manufacturer, product name, serial number, part
/// number, then FRU file ID.
///
/// # Errors
///
/// - `FruError::InvalidTimestamp` if the manufacture date is missing or invalid
/// - any field error from [`encode_field`]
/// - `FruError::AreaTooLarge` if the area exceeds [`MAX_AREA_SIZE`]
pub fn encode_board(config: &BoardConfig, overflow: LengthOverflow) -> Result<Area> {
    let mut writer = InfoAreaWriter::new(AreaKind::Board, overflow);
    writer.push_byte(config.language.unwrap_or(0));
    writer.push_bytes(&encode_mfg_date(config.manufacturer_date.as_deref())?);
    writer.push_standard_fields(&config.standard_fields())?;
    writer.push_custom_fields(&config.custom)?;
    writer.finish()
}

/// Encodes the product info area.
///
/// The leading byte is the language code. Standard fields are manufacturer,
/// product name, part number, version, serial number, asset tag, then FRU
/// file ID.
///
/// # Errors
///
/// Fails on any invalid field (see [`encode_field`]) or if the area exceeds
/// [`MAX_AREA_SIZE`].
pub fn encode_product(config: &ProductConfig, overflow: LengthOverflow) -> Result<Area> {
    let mut writer = InfoAreaWriter::new(AreaKind::Product, overflow);
    writer.push_byte(config.language.unwrap_or(0));
    writer.push_standard_fields(&config.standard_fields())?;
    writer.push_custom_fields(&config.custom)?;
    writer.finish()
}

/// Builds a chassis, board, or product area in a single buffer.
///
/// The two header bytes are reserved up front; the length byte is filled in
/// by [`InfoAreaWriter::finish`] once padding is known.
struct InfoAreaWriter {
    kind: AreaKind,
    overflow: LengthOverflow,
    bytes: Vec<u8>,
    unimplemented: Vec<FieldType>,
}

impl InfoAreaWriter {
    fn new(kind: AreaKind, overflow: LengthOverflow) -> Self {
        let mut bytes = Vec::with_capacity(4 * BLOCK_SIZE);
        bytes.extend_from_slice(&[AREA_FORMAT_VERSION, 0x00]);
        Self {
            kind,
            overflow,
            bytes,
            unimplemented: Vec::new(),
        }
    }

    fn push_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    fn push_field(&mut self, field: EncodedField) {
        match field {
            EncodedField::Bytes(bytes) => self.bytes.extend_from_slice(&bytes),
            EncodedField::Unimplemented(field_type) => self.unimplemented.push(field_type),
        }
    }

    /// Absent and empty values are written as a single `0x00` byte.
    fn push_standard_fields(&mut self, values: &[Option<&str>]) -> Result<()> {
        for value in values {
            match value {
                Some(text) if !text.is_empty() => {
                    let field = encode_field(FieldType::AsciiLatin1, text, self.overflow)?;
                    self.push_field(field);
                }
                _ => self.push_byte(EMPTY_FIELD),
            }
        }
        Ok(())
    }

    fn push_custom_fields(&mut self, fields: &[CustomField]) -> Result<()> {
        for custom in fields {
            let field = encode_tagged_field(&custom.field_type, &custom.data, self.overflow)?;
            self.push_field(field);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Area> {
        self.bytes.push(END_OF_FIELDS);
        // leave exactly one byte before the boundary for the checksum
        pad_until(&mut self.bytes, BLOCK_SIZE, BLOCK_SIZE - 1);

        let total = self.bytes.len() + 1;
        if total > MAX_AREA_SIZE {
            return Err(FruError::area_too_large(self.kind, total));
        }
        self.bytes[1] = (total / BLOCK_SIZE) as u8;
        let checksum = zero_checksum(&self.bytes);
        self.bytes.push(checksum);

        tracing::debug!(area = %self.kind, len = total, "encoded area");
        Ok(Area {
            kind: self.kind,
            bytes: self.bytes,
            unimplemented: self.unimplemented,
        })
    }
}
