//! FRU common header.
//!
//! The common header is an 8-byte structure at offset 0 of every FRU image:
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | Version | Common header format version (0x01) |
//! | 1 | Internal | Internal-use area offset |
//! | 2 | Chassis | Chassis info area offset |
//! | 3 | Board | Board info area offset |
//! | 4 | Product | Product info area offset |
//! | 5 | Multirecord | Multirecord area offset |
//! | 6 | Pad | Reserved (always 0x00) |
//! | 7 | Checksum | Makes bytes 0-7 sum to zero |
//!
//! Offsets are in 8-byte units from the start of the image. An offset of 0
//! means the area is not present, since offset 0 is the header itself.
//!
//! # Example
//!
//! ```
//! use frugen::{AreaKind, CommonHeader};
//!
//! let mut header = CommonHeader::new();
//! header.set_offset(AreaKind::Board, 1);
//! assert_eq!(header.to_bytes(), [0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFE]);
//! ```

use crate::area::AreaKind;
use crate::utils::zero_checksum;

/// Common header size in bytes.
pub const COMMON_HEADER_SIZE: usize = 8;

/// Common header format version.
pub const COMMON_HEADER_VERSION: u8 = 0x01;

/// FRU common header (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    /// Format version, [`COMMON_HEADER_VERSION`] for generated images.
    pub version: u8,
    /// Area offsets in 8-byte units, indexed by [`AreaKind::index`].
    pub offsets: [u8; 5],
}

impl CommonHeader {
    /// Creates a header with every area absent.
    pub fn new() -> Self {
        Self {
            version: COMMON_HEADER_VERSION,
            offsets: [0; 5],
        }
    }

    /// Returns the offset of an area in 8-byte units, 0 if absent.
    pub fn offset(&self, area: AreaKind) -> u8 {
        self.offsets[area.index()]
    }

    /// Sets the offset of an area in 8-byte units.
    pub fn set_offset(&mut self, area: AreaKind, offset: u8) {
        self.offsets[area.index()] = offset;
    }

    /// Computes the checksum byte over the first 7 header bytes.
    pub fn checksum(&self) -> u8 {
        let [internal, chassis, board, product, multirecord] = self.offsets;
        zero_checksum(&[self.version, internal, chassis, board, product, multirecord, 0x00])
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(self) -> [u8; COMMON_HEADER_SIZE] {
        let [internal, chassis, board, product, multirecord] = self.offsets;
        [
            self.version,
            internal,
            chassis,
            board,
            product,
            multirecord,
            0x00,
            self.checksum(),
        ]
    }
}

impl Default for CommonHeader {
    fn default() -> Self {
        Self::new()
    }
}
