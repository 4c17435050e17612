//! FRU image assembly.
//!
//! This module provides [`FruEncoder`], which encodes every configured area
//! and lays them out behind a [`CommonHeader`]:
//!
//! ```text
//! +---------------+----------+---------+-------+---------+-------------+
//! | common header | internal | chassis | board | product | multirecord |
//! +---------------+----------+---------+-------+---------+-------------+
//! ```
//!
//! Areas missing from the configuration take no space and keep offset 0.
//!
//! # Example
//!
//! ```
//! use frugen::{EncoderConfig, FruConfig, FruEncoder, AreaKind};
//!
//! let config = FruConfig::from_json_str(r#"{
//!     "board": {
//!         "language": 0,
//!         "manufacturer-date": "2020/01/01 00:00:00",
//!         "manufacturer": "ACME"
//!     }
//! }"#)?;
//!
//! let image = FruEncoder::new(EncoderConfig::new()).encode(&config)?;
//! assert_eq!(image.header().offsets, [0, 0, 1, 0, 0]);
//! assert_eq!(image.area(AreaKind::Board).unwrap().len(), 24);
//! assert_eq!(image.to_bytes().len(), 32);
//! # Ok::<(), frugen::FruError>(())
//! ```

use crate::area::{
    encode_board, encode_chassis, encode_internal, encode_product, Area, AreaKind, BLOCK_SIZE,
};
use crate::config::FruConfig;
use crate::error::{FruError, Result};
use crate::field::{FieldType, LengthOverflow};
use crate::header::{CommonHeader, COMMON_HEADER_SIZE};
use crate::multirecord::encode_multirecord;

/// Options controlling how an image is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Handling of type/length fields longer than 63 bytes.
    pub length_overflow: LengthOverflow,
    /// Set the end-of-list flag on the last multirecord.
    pub mark_end_of_list: bool,
}

impl EncoderConfig {
    /// Creates the default configuration: overlong fields are rejected and
    /// the end-of-list flag is not written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy for type/length fields longer than 63 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::{EncoderConfig, LengthOverflow};
    ///
    /// let config = EncoderConfig::new().with_length_overflow(LengthOverflow::Truncate);
    /// assert_eq!(config.length_overflow, LengthOverflow::Truncate);
    /// ```
    pub fn with_length_overflow(mut self, policy: LengthOverflow) -> Self {
        self.length_overflow = policy;
        self
    }

    /// Enables or disables the end-of-list flag on the last multirecord.
    pub fn with_end_of_list_marker(mut self, enabled: bool) -> Self {
        self.mark_end_of_list = enabled;
        self
    }
}

/// Encodes FRU descriptions into binary images.
///
/// Encoding is a pure function of the description and the encoder options:
/// the same input always yields byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct FruEncoder {
    config: EncoderConfig,
}

impl FruEncoder {
    /// Creates an encoder with the given options.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the encoder options.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes every configured area and assembles the image.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any area encoder, or
    /// `FruError::AreaTooLarge` if an area starts beyond what the one-byte
    /// header offset can address. No partial image is produced.
    pub fn encode(&self, fru: &FruConfig) -> Result<FruImage> {
        let areas = self.encode_areas(fru)?;

        let mut header = CommonHeader::new();
        let mut position = COMMON_HEADER_SIZE / BLOCK_SIZE;
        for area in &areas {
            let offset = u8::try_from(position)
                .map_err(|_| FruError::area_too_large(area.kind(), position * BLOCK_SIZE))?;
            header.set_offset(area.kind(), offset);
            position += area.len() / BLOCK_SIZE;
        }

        tracing::debug!(offsets = ?header.offsets, "assembled common header");
        Ok(FruImage { header, areas })
    }

    /// Encodes the configured areas in image order, skipping absent and empty ones.
    fn encode_areas(&self, fru: &FruConfig) -> Result<Vec<Area>> {
        let overflow = self.config.length_overflow;
        let mut areas = Vec::with_capacity(AreaKind::ALL.len());

        if let Some(internal) = &fru.internal {
            match internal.payload()? {
                Some(data) => areas.push(encode_internal(&data)),
                None => tracing::debug!("internal area has no data, skipping"),
            }
        }
        if let Some(chassis) = &fru.chassis {
            areas.push(encode_chassis(chassis, overflow)?);
        }
        if let Some(board) = &fru.board {
            areas.push(encode_board(board, overflow)?);
        }
        if let Some(product) = &fru.product {
            areas.push(encode_product(product, overflow)?);
        }
        if let Some(records) = &fru.multirecord {
            areas.push(encode_multirecord(records, self.config.mark_end_of_list)?);
        }

        areas.retain(|area| !area.is_empty());
        Ok(areas)
    }
}

/// An assembled FRU image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruImage {
    header: CommonHeader,
    areas: Vec<Area>,
}

impl FruImage {
    /// Returns the common header.
    pub fn header(&self) -> &CommonHeader {
        &self.header
    }

    /// Returns the present areas in image order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Returns an area if it is present in the image.
    pub fn area(&self, kind: AreaKind) -> Option<&Area> {
        self.areas.iter().find(|area| area.kind() == kind)
    }

    /// Returns every custom field skipped because its type has no encoder,
    /// with the area it belongs to.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::{AreaKind, FieldType, FruConfig, FruEncoder};
    ///
    /// let config = FruConfig::from_json_str(
    ///     r#"{"chassis": {"custom": [{"type": "bcd-plus", "data": "123"}]}}"#,
    /// )?;
    /// let image = FruEncoder::default().encode(&config)?;
    /// let skipped: Vec<_> = image.unimplemented_fields().collect();
    /// assert_eq!(skipped, vec![(AreaKind::Chassis, FieldType::BcdPlus)]);
    /// # Ok::<(), frugen::FruError>(())
    /// ```
    pub fn unimplemented_fields(&self) -> impl Iterator<Item = (AreaKind, FieldType)> + '_ {
        self.areas.iter().flat_map(|area| {
            area.unimplemented_fields()
                .iter()
                .map(move |&field_type| (area.kind(), field_type))
        })
    }

    /// Returns the total image size in bytes.
    pub fn len(&self) -> usize {
        COMMON_HEADER_SIZE + self.areas.iter().map(Area::len).sum::<usize>()
    }

    /// Returns whether the image is empty. Always `false`: the header is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serializes the header and every area into one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.header.to_bytes());
        for area in &self.areas {
            out.extend_from_slice(area.as_bytes());
        }
        out
    }
}

/// Encodes a description with default options and returns the image bytes.
///
/// # Errors
///
/// See [`FruEncoder::encode`].
pub fn encode_image(fru: &FruConfig) -> Result<Vec<u8>> {
    Ok(FruEncoder::default().encode(fru)?.to_bytes())
}
