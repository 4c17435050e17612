//! Multirecord area encoding.
//!
//! The multirecord area is a plain sequence of records with no area header,
//! padding, or trailing checksum. Each record is a 5-byte header followed by
//! its payload:
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | Type ID | Record type |
//! | 1 | Format | Record format version; bit 7 marks the last record |
//! | 2 | Length | Payload length in bytes |
//! | 3 | Record checksum | Makes the payload sum to zero |
//! | 4 | Header checksum | Makes header bytes 0-4 sum to zero |
//!
//! # Example
//!
//! ```
//! use frugen::{encode_multirecord, MultiRecordConfig};
//!
//! let records = [MultiRecordConfig::new("00", "01", "aa")];
//! let area = encode_multirecord(&records, false).unwrap();
//! assert_eq!(area.as_bytes(), &[0x00, 0x01, 0x01, 0x56, 0xA8, 0xAA]);
//! ```

use crate::area::{Area, AreaKind};
use crate::config::MultiRecordConfig;
use crate::error::{FruError, Result};
use crate::utils::{decode_hex, decode_hex_byte, zero_checksum};

/// Record header size in bytes.
pub const RECORD_HEADER_SIZE: usize = 5;

/// Largest payload the one-byte record length can describe.
pub const MAX_RECORD_PAYLOAD: usize = u8::MAX as usize;

/// End-of-list flag in the record format byte.
pub const END_OF_LIST: u8 = 0x80;

/// A decoded multirecord entry.
///
/// Only built through [`MultiRecord::from_config`], so the payload always fits
/// the one-byte length field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRecord {
    record_type: u8,
    version: u8,
    data: Vec<u8>,
    is_last: bool,
}

impl MultiRecord {
    /// Decodes a configured record.
    ///
    /// `index` is the record's position in the list and is only used for
    /// error reporting. `is_last` starts out `false`.
    ///
    /// # Errors
    ///
    /// - `FruError::MalformedHex` if the id or version is not exactly one hex
    ///   byte, or the payload is not valid hex
    /// - `FruError::RecordTooLarge` if the payload exceeds 255 bytes
    pub fn from_config(index: usize, config: &MultiRecordConfig) -> Result<Self> {
        let record_type = decode_hex_byte(&config.record_id)?;
        let version = decode_hex_byte(&config.record_version)?;
        let data = decode_hex(&config.data)?;
        if data.len() > MAX_RECORD_PAYLOAD {
            return Err(FruError::RecordTooLarge {
                index,
                len: data.len(),
            });
        }
        Ok(Self {
            record_type,
            version,
            data,
            is_last: false,
        })
    }

    /// Returns the record type ID.
    pub fn record_type(&self) -> u8 {
        self.record_type
    }

    /// Returns the record format version, without the end-of-list flag.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the record payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns whether this is the final record of the area.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Builds the 5-byte record header.
    ///
    /// The end-of-list flag is set only when `mark_end_of_list` is `true` and
    /// this is the last record.
    pub fn header(&self, mark_end_of_list: bool) -> [u8; RECORD_HEADER_SIZE] {
        let mut format = self.version;
        if mark_end_of_list && self.is_last {
            format |= END_OF_LIST;
        }
        let mut header = [
            self.record_type,
            format,
            // from_config caps the payload at MAX_RECORD_PAYLOAD
            self.data.len() as u8,
            zero_checksum(&self.data),
            0x00,
        ];
        header[4] = zero_checksum(&header[..4]);
        header
    }

    fn encode_into(&self, out: &mut Vec<u8>, mark_end_of_list: bool) {
        out.extend_from_slice(&self.header(mark_end_of_list));
        out.extend_from_slice(&self.data);
    }
}

/// Encodes the multirecord area from configured records, in order.
///
/// # Arguments
///
/// * `records` - Records to encode
/// * `mark_end_of_list` - Set the end-of-list flag on the final record
///
/// # Errors
///
/// Fails on the first record that [`MultiRecord::from_config`] rejects.
pub fn encode_multirecord(records: &[MultiRecordConfig], mark_end_of_list: bool) -> Result<Area> {
    let mut decoded = records
        .iter()
        .enumerate()
        .map(|(index, config)| MultiRecord::from_config(index, config))
        .collect::<Result<Vec<_>>>()?;
    if let Some(last) = decoded.last_mut() {
        last.is_last = true;
    }

    let capacity = decoded
        .iter()
        .map(|r| RECORD_HEADER_SIZE + r.data.len())
        .sum();
    let mut bytes = Vec::with_capacity(capacity);
    for record in &decoded {
        record.encode_into(&mut bytes, mark_end_of_list);
    }

    tracing::debug!(records = decoded.len(), len = bytes.len(), "encoded multirecord area");
    Ok(Area::new(AreaKind::MultiRecord, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_zero_sum;

    #[test]
    fn test_single_record() {
        let area = encode_multirecord(&[MultiRecordConfig::new("00", "01", "aa")], false).unwrap();
        assert_eq!(area.as_bytes(), &[0x00, 0x01, 0x01, 0x56, 0xA8, 0xAA]);
        assert_eq!(area.kind(), AreaKind::MultiRecord);
    }

    #[test]
    fn test_header_checksum_is_per_record() {
        let records = [
            MultiRecordConfig::new("c0", "02", "0102"),
            MultiRecordConfig::new("c1", "02", "ff"),
        ];
        let area = encode_multirecord(&records, false).unwrap();
        let bytes = area.as_bytes();

        assert_eq!(bytes.len(), 5 + 2 + 5 + 1);
        assert!(is_zero_sum(&bytes[..5]));
        assert!(is_zero_sum(&bytes[7..12]));
        assert_eq!(bytes[7], 0xC1);
        assert_eq!(bytes[8], 0x02);
    }

    #[test]
    fn test_payload_checksum() {
        let area = encode_multirecord(&[MultiRecordConfig::new("01", "02", "10203040")], false)
            .unwrap();
        let bytes = area.as_bytes();
        assert_eq!(bytes[2], 4);
        let mut payload = bytes[5..].to_vec();
        payload.push(bytes[3]);
        assert!(is_zero_sum(&payload));
    }

    #[test]
    fn test_empty_payload() {
        let area = encode_multirecord(&[MultiRecordConfig::new("05", "02", "")], false).unwrap();
        assert_eq!(area.as_bytes(), &[0x05, 0x02, 0x00, 0x00, 0xF9]);
    }

    #[test]
    fn test_empty_list() {
        let area = encode_multirecord(&[], true).unwrap();
        assert!(area.is_empty());
    }

    #[test]
    fn test_end_of_list_marker() {
        let records = [
            MultiRecordConfig::new("00", "02", "aa"),
            MultiRecordConfig::new("01", "02", "bb"),
        ];
        let area = encode_multirecord(&records, true).unwrap();
        let bytes = area.as_bytes();

        assert_eq!(bytes[1], 0x02);
        assert_eq!(bytes[7], 0x82);
        assert!(is_zero_sum(&bytes[6..11]));
    }

    #[test]
    fn test_is_last_from_position() {
        let config = MultiRecordConfig::new("00", "02", "");
        let mut record = MultiRecord::from_config(0, &config).unwrap();
        assert!(!record.is_last());
        assert_eq!(record.header(true)[1], 0x02);

        record.is_last = true;
        assert_eq!(record.header(true)[1], 0x82);
        assert_eq!(record.header(false)[1], 0x02);
    }

    #[test]
    fn test_malformed_ids() {
        for (id, version) in [("0", "01"), ("0001", "01"), ("zz", "01"), ("00", "")] {
            let err = encode_multirecord(&[MultiRecordConfig::new(id, version, "")], false)
                .unwrap_err();
            assert!(matches!(err, FruError::MalformedHex { .. }), "{id} {version}");
        }
    }

    #[test]
    fn test_record_too_large() {
        let ok = MultiRecordConfig::new("00", "02", "ab".repeat(255));
        assert_eq!(encode_multirecord(&[ok.clone()], false).unwrap().len(), 260);

        let big = MultiRecordConfig::new("00", "02", "ab".repeat(256));
        let err = encode_multirecord(&[ok, big], false).unwrap_err();
        assert!(matches!(err, FruError::RecordTooLarge { index: 1, len: 256 }));
    }

    #[test]
    fn test_header_length_matches_payload() {
        let config = MultiRecordConfig::new("c0", "02", "ab".repeat(MAX_RECORD_PAYLOAD));
        let record = MultiRecord::from_config(3, &config).unwrap();
        assert_eq!(record.record_type(), 0xC0);
        assert_eq!(record.version(), 0x02);
        assert_eq!(record.data().len(), MAX_RECORD_PAYLOAD);
        assert_eq!(record.header(false)[2], 0xFF);

        let config = MultiRecordConfig::new("c0", "02", "ab".repeat(300));
        let err = MultiRecord::from_config(3, &config).unwrap_err();
        assert!(matches!(err, FruError::RecordTooLarge { index: 3, len: 300 }));
    }
}
