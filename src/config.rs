//! FRU description documents.
//!
//! A description is a JSON object with optional `internal`, `chassis`, `board`,
//! `product`, and `multirecord` keys. Each missing key leaves the matching area
//! out of the image.
//!
//! ```json
//! {
//!     "board": {
//!         "language": 0,
//!         "manufacturer-date": "2020/01/01 00:00:00",
//!         "manufacturer": "ACME",
//!         "custom": [{ "type": "binary", "data": "deadbeef" }]
//!     },
//!     "multirecord": [
//!         { "record-id": "00", "record-version": "02", "data": "aa55" }
//!     ]
//! }
//! ```
//!
//! [`FruConfig::load`] also reads the raw bytes of an internal-use file named
//! by `internal.file`, relative to the document's directory, so that encoding
//! itself never touches the filesystem.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FruError, Result};
use crate::utils::decode_hex;

/// A complete FRU description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FruConfig {
    /// Internal-use area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<InternalConfig>,
    /// Chassis info area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chassis: Option<ChassisConfig>,
    /// Board info area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardConfig>,
    /// Product info area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductConfig>,
    /// Multirecord area, one entry per record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multirecord: Option<Vec<MultiRecordConfig>>,
}

impl FruConfig {
    /// Parses a description from JSON text.
    ///
    /// An `internal.file` reference is left unresolved; use [`FruConfig::load`]
    /// or [`InternalConfig::from_bytes`] to supply the file contents.
    ///
    /// # Errors
    ///
    /// Returns `FruError::InvalidConfig` if the text is not a valid description.
    ///
    /// # Example
    ///
    /// ```
    /// use frugen::FruConfig;
    ///
    /// let config = FruConfig::from_json_str(r#"{"chassis": {"type": 23}}"#).unwrap();
    /// assert_eq!(config.chassis.unwrap().chassis_type, Some(23));
    /// assert!(config.board.is_none());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a description from a JSON file.
    ///
    /// When the internal area names a `file`, it is resolved against the
    /// directory of `path` and read eagerly as raw bytes, replacing any inline
    /// `data`. An internal area left without data is dropped.
    ///
    /// # Errors
    ///
    /// - `FruError::Io` if the document cannot be read
    /// - `FruError::InvalidConfig` if it is not a valid description
    /// - `FruError::ConfigurationMissing` if the internal-use file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_json_str(&fs::read_to_string(path)?)?;

        if let Some(internal) = config.internal.as_mut() {
            if let Some(file) = internal.file.take() {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                let resolved = base.join(file);
                let contents = fs::read(&resolved).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => FruError::configuration_missing(&resolved),
                    _ => FruError::Io(e),
                })?;
                tracing::debug!(path = %resolved.display(), len = contents.len(), "read internal-use file");
                internal.contents = Some(contents);
            }
        }
        if config.internal.as_ref().is_some_and(|i| !i.has_data()) {
            tracing::debug!("internal area has no data, dropping it");
            config.internal = None;
        }
        Ok(config)
    }
}

/// Internal-use area contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalConfig {
    /// Inline payload as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Payload file, relative to the description document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Raw payload already read from `file`. Takes precedence over `data`.
    #[serde(skip)]
    pub contents: Option<Vec<u8>>,
}

impl InternalConfig {
    /// Creates an internal area from an inline hex string.
    pub fn from_hex(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Creates an internal area from raw bytes.
    pub fn from_bytes(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    fn has_data(&self) -> bool {
        self.contents.as_deref().is_some_and(|c| !c.is_empty())
            || self.data.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Returns the raw payload, or `None` when there is nothing to encode.
    ///
    /// # Errors
    ///
    /// - `FruError::MalformedHex` if inline data is not valid hex
    /// - `FruError::ConfigurationMissing` if a `file` was never read
    pub fn payload(&self) -> Result<Option<Cow<'_, [u8]>>> {
        if let Some(contents) = &self.contents {
            return Ok((!contents.is_empty()).then_some(Cow::Borrowed(contents.as_slice())));
        }
        if let Some(file) = &self.file {
            return Err(FruError::configuration_missing(file));
        }
        match self.data.as_deref() {
            Some(data) if !data.is_empty() => Ok(Some(Cow::Owned(decode_hex(data)?))),
            _ => Ok(None),
        }
    }
}

/// A user-defined field appended after an area's standard fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field type tag: `binary`, `bcd-plus`, `6bit-ascii`, or `ascii-latin1`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Hex string for `binary`, text otherwise.
    pub data: String,
}

impl CustomField {
    /// Creates a custom field.
    pub fn new(field_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            data: data.into(),
        }
    }
}

/// Chassis info area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChassisConfig {
    /// SMBIOS chassis type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chassis_type: Option<u8>,
    /// Part or model number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Extra fields, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomField>,
}

impl ChassisConfig {
    pub(crate) fn standard_fields(&self) -> [Option<&str>; 2] {
        [self.part_number.as_deref(), self.serial_number.as_deref()]
    }
}

/// Board info area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoardConfig {
    /// Language code, 0 (English) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<u8>,
    /// Manufacture date as `YYYY/MM/DD HH:MM:SS`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_date: Option<String>,
    /// Manufacturer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Part or model number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// FRU file ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Extra fields, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomField>,
}

impl BoardConfig {
    pub(crate) fn standard_fields(&self) -> [Option<&str>; 5] {
        [
            self.manufacturer.as_deref(),
            self.product_name.as_deref(),
            self.serial_number.as_deref(),
            self.part_number.as_deref(),
            self.file_id.as_deref(),
        ]
    }
}

/// Product info area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductConfig {
    /// Language code, 0 (English) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<u8>,
    /// Manufacturer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Part or model number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Product version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Asset tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    /// FRU file ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Extra fields, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomField>,
}

impl ProductConfig {
    pub(crate) fn standard_fields(&self) -> [Option<&str>; 7] {
        [
            self.manufacturer.as_deref(),
            self.product_name.as_deref(),
            self.part_number.as_deref(),
            self.product_version.as_deref(),
            self.serial_number.as_deref(),
            self.asset_tag.as_deref(),
            self.file_id.as_deref(),
        ]
    }
}

/// One multirecord entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MultiRecordConfig {
    /// Record type ID as one hex byte.
    pub record_id: String,
    /// Record format version as one hex byte.
    pub record_version: String,
    /// Payload as a hex string.
    #[serde(default)]
    pub data: String,
}

impl MultiRecordConfig {
    /// Creates a multirecord entry from hex strings.
    pub fn new(
        record_id: impl Into<String>,
        record_version: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            record_version: record_version.into(),
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"{
        "internal": { "data": "0102" },
        "chassis": {
            "type": 23,
            "part-number": "CH-1",
            "serial-number": "S100",
            "custom": [{ "type": "ascii-latin1", "data": "extra" }]
        },
        "board": {
            "language": 25,
            "manufacturer-date": "2020/01/01 00:00:00",
            "manufacturer": "ACME",
            "product-name": "Widget",
            "serial-number": "B100",
            "part-number": "BP-1",
            "file-id": "f1"
        },
        "product": {
            "manufacturer": "ACME",
            "product-version": "1.0",
            "asset-tag": "AT-7"
        },
        "multirecord": [
            { "record-id": "c0", "record-version": "02", "data": "aa" }
        ]
    }"#;

    #[test]
    fn test_parse_full_document() {
        let config = FruConfig::from_json_str(FULL).unwrap();

        assert_eq!(config.internal.unwrap().data.as_deref(), Some("0102"));

        let chassis = config.chassis.unwrap();
        assert_eq!(chassis.chassis_type, Some(23));
        assert_eq!(chassis.standard_fields(), [Some("CH-1"), Some("S100")]);
        assert_eq!(
            chassis.custom,
            vec![CustomField::new("ascii-latin1", "extra")]
        );

        let board = config.board.unwrap();
        assert_eq!(board.language, Some(25));
        assert_eq!(
            board.manufacturer_date.as_deref(),
            Some("2020/01/01 00:00:00")
        );
        assert_eq!(board.file_id.as_deref(), Some("f1"));

        let product = config.product.unwrap();
        assert_eq!(product.language, None);
        assert_eq!(
            product.standard_fields(),
            [Some("ACME"), None, None, Some("1.0"), None, Some("AT-7"), None]
        );

        assert_eq!(
            config.multirecord.unwrap(),
            vec![MultiRecordConfig::new("c0", "02", "aa")]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let config = FruConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FruConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = FruConfig::from_json_str(r#"{"comment": "x", "chassis": {"color": 1}}"#)
            .unwrap();
        assert_eq!(config.chassis, Some(ChassisConfig::default()));
    }

    #[test]
    fn test_invalid_document() {
        let err = FruConfig::from_json_str(r#"{"chassis": {"type": "rack"}}"#).unwrap_err();
        assert!(matches!(err, FruError::InvalidConfig(_)));
    }

    #[test]
    fn test_internal_payload() {
        let inline = InternalConfig::from_hex("aabb");
        assert_eq!(inline.payload().unwrap().as_deref(), Some(&[0xAA, 0xBB][..]));

        let raw = InternalConfig::from_bytes(vec![0x01]);
        assert_eq!(raw.payload().unwrap().as_deref(), Some(&[0x01][..]));

        assert!(InternalConfig::from_hex("").payload().unwrap().is_none());
        assert!(matches!(
            InternalConfig::from_hex("xyz").payload(),
            Err(FruError::MalformedHex { .. })
        ));
    }

    #[test]
    fn test_internal_payload_unresolved_file() {
        let internal = InternalConfig {
            file: Some(PathBuf::from("internal.bin")),
            ..InternalConfig::default()
        };
        assert!(matches!(
            internal.payload(),
            Err(FruError::ConfigurationMissing { .. })
        ));
    }

    #[test]
    fn test_load_resolves_internal_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("internal.bin"), [0xDE, 0xAD]).unwrap();
        let json = dir.path().join("fru.json");
        fs::write(
            &json,
            r#"{"internal": {"data": "00", "file": "internal.bin"}}"#,
        )
        .unwrap();

        let config = FruConfig::load(&json).unwrap();
        let internal = config.internal.unwrap();
        assert_eq!(internal.file, None);
        assert_eq!(internal.payload().unwrap().as_deref(), Some(&[0xDE, 0xAD][..]));
    }

    #[test]
    fn test_load_missing_internal_file() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("fru.json");
        fs::write(&json, r#"{"internal": {"file": "absent.bin"}}"#).unwrap();

        match FruConfig::load(&json).unwrap_err() {
            FruError::ConfigurationMissing { path } => {
                assert_eq!(path, dir.path().join("absent.bin"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_drops_empty_internal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"internal": {"data": ""}, "chassis": {}}"#)
            .unwrap();

        let config = FruConfig::load(file.path()).unwrap();
        assert!(config.internal.is_none());
        assert!(config.chassis.is_some());
    }

    #[test]
    fn test_load_drops_empty_internal_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("internal.bin"), b"").unwrap();
        let json = dir.path().join("fru.json");
        fs::write(&json, r#"{"internal": {"data": "00", "file": "internal.bin"}}"#).unwrap();

        let config = FruConfig::load(&json).unwrap();
        assert!(config.internal.is_none());
        assert!(InternalConfig::from_bytes(Vec::new()).payload().unwrap().is_none());
    }

    #[test]
    fn test_load_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = FruConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FruError::Io(_)));
    }
}
