//! # frugen
//!
//! A Rust library and command-line tool that builds IPMI FRU (Field Replaceable
//! Unit) information storage images from a JSON description.
//!
//! This is an **encoder-only** library: it turns a description into the
//! binary layout of the IPMI Platform Management FRU Information Storage
//! Definition. It does not parse existing images back into descriptions.
//!
//! ## Features
//!
//! - **Byte-exact** — every area is 8-byte aligned and zero-sum checksummed
//! - **Deterministic** — the same description always yields the same bytes
//! - **No panics** — all errors returned as `Result<T, FruError>`
//! - **Fail fast** — any invalid field aborts the whole image, nothing partial is produced
//! - **Visible gaps** — custom fields of types without an encoder are reported, not silently lost
//!
//! ## Quick Start
//!
//! ```
//! use frugen::{FruConfig, FruEncoder};
//!
//! fn main() -> frugen::Result<()> {
//!     let config = FruConfig::from_json_str(r#"{
//!         "chassis": { "type": 23, "serial-number": "CH0001" },
//!         "board": {
//!             "manufacturer-date": "2020/01/01 00:00:00",
//!             "manufacturer": "ACME",
//!             "custom": [{ "type": "binary", "data": "deadbeef" }]
//!         }
//!     }"#)?;
//!
//!     let image = FruEncoder::default().encode(&config)?;
//!     let bytes = image.to_bytes();
//!     assert_eq!(bytes[0], 0x01);
//!     assert_eq!(bytes.len() % 8, 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Image Layout
//!
//! | Area | Offset byte | Content |
//! |------|:-----------:|---------|
//! | Common header | — | version, five area offsets, checksum |
//! | [`AreaKind::Internal`] | 1 | opaque OEM data |
//! | [`AreaKind::Chassis`] | 2 | chassis type, part and serial numbers |
//! | [`AreaKind::Board`] | 3 | language, manufacture date, board identity |
//! | [`AreaKind::Product`] | 4 | language, product identity, asset tag |
//! | [`AreaKind::MultiRecord`] | 5 | typed records (power supply, OEM, ...) |
//!
//! Areas appear in this order and are omitted entirely when not configured.
//!
//! ## Field Types
//!
//! | Tag | [`FieldType`] | Supported |
//! |-----|---------------|:---------:|
//! | `binary` | [`FieldType::Binary`] | ✓ |
//! | `ascii-latin1` | [`FieldType::AsciiLatin1`] | ✓ |
//! | `bcd-plus` | [`FieldType::BcdPlus`] | ✗ (skipped, reported) |
//! | `6bit-ascii` | [`FieldType::SixBitAscii`] | ✗ (skipped, reported) |
//!
//! ## Error Handling
//!
//! ```
//! use frugen::{FruConfig, FruEncoder, FruError};
//!
//! let config = FruConfig::from_json_str(r#"{"board": {"manufacturer": "ACME"}}"#)?;
//!
//! match FruEncoder::default().encode(&config) {
//!     Ok(image) => println!("{} bytes", image.len()),
//!     Err(FruError::InvalidTimestamp { value, reason }) => {
//!         println!("bad manufacture date '{}': {}", value, reason);
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok::<(), FruError>(())
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod area;
mod config;
pub mod date;
mod encoder;
mod error;
mod field;
mod header;
mod multirecord;
pub mod utils;

// Public re-exports
pub use area::{
    encode_board, encode_chassis, encode_internal, encode_product, Area, AreaKind,
    AREA_FORMAT_VERSION, BLOCK_SIZE, INTERNAL_FORMAT_VERSION, MAX_AREA_SIZE,
};
pub use config::{
    BoardConfig, ChassisConfig, CustomField, FruConfig, InternalConfig, MultiRecordConfig,
    ProductConfig,
};
pub use encoder::{encode_image, EncoderConfig, FruEncoder, FruImage};
pub use error::{FruError, Result};
pub use field::{
    encode_field, encode_tagged_field, EncodedField, FieldType, LengthOverflow, EMPTY_FIELD,
    END_OF_FIELDS, MAX_FIELD_LEN,
};
pub use header::{CommonHeader, COMMON_HEADER_SIZE, COMMON_HEADER_VERSION};
pub use multirecord::{
    encode_multirecord, MultiRecord, END_OF_LIST, MAX_RECORD_PAYLOAD, RECORD_HEADER_SIZE,
};

/// Crate version, as reported by the command-line tool.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
