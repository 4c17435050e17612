//! Board manufacture date encoding.
//!
//! The board area stores its manufacture date as a 3-byte little-endian count
//! of whole minutes since 1996-01-01 00:00:00.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{FruError, Result};

/// Format of manufacture dates in configuration documents.
pub const MFG_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Mask of the 3-byte minute counter.
pub const MFG_MINUTES_MASK: i64 = 0x00FF_FFFF;

fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1996, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Parses a `YYYY/MM/DD HH:MM:SS` timestamp into the 24-bit minute counter.
///
/// The counter is whole minutes since 1996-01-01 00:00:00, rounded down and
/// kept to its low 24 bits. Dates past the counter range (late 2027) wrap
/// around, and dates before the epoch count down from `0xFFFFFF`.
///
/// # Errors
///
/// Returns `FruError::InvalidTimestamp` if the text does not parse.
///
/// # Example
///
/// ```
/// use frugen::date::mfg_minutes;
///
/// assert_eq!(mfg_minutes("1996/01/01 00:00:00").unwrap(), 0);
/// assert_eq!(mfg_minutes("1996/01/02 00:01:30").unwrap(), 1441);
/// assert_eq!(mfg_minutes("1995/12/31 23:59:00").unwrap(), 0xFF_FFFF);
/// ```
pub fn mfg_minutes(value: &str) -> Result<u32> {
    let parsed = NaiveDateTime::parse_from_str(value, MFG_DATE_FORMAT)
        .map_err(|e| FruError::invalid_timestamp(value, e.to_string()))?;

    let epoch = epoch().ok_or_else(|| FruError::invalid_timestamp(value, "invalid epoch"))?;

    let minutes = (parsed - epoch).num_seconds().div_euclid(60);
    let wrapped = minutes & MFG_MINUTES_MASK;
    if wrapped != minutes {
        tracing::warn!(date = value, minutes, "manufacture date outside the 24-bit minute counter, wrapping");
    }
    Ok(wrapped as u32)
}

/// Encodes an optional manufacture date as the 3-byte board field.
///
/// # Errors
///
/// Returns `FruError::InvalidTimestamp` when `value` is `None` or invalid.
///
/// # Example
///
/// ```
/// use frugen::date::encode_mfg_date;
///
/// assert_eq!(encode_mfg_date(Some("2020/01/01 00:00:00")).unwrap(), [0xC0, 0x9C, 0xC0]);
/// assert!(encode_mfg_date(None).is_err());
/// ```
pub fn encode_mfg_date(value: Option<&str>) -> Result<[u8; 3]> {
    let value =
        value.ok_or_else(|| FruError::invalid_timestamp("", "manufacturer-date is required"))?;
    let [b0, b1, b2, _] = mfg_minutes(value)?.to_le_bytes();
    Ok([b0, b1, b2])
}
