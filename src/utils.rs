//! Checksum, padding, and hex helpers shared by the area encoders.
//!
//! Every checksummed span in a FRU image follows the same rule: the bytes,
//! including the checksum byte itself, sum to zero modulo 256.
//!
//! # Example
//!
//! ```
//! use frugen::utils::{is_zero_sum, zero_checksum};
//!
//! let mut header = vec![0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
//! header.push(zero_checksum(&header));
//! assert_eq!(header[7], 0xFE);
//! assert!(is_zero_sum(&header));
//! ```

use crate::error::{FruError, Result};

/// Sums bytes modulo 256.
///
/// # Example
///
/// ```
/// use frugen::utils::byte_sum;
///
/// assert_eq!(byte_sum(&[0xFF, 0x02]), 0x01);
/// ```
#[inline]
pub fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Computes the checksum byte that makes `bytes` sum to zero modulo 256.
///
/// # Arguments
///
/// * `bytes` - The span covered by the checksum, excluding the checksum itself
///
/// # Example
///
/// ```
/// use frugen::utils::zero_checksum;
///
/// assert_eq!(zero_checksum(&[0xAA]), 0x56);
/// assert_eq!(zero_checksum(&[]), 0x00);
/// ```
#[inline]
pub fn zero_checksum(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(byte_sum(bytes))
}

/// Returns whether `bytes` sum to zero modulo 256.
#[inline]
pub fn is_zero_sum(bytes: &[u8]) -> bool {
    byte_sum(bytes) == 0
}

/// Appends zero bytes until `buf.len() % modulus == remainder`.
///
/// # Example
///
/// ```
/// use frugen::utils::pad_until;
///
/// let mut buf = vec![0xC1];
/// pad_until(&mut buf, 8, 5);
/// assert_eq!(buf.len(), 5);
///
/// let mut aligned = vec![0x01, 0xAA];
/// pad_until(&mut aligned, 8, 0);
/// assert_eq!(aligned, [0x01, 0xAA, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn pad_until(buf: &mut Vec<u8>, modulus: usize, remainder: usize) {
    debug_assert!(remainder < modulus);
    let missing = (modulus + remainder - buf.len() % modulus) % modulus;
    buf.resize(buf.len() + missing, 0);
}

/// Decodes a hex-digit string into raw bytes.
///
/// Upper and lower case digits are accepted. Whitespace is not.
///
/// # Errors
///
/// Returns `FruError::MalformedHex` on non-hex characters or an odd number of digits.
///
/// # Example
///
/// ```
/// use frugen::utils::decode_hex;
///
/// assert_eq!(decode_hex("deadBEEF").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
/// assert!(decode_hex("abc").is_err());
/// assert!(decode_hex("0g").is_err());
/// ```
pub fn decode_hex(value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| FruError::malformed_hex(value, e.to_string()))
}

/// Decodes a hex string that must contain exactly one byte (two digits).
///
/// # Errors
///
/// Returns `FruError::MalformedHex` if the string is not valid hex or does not
/// decode to exactly one byte.
///
/// # Example
///
/// ```
/// use frugen::utils::decode_hex_byte;
///
/// assert_eq!(decode_hex_byte("c0").unwrap(), 0xC0);
/// assert!(decode_hex_byte("0102").is_err());
/// assert!(decode_hex_byte("").is_err());
/// ```
pub fn decode_hex_byte(value: &str) -> Result<u8> {
    match decode_hex(value)?.as_slice() {
        [byte] => Ok(*byte),
        other => Err(FruError::malformed_hex(
            value,
            format!("expected exactly 1 byte, got {}", other.len()),
        )),
    }
}
