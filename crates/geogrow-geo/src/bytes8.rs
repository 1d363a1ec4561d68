//! Fixed-width 8-byte geohash token.
//!
//! The token is the ASCII bytes of the first eight geohash characters,
//! zero-padded on the right. It exists only for interchange with stores that
//! keep locations as `bytes8` values; any such store must use exactly this
//! layout. It is not a compressed encoding.
//!
//! Encoding is strict. Decoding is lossy: bytes outside the geohash alphabet
//! are dropped with a warning instead of failing the whole token.

use crate::geohash;
use geogrow_core::error::{GrowError, Result};
use serde::{Deserialize, Serialize};

/// Number of geohash characters a token can hold
pub const TOKEN_LEN: usize = 8;

/// Location recovered from a hex-encoded token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bytes8Location {
    pub geohash: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Pack a geohash into the 8-byte token; characters past the eighth are cut
pub fn to_bytes8(geohash: &str) -> Result<[u8; TOKEN_LEN]> {
    geohash::validate(geohash)?;

    let mut token = [0u8; TOKEN_LEN];
    for (slot, c) in token.iter_mut().zip(geohash.chars()) {
        *slot = c.to_ascii_lowercase() as u8;
    }
    Ok(token)
}

/// Pack a geohash and render the token as `0x`-prefixed lowercase hex
pub fn to_bytes8_hex(geohash: &str) -> Result<String> {
    let token = to_bytes8(geohash)?;
    let hex: String = token.iter().map(|b| format!("{:02x}", b)).collect();
    Ok(format!("0x{}", hex))
}

/// Recover a geohash and its centre from a hex-encoded token
///
/// Reads bytes until a zero byte or eight bytes have been consumed. Longer
/// inputs (e.g. a right-padded `bytes32`) are accepted; only the first eight
/// bytes are read.
pub fn from_bytes8_hex(hex: &str) -> Result<Bytes8Location> {
    let invalid = |reason: String| GrowError::InvalidGeohash { geohash: hex.to_string(), reason };

    let digits = hex
        .trim()
        .strip_prefix("0x")
        .or_else(|| hex.trim().strip_prefix("0X"))
        .unwrap_or_else(|| hex.trim());

    if digits.is_empty() {
        return Err(invalid("token is empty".to_string()));
    }
    if digits.len() % 2 != 0 {
        return Err(invalid("hex string has an odd number of digits".to_string()));
    }
    if !digits.is_ascii() {
        return Err(invalid("token contains non-hex characters".to_string()));
    }

    let mut geohash = String::with_capacity(TOKEN_LEN);
    for pair in digits.as_bytes().chunks(2).take(TOKEN_LEN) {
        let pair = std::str::from_utf8(pair).map_err(|e| invalid(e.to_string()))?;
        let byte = u8::from_str_radix(pair, 16)
            .map_err(|_| invalid(format!("'{}' is not a hex byte", pair)))?;

        if byte == 0 {
            break;
        }

        let c = byte as char;
        if geohash::char_index(c).is_some() {
            geohash.push(c.to_ascii_lowercase());
        } else {
            tracing::warn!("Dropping byte 0x{:02x} outside the geohash alphabet in {}", byte, hex);
        }
    }

    if geohash.is_empty() {
        return Err(invalid("token holds no geohash characters".to_string()));
    }

    let center = geohash::decode(&geohash)?;
    Ok(Bytes8Location { geohash, latitude: center.latitude, longitude: center.longitude })
}
