//! Base-32 geohash encoding and decoding.
//!
//! Bits alternate between longitude and latitude, longitude first, five bits
//! per output character. Decoding narrows the globe one bit at a time and
//! returns the centre of the final cell.

use geo::Rect;
use geogrow_core::config::validate_precision;
use geogrow_core::error::{GrowError, Result};
use geogrow_core::models::{Coordinate, GEOHASH_ALPHABET};

const BASE32: &[u8; 32] = GEOHASH_ALPHABET;

/// Precision used when callers do not choose one
pub const DEFAULT_PRECISION: usize = 6;

/// Cell covered by a geohash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeohashBounds {
    /// Cell rectangle with x = longitude, y = latitude
    pub rect: Rect<f64>,
    pub center: Coordinate,
}

impl GeohashBounds {
    /// Half the cell height in degrees (maximum latitude error of the centre)
    pub fn lat_error(&self) -> f64 {
        self.rect.height() / 2.0
    }

    /// Half the cell width in degrees (maximum longitude error of the centre)
    pub fn lon_error(&self) -> f64 {
        self.rect.width() / 2.0
    }

    /// True when the coordinate lies inside the cell, edges included
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let min = self.rect.min();
        let max = self.rect.max();
        coordinate.longitude >= min.x
            && coordinate.longitude <= max.x
            && coordinate.latitude >= min.y
            && coordinate.latitude <= max.y
    }
}

/// Encode a latitude/longitude pair as a geohash of `precision` characters
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Result<String> {
    let coordinate = Coordinate::new(latitude, longitude)?;
    let precision = validate_precision(precision)?;
    Ok(encode_coordinate(&coordinate, precision))
}

/// Encode an already validated coordinate
pub(crate) fn encode_coordinate(coordinate: &Coordinate, precision: usize) -> String {
    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);

    let mut even_bit = true;
    let mut bit = 0;
    let mut index = 0usize;

    while hash.len() < precision {
        let (range, value) = if even_bit {
            (&mut lon_range, coordinate.longitude)
        } else {
            (&mut lat_range, coordinate.latitude)
        };

        let mid = (range.0 + range.1) / 2.0;
        if value >= mid {
            index = (index << 1) | 1;
            range.0 = mid;
        } else {
            index <<= 1;
            range.1 = mid;
        }
        even_bit = !even_bit;

        bit += 1;
        if bit == 5 {
            hash.push(BASE32[index] as char);
            bit = 0;
            index = 0;
        }
    }

    hash
}

/// Decode a geohash to the centre of its cell
pub fn decode(geohash: &str) -> Result<Coordinate> {
    Ok(decode_bbox(geohash)?.center)
}

/// Decode a geohash to its full cell
///
/// Empty strings and characters outside the alphabet are rejected rather
/// than decoding to the centre of the globe. Uppercase input is accepted.
pub fn decode_bbox(geohash: &str) -> Result<GeohashBounds> {
    if geohash.is_empty() {
        return Err(GrowError::InvalidGeohash {
            geohash: geohash.to_string(),
            reason: "geohash is empty".to_string(),
        });
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut even_bit = true;

    for c in geohash.chars() {
        let index = char_index(c).ok_or_else(|| GrowError::InvalidGeohash {
            geohash: geohash.to_string(),
            reason: format!("'{}' is not a base-32 geohash character", c),
        })?;

        for shift in (0..5).rev() {
            let bit = (index >> shift) & 1;
            let range = if even_bit { &mut lon_range } else { &mut lat_range };
            let mid = (range.0 + range.1) / 2.0;
            if bit == 1 {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even_bit = !even_bit;
        }
    }

    let rect = Rect::new((lon_range.0, lat_range.0), (lon_range.1, lat_range.1));
    let center = Coordinate {
        latitude: (lat_range.0 + lat_range.1) / 2.0,
        longitude: (lon_range.0 + lon_range.1) / 2.0,
    };

    Ok(GeohashBounds { rect, center })
}

/// Check that every character of `geohash` is in the alphabet
pub fn validate(geohash: &str) -> Result<()> {
    decode_bbox(geohash).map(|_| ())
}

pub(crate) fn char_index(c: char) -> Option<usize> {
    let lower = c.to_ascii_lowercase();
    if !lower.is_ascii() {
        return None;
    }
    BASE32.iter().position(|&b| b == lower as u8)
}
