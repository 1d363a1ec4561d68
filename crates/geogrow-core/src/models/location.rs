//! Geographic coordinate value type.

use crate::error::{GrowError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude bounding the tropics (Tropic of Cancer / Capricorn), in degrees.
pub const TROPIC_LATITUDE: f64 = 23.5;

/// Geohash alphabet (no `a`, `i`, `l`, `o`)
pub const GEOHASH_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// A WGS 84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(GrowError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    pub fn is_southern_hemisphere(&self) -> bool {
        self.latitude < 0.0
    }

    /// True when the latitude lies between the tropics (inclusive)
    pub fn is_tropical(&self) -> bool {
        self.latitude.abs() <= TROPIC_LATITUDE
    }
}

/// Human-readable place returned by a reverse geocoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceName {
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(neighborhood) = &self.neighborhood {
            write!(f, "{}, ", neighborhood)?;
        }
        f.write_str(&self.city)?;
        if !self.state.is_empty() {
            write!(f, ", {}", self.state)?;
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
