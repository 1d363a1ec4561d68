//! Error types for GeoGrow

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowError {
    // Geometry and encoding errors
    #[error("Invalid geohash '{geohash}': {reason}")]
    InvalidGeohash { geohash: String, reason: String },

    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    // Zone and calendar errors
    #[error("Invalid hardiness zone '{zone}': expected one or two digits followed by 'a' or 'b'")]
    InvalidZone { zone: String },

    #[error(
        "Invalid manual frost dates: last spring frost {last_spring_frost} must be before first fall frost {first_fall_frost}"
    )]
    InvalidOverride {
        last_spring_frost: chrono::NaiveDate,
        first_fall_frost: chrono::NaiveDate,
    },

    #[error("Date out of range: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    // Reference data errors
    #[error("Reference data error: {reason}")]
    ReferenceData { reason: String },

    #[error("Reference data file not found at {path}")]
    ReferenceDataNotFound { path: PathBuf },

    // Geocoder errors
    #[error("Geocoder unavailable: {reason}. Try: {remediation}")]
    GeocoderUnavailable { reason: String, remediation: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GrowError>;
