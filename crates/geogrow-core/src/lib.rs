//! GeoGrow Core - Domain models, reference data, and configuration
//!
//! This crate contains the domain types and port definitions shared by the
//! geohash, calendar, and geocoding crates. Everything here is immutable
//! once constructed; the engine keeps no state between calls.

pub mod config;
pub mod data;
pub mod dates;
pub mod error;
pub mod models;
pub mod ports;

pub use data::{builtin_reference_data, TableReferenceData};
pub use error::{GrowError, Result};
