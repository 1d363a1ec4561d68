//! GeoGrow Geocode - Reverse-geocoding adapters
//!
//! The engine itself never touches the network. This crate provides the
//! [`ReverseGeocoder`](geogrow_core::ports::ReverseGeocoder) adapters used at
//! the edges: an HTTP adapter for Nominatim, an explicit bounded cache that
//! wraps any geocoder, and helpers that degrade to a coordinate string when
//! a lookup fails.

pub mod cache;
pub mod fallback;
pub mod nominatim;

pub use cache::CachedGeocoder;
pub use fallback::{coordinate_label, display_name_or_fallback, place_or_fallback};
pub use nominatim::NominatimGeocoder;
