//! Best-effort lookups that never fail.

use geogrow_core::models::{Coordinate, PlaceName};
use geogrow_core::ports::ReverseGeocoder;

/// Coordinate rendered as `"lat, lon"` with four decimals
pub fn coordinate_label(coordinate: Coordinate) -> String {
    coordinate.to_string()
}

/// Display name for a coordinate, or the coordinate itself on any failure
pub fn display_name_or_fallback(geocoder: &dyn ReverseGeocoder, coordinate: Coordinate) -> String {
    match geocoder.reverse_geocode(coordinate) {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => coordinate_label(coordinate),
        Err(e) => {
            tracing::warn!("Reverse geocoding failed for {}: {}", coordinate, e);
            coordinate_label(coordinate)
        }
    }
}

/// Structured place for a coordinate; on failure the city carries the
/// coordinate string and the state is empty
pub fn place_or_fallback(geocoder: &dyn ReverseGeocoder, coordinate: Coordinate) -> PlaceName {
    match geocoder.reverse_geocode_with_neighborhood(coordinate) {
        Ok(place) => place,
        Err(e) => {
            tracing::warn!("Neighborhood lookup failed for {}: {}", coordinate, e);
            PlaceName { neighborhood: None, city: coordinate_label(coordinate), state: String::new() }
        }
    }
}
