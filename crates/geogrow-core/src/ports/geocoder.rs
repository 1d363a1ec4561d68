use crate::error::Result;
use crate::models::{Coordinate, PlaceName};

/// Port for turning coordinates into place names
///
/// Implementations are best-effort network adapters; callers that must not
/// fail should go through the fallback helpers in `geogrow-geocode`.
pub trait ReverseGeocoder: Send + Sync {
    /// Full display name for a coordinate
    fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String>;

    /// Structured neighborhood/city/state lookup
    fn reverse_geocode_with_neighborhood(&self, coordinate: Coordinate) -> Result<PlaceName>;
}
