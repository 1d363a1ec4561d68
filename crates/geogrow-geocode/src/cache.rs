//! Bounded result cache for reverse geocoding.
//!
//! Results are keyed by coordinates rounded to three decimals (about 110 m),
//! so nearby lookups share an entry. Only successful lookups are cached.

use geogrow_core::config::LayeredConfig;
use geogrow_core::error::Result;
use geogrow_core::models::{Coordinate, PlaceName};
use geogrow_core::ports::ReverseGeocoder;
use moka::sync::Cache;
use std::time::Duration;

/// Decimal places kept in cache keys
const KEY_DECIMALS: i32 = 3;

/// Coordinate rounded to [`KEY_DECIMALS`], stored as fixed-point integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    latitude: i64,
    longitude: i64,
}

impl CacheKey {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        let scale = 10f64.powi(KEY_DECIMALS);
        Self {
            latitude: (coordinate.latitude * scale).round() as i64,
            longitude: (coordinate.longitude * scale).round() as i64,
        }
    }
}

/// Wraps a geocoder with bounded, expiring caches
pub struct CachedGeocoder<G> {
    inner: G,
    display_names: Cache<CacheKey, String>,
    places: Cache<CacheKey, PlaceName>,
}

impl<G: ReverseGeocoder> CachedGeocoder<G> {
    /// Cache at most `capacity` entries per lookup kind for `ttl`
    pub fn new(inner: G, capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            display_names: Cache::builder().max_capacity(capacity).time_to_live(ttl).build(),
            places: Cache::builder().max_capacity(capacity).time_to_live(ttl).build(),
        }
    }

    /// Use the configured capacity and TTL
    pub fn from_config(inner: G, config: &LayeredConfig) -> Self {
        Self::new(
            inner,
            config.geocode_cache_capacity.value,
            Duration::from_secs(config.geocode_cache_ttl_secs.value),
        )
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.display_names.invalidate_all();
        self.places.invalidate_all();
    }
}

impl<G: ReverseGeocoder> ReverseGeocoder for CachedGeocoder<G> {
    fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String> {
        let key = CacheKey::from_coordinate(coordinate);
        if let Some(cached) = self.display_names.get(&key) {
            tracing::debug!("Geocode cache hit for {}", coordinate);
            return Ok(cached);
        }

        let name = self.inner.reverse_geocode(coordinate)?;
        self.display_names.insert(key, name.clone());
        Ok(name)
    }

    fn reverse_geocode_with_neighborhood(&self, coordinate: Coordinate) -> Result<PlaceName> {
        let key = CacheKey::from_coordinate(coordinate);
        if let Some(cached) = self.places.get(&key) {
            tracing::debug!("Place cache hit for {}", coordinate);
            return Ok(cached);
        }

        let place = self.inner.reverse_geocode_with_neighborhood(coordinate)?;
        self.places.insert(key, place.clone());
        Ok(place)
    }
}
