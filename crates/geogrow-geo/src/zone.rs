//! Hardiness zone resolution.
//!
//! Lookup runs through three tiers and always ends in a zone:
//!
//! 1. the 3-character geohash prefix in the precise table (`precise`)
//! 2. the 2-character prefix, first in the regional table and then as a
//!    sorted scan of precise keys sharing that prefix (`estimated`)
//! 3. the latitude-band table, falling back to fixed defaults when no band
//!    covers the latitude (`estimated`)

use crate::geohash;
use geogrow_core::error::Result;
use geogrow_core::models::{Confidence, Coordinate, ZoneId, ZoneRecord};
use geogrow_core::ports::ReferenceData;

/// Below this absolute latitude an unmatched location is treated as tropical
pub const TROPICAL_DEFAULT_BELOW: f64 = 10.0;

/// Above this absolute latitude an unmatched location gets the coldest zone
pub const COLDEST_DEFAULT_ABOVE: f64 = 60.0;

const PRECISE_PREFIX_LEN: usize = 3;
const REGIONAL_PREFIX_LEN: usize = 2;

/// Resolves coordinates and geohashes to hardiness zones
pub struct ZoneResolver<'a> {
    data: &'a dyn ReferenceData,
}

impl<'a> ZoneResolver<'a> {
    pub fn new(data: &'a dyn ReferenceData) -> Self {
        Self { data }
    }

    /// Resolve the zone for a coordinate
    pub fn resolve(&self, coordinate: Coordinate) -> ZoneRecord {
        let prefix = geohash::encode_coordinate(&coordinate, PRECISE_PREFIX_LEN);
        self.resolve_prefix(&prefix, coordinate.latitude)
    }

    /// Resolve the zone for a geohash of any length
    ///
    /// Fails only if the geohash itself is malformed. The latitude-band tier
    /// uses the centre of the geohash cell.
    pub fn resolve_geohash(&self, geohash: &str) -> Result<ZoneRecord> {
        let center = geohash::decode(geohash)?;
        let normalized = geohash.to_ascii_lowercase();
        Ok(self.resolve_prefix(&normalized, center.latitude))
    }

    fn resolve_prefix(&self, geohash: &str, latitude: f64) -> ZoneRecord {
        if let Some(zone) = self.precise_match(geohash) {
            tracing::debug!("Zone {} from precise prefix of {}", zone, geohash);
            return ZoneRecord::new(zone, Confidence::Precise);
        }

        if let Some(zone) = self.regional_match(geohash) {
            tracing::debug!("Zone {} from regional prefix of {}", zone, geohash);
            return ZoneRecord::new(zone, Confidence::Estimated);
        }

        let zone = self.latitude_match(latitude);
        tracing::debug!("Zone {} from latitude {:.4}", zone, latitude);
        ZoneRecord::new(zone, Confidence::Estimated)
    }

    fn precise_match(&self, geohash: &str) -> Option<ZoneId> {
        let prefix = geohash.get(..PRECISE_PREFIX_LEN)?;
        self.data.precise_zones().get(prefix).cloned()
    }

    fn regional_match(&self, geohash: &str) -> Option<ZoneId> {
        let prefix = geohash.get(..REGIONAL_PREFIX_LEN)?;

        if let Some(zone) = self.data.regional_zones().get(prefix) {
            return Some(zone.clone());
        }

        // Keys are ordered, so the first match is the lexically smallest
        self.data
            .precise_zones()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, zone)| zone.clone())
            .next()
    }

    fn latitude_match(&self, latitude: f64) -> ZoneId {
        let abs_lat = latitude.abs();

        if let Some(band) = self.data.latitude_bands().iter().find(|band| band.contains(abs_lat)) {
            return band.zone.clone();
        }

        if abs_lat < TROPICAL_DEFAULT_BELOW {
            ZoneId::TROPICAL_DEFAULT
        } else if abs_lat > COLDEST_DEFAULT_ABOVE {
            ZoneId::COLDEST_DEFAULT
        } else {
            ZoneId::TEMPERATE_DEFAULT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogrow_core::builtin_reference_data;
    use geogrow_core::TableReferenceData;

    fn zone(id: &str) -> ZoneId {
        id.parse().unwrap()
    }

    #[test]
    fn test_precise_hit() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);

        let record = resolver.resolve(Coordinate::new(37.7749, -122.4194).unwrap());
        assert_eq!(record.zone, zone("10b"));
        assert_eq!(record.confidence, Confidence::Precise);
    }

    #[test]
    fn test_regional_table_hit() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);

        // 9qz is not a precise prefix; 9q is regional
        let record = resolver.resolve_geohash("9qzzzz").unwrap();
        assert_eq!(record.zone, zone("9b"));
        assert_eq!(record.confidence, Confidence::Estimated);
    }

    #[test]
    fn test_regional_scan_of_precise_keys() {
        let data = TableReferenceData::from_toml_str(
            r#"
[precise_zones]
"9qz" = "8a"
"9q5" = "10b"
"#,
        )
        .unwrap();
        let resolver = ZoneResolver::new(&data);

        // 9qb is unknown; the sorted scan picks 9q5 before 9qz
        let record = resolver.resolve_geohash("9qbbbb").unwrap();
        assert_eq!(record.zone, zone("10b"));
        assert_eq!(record.confidence, Confidence::Estimated);
    }

    #[test]
    fn test_latitude_band_fallback() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);

        // Cape Town: no prefix entry, 30-35 degree band
        let record = resolver.resolve(Coordinate::new(-33.92, 18.42).unwrap());
        assert_eq!(record.zone, zone("9a"));
        assert_eq!(record.confidence, Confidence::Estimated);
    }

    #[test]
    fn test_boundary_defaults() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);

        // Quito sits below the first band
        let quito = resolver.resolve(Coordinate::new(-0.18, -78.47).unwrap());
        assert_eq!(quito.zone, ZoneId::TROPICAL_DEFAULT);
        assert_eq!(quito.confidence, Confidence::Estimated);

        // Reykjavik sits above the last band
        let reykjavik = resolver.resolve(Coordinate::new(64.15, -21.94).unwrap());
        assert_eq!(reykjavik.zone, ZoneId::COLDEST_DEFAULT);
    }

    #[test]
    fn test_temperate_default_for_band_gap() {
        let data = TableReferenceData::from_toml_str("").unwrap();
        let resolver = ZoneResolver::new(&data);

        let record = resolver.resolve(Coordinate::new(45.0, 10.0).unwrap());
        assert_eq!(record.zone, ZoneId::TEMPERATE_DEFAULT);
    }

    #[test]
    fn test_short_geohash_skips_prefix_tiers() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);

        // A single character never matches a prefix table
        let record = resolver.resolve_geohash("9").unwrap();
        assert_eq!(record.confidence, Confidence::Estimated);
    }

    #[test]
    fn test_invalid_geohash_is_an_error() {
        let data = builtin_reference_data().unwrap();
        let resolver = ZoneResolver::new(data);
        assert!(resolver.resolve_geohash("").is_err());
        assert!(resolver.resolve_geohash("9qa").is_err());
    }
}
