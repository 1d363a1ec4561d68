//! Location and profile resolution shared by the scheduling commands

use crate::cli::{LocationArgs, OverrideArgs};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use geogrow_calendar::GrowingProfileBuilder;
use geogrow_core::models::{Coordinate, GrowingProfile, ManualOverrides, ZoneId, ZoneRecord};
use geogrow_core::ports::ReferenceData;
use geogrow_geo::{decode_bbox, encode, ZoneResolver};

/// A location with its geohash and resolved zone
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub geohash: String,
    pub zone: ZoneRecord,
}

/// Resolve `--lat/--lon` or `--geohash`
///
/// A geohash is resolved by its own prefix and located at its cell center.
/// Coordinates are encoded at `precision` for display.
pub fn resolve(
    args: &LocationArgs,
    data: &dyn ReferenceData,
    precision: usize,
) -> Result<ResolvedLocation> {
    let resolver = ZoneResolver::new(data);

    match (&args.geohash, args.lat, args.lon) {
        (Some(geohash), _, _) => {
            let bounds = decode_bbox(geohash)?;
            let zone = resolver.resolve_geohash(geohash)?;
            Ok(ResolvedLocation {
                coordinate: bounds.center,
                geohash: geohash.to_ascii_lowercase(),
                zone,
            })
        }
        (None, Some(lat), Some(lon)) => {
            let coordinate = Coordinate::new(lat, lon)?;
            let geohash = encode(lat, lon, precision)?;
            Ok(ResolvedLocation { coordinate, geohash, zone: resolver.resolve(coordinate) })
        }
        _ => bail!("Provide a location with --lat and --lon, or with --geohash"),
    }
}

/// Growing profile for a resolved location with any manual overrides applied
pub fn growing_profile(
    location: &ResolvedLocation,
    overrides: &OverrideArgs,
    data: &dyn ReferenceData,
    year: i32,
) -> Result<GrowingProfile> {
    let builder = GrowingProfileBuilder::new(data);
    let profile = builder.build_for_zone(location.coordinate, location.zone.clone(), year)?;

    let manual = manual_overrides(overrides)?;
    if !manual.is_empty() {
        tracing::info!("Applying manual overrides: {:?}", manual);
    }
    Ok(builder.apply_manual_overrides(&profile, &manual, year)?)
}

pub fn year_or_current(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Local::now().year())
}

fn manual_overrides(args: &OverrideArgs) -> Result<ManualOverrides> {
    let zone = args.zone.as_deref().map(str::parse::<ZoneId>).transpose()?;
    let last_spring_frost =
        args.spring.as_deref().map(|s| parse_date(s, "--spring")).transpose()?;
    let first_fall_frost = args.fall.as_deref().map(|s| parse_date(s, "--fall")).transpose()?;

    Ok(ManualOverrides { zone, last_spring_frost, first_fall_frost })
}

fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{} expects a date as YYYY-MM-DD, got '{}'", flag, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogrow_core::builtin_reference_data;
    use geogrow_core::models::Confidence;

    fn coords(lat: f64, lon: f64) -> LocationArgs {
        LocationArgs { lat: Some(lat), lon: Some(lon), geohash: None }
    }

    #[test]
    fn test_resolve_coordinates() {
        let data = builtin_reference_data().unwrap();
        let location = resolve(&coords(42.36, -71.06), data, 6).unwrap();
        assert_eq!(location.geohash.len(), 6);
        assert_eq!(location.zone.zone.to_string(), "7a");
    }

    #[test]
    fn test_resolve_geohash_uses_cell_center() {
        let data = builtin_reference_data().unwrap();
        let args = LocationArgs { lat: None, lon: None, geohash: Some("DRT2YZ".to_string()) };
        let location = resolve(&args, data, 6).unwrap();
        assert_eq!(location.geohash, "drt2yz");
        assert!((location.coordinate.latitude - 42.36).abs() < 0.01);
    }

    #[test]
    fn test_missing_location_is_an_error() {
        let data = builtin_reference_data().unwrap();
        let args = LocationArgs { lat: None, lon: None, geohash: None };
        assert!(resolve(&args, data, 6).is_err());
    }

    #[test]
    fn test_overrides_mark_profile_manual() {
        let data = builtin_reference_data().unwrap();
        let location = resolve(&coords(42.36, -71.06), data, 6).unwrap();
        let overrides = OverrideArgs {
            zone: None,
            spring: Some("2025-04-20".to_string()),
            fall: Some("2025-10-10".to_string()),
        };

        let profile = growing_profile(&location, &overrides, data, 2025).unwrap();
        assert_eq!(profile.confidence, Confidence::Manual);
        assert_eq!(profile.growing_season_days, 173);
    }

    #[test]
    fn test_bad_override_date_is_an_error() {
        let data = builtin_reference_data().unwrap();
        let location = resolve(&coords(42.36, -71.06), data, 6).unwrap();
        let overrides = OverrideArgs { spring: Some("April 20".to_string()), ..Default::default() };
        assert!(growing_profile(&location, &overrides, data, 2025).is_err());
    }
}
