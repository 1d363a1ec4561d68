//! Growing profile composition and manual overrides.

use crate::frost::FrostDateCalculator;
use geogrow_core::dates::days_between;
use geogrow_core::error::{GrowError, Result};
use geogrow_core::models::{
    Confidence, Coordinate, GrowingProfile, ManualOverrides, ZoneRecord,
};
use geogrow_core::ports::ReferenceData;
use geogrow_geo::ZoneResolver;

/// Composes zone resolution, frost dates, and climate flags into a profile
pub struct GrowingProfileBuilder<'a> {
    data: &'a dyn ReferenceData,
}

impl<'a> GrowingProfileBuilder<'a> {
    pub fn new(data: &'a dyn ReferenceData) -> Self {
        Self { data }
    }

    /// Build the profile for a coordinate in `year`
    pub fn build(&self, coordinate: Coordinate, year: i32) -> Result<GrowingProfile> {
        let record = ZoneResolver::new(self.data).resolve(coordinate);
        self.build_for_zone(coordinate, record, year)
    }

    /// Build the profile for a coordinate whose zone is already known
    pub fn build_for_zone(
        &self,
        coordinate: Coordinate,
        record: ZoneRecord,
        year: i32,
    ) -> Result<GrowingProfile> {
        let southern = coordinate.is_southern_hemisphere();
        let tropical = coordinate.is_tropical();
        let frost =
            FrostDateCalculator::new(self.data).get_frost_dates(&record.zone, year, southern)?;

        let wet_season = if tropical { self.data.wet_season(southern) } else { None };

        Ok(GrowingProfile {
            zone: record.zone,
            last_spring_frost: frost.last_spring_frost,
            first_fall_frost: frost.first_fall_frost,
            growing_season_days: frost.season_days,
            is_tropical: tropical,
            is_southern_hemisphere: southern,
            wet_season_start: wet_season.map(|season| season.start_month),
            wet_season_end: wet_season.map(|season| season.end_month),
            confidence: record.confidence,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }

    /// Return a copy of `profile` with user-supplied values applied
    ///
    /// A zone override without date overrides re-derives the frost dates
    /// from the new zone. Date overrides replace the dates and recompute
    /// the season length. Any override sets confidence to `manual`; an empty
    /// override set returns the profile unchanged.
    ///
    /// Fails with [`GrowError::InvalidOverride`] when the resulting last
    /// spring frost is not before the first fall frost.
    pub fn apply_manual_overrides(
        &self,
        profile: &GrowingProfile,
        overrides: &ManualOverrides,
        year: i32,
    ) -> Result<GrowingProfile> {
        if overrides.is_empty() {
            return Ok(profile.clone());
        }

        let mut updated = profile.clone();
        updated.confidence = Confidence::Manual;

        if let Some(zone) = &overrides.zone {
            updated.zone = zone.clone();
            if !overrides.overrides_dates() {
                let frost = FrostDateCalculator::new(self.data).get_frost_dates(
                    zone,
                    year,
                    profile.is_southern_hemisphere,
                )?;
                updated.last_spring_frost = frost.last_spring_frost;
                updated.first_fall_frost = frost.first_fall_frost;
                updated.growing_season_days = frost.season_days;
                return Ok(updated);
            }
        }

        if let Some(spring) = overrides.last_spring_frost {
            updated.last_spring_frost = spring;
        }
        if let Some(fall) = overrides.first_fall_frost {
            updated.first_fall_frost = fall;
        }

        if updated.last_spring_frost >= updated.first_fall_frost {
            return Err(GrowError::InvalidOverride {
                last_spring_frost: updated.last_spring_frost,
                first_fall_frost: updated.first_fall_frost,
            });
        }

        updated.growing_season_days =
            days_between(updated.last_spring_frost, updated.first_fall_frost);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogrow_core::builtin_reference_data;
    use geogrow_core::dates::ymd;
    use geogrow_core::models::ZoneId;

    fn builder() -> GrowingProfileBuilder<'static> {
        GrowingProfileBuilder::new(builtin_reference_data().unwrap())
    }

    fn new_york() -> Coordinate {
        Coordinate::new(40.7128, -74.0060).unwrap()
    }

    #[test]
    fn test_temperate_profile() {
        let profile = builder().build(new_york(), 2025).unwrap();

        assert_eq!(profile.zone.to_string(), "7b");
        assert_eq!(profile.confidence, Confidence::Precise);
        assert!(!profile.is_tropical);
        assert!(!profile.is_southern_hemisphere);
        assert_eq!(profile.wet_season_start, None);
        assert_eq!(profile.last_spring_frost, ymd(2025, 3, 25).unwrap());
        assert_eq!(profile.first_fall_frost, ymd(2025, 11, 7).unwrap());
    }

    #[test]
    fn test_tropical_profiles_carry_wet_season() {
        let bangkok = builder().build(Coordinate::new(13.75, 100.50).unwrap(), 2025).unwrap();
        assert!(bangkok.is_tropical);
        assert_eq!((bangkok.wet_season_start, bangkok.wet_season_end), (Some(6), Some(10)));

        let darwin = builder().build(Coordinate::new(-12.46, 130.84).unwrap(), 2025).unwrap();
        assert!(darwin.is_tropical && darwin.is_southern_hemisphere);
        assert_eq!((darwin.wet_season_start, darwin.wet_season_end), (Some(11), Some(3)));
    }

    #[test]
    fn test_zone_override_rederives_frost_dates() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let overrides =
            ManualOverrides { zone: Some("5a".parse().unwrap()), ..Default::default() };

        let updated = b.apply_manual_overrides(&profile, &overrides, 2025).unwrap();
        assert_eq!(updated.zone.to_string(), "5a");
        assert_eq!(updated.confidence, Confidence::Manual);
        assert!(updated.last_spring_frost > profile.last_spring_frost);
        assert!(updated.growing_season_days < profile.growing_season_days);
    }

    #[test]
    fn test_reusing_the_same_zone_is_still_manual() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let overrides = ManualOverrides { zone: Some(profile.zone.clone()), ..Default::default() };

        let updated = b.apply_manual_overrides(&profile, &overrides, 2025).unwrap();
        assert_eq!(updated.zone, profile.zone);
        assert_eq!(updated.confidence, Confidence::Manual);
    }

    #[test]
    fn test_date_override_recomputes_season() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let overrides = ManualOverrides {
            zone: None,
            last_spring_frost: Some(ymd(2025, 4, 10).unwrap()),
            first_fall_frost: Some(ymd(2025, 10, 20).unwrap()),
        };

        let updated = b.apply_manual_overrides(&profile, &overrides, 2025).unwrap();
        assert_eq!(updated.growing_season_days, 193);
        assert_eq!(updated.zone, profile.zone);
        assert_eq!(updated.confidence, Confidence::Manual);
    }

    #[test]
    fn test_zone_and_dates_keep_supplied_dates() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let zone: ZoneId = "4a".parse().unwrap();
        let overrides = ManualOverrides {
            zone: Some(zone.clone()),
            last_spring_frost: Some(ymd(2025, 5, 1).unwrap()),
            first_fall_frost: None,
        };

        let updated = b.apply_manual_overrides(&profile, &overrides, 2025).unwrap();
        assert_eq!(updated.zone, zone);
        assert_eq!(updated.last_spring_frost, ymd(2025, 5, 1).unwrap());
        assert_eq!(updated.first_fall_frost, profile.first_fall_frost);
    }

    #[test]
    fn test_inverted_override_is_rejected() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let overrides = ManualOverrides {
            zone: None,
            last_spring_frost: Some(ymd(2025, 10, 1).unwrap()),
            first_fall_frost: Some(ymd(2025, 4, 1).unwrap()),
        };

        let err = b.apply_manual_overrides(&profile, &overrides, 2025).unwrap_err();
        assert!(matches!(err, GrowError::InvalidOverride { .. }));
    }

    #[test]
    fn test_equal_override_dates_are_rejected() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let same = ymd(2025, 6, 1).unwrap();
        let overrides =
            ManualOverrides { zone: None, last_spring_frost: Some(same), first_fall_frost: Some(same) };

        assert!(b.apply_manual_overrides(&profile, &overrides, 2025).is_err());
    }

    #[test]
    fn test_empty_override_is_a_no_op() {
        let b = builder();
        let profile = b.build(new_york(), 2025).unwrap();
        let updated = b.apply_manual_overrides(&profile, &ManualOverrides::default(), 2025).unwrap();
        assert_eq!(updated, profile);
    }
}
