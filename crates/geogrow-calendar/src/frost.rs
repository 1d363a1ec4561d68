//! Frost windows per zone, year, and hemisphere.

use geogrow_core::dates::{self, days_between};
use geogrow_core::error::Result;
use geogrow_core::models::{FrostWindow, MonthDay, ZoneFrostData, ZoneId};
use geogrow_core::ports::ReferenceData;

/// Last spring frost used when a zone has no table entry (month, day)
pub const FALLBACK_LAST_SPRING_FROST: (u32, u32) = (4, 15);

/// First fall frost used when a zone has no table entry (month, day)
pub const FALLBACK_FIRST_FALL_FROST: (u32, u32) = (10, 15);

/// Nominal season length reported with the fallback dates
pub const FALLBACK_SEASON_DAYS: u32 = 180;

/// Season length reported for frost-free zones
pub const FROST_FREE_SEASON_DAYS: i64 = 365;

/// Months added to northern dates to get their southern-hemisphere meaning
const SOUTHERN_MONTH_SHIFT: u32 = 6;

/// Maps zones to frost windows
pub struct FrostDateCalculator<'a> {
    data: &'a dyn ReferenceData,
}

impl<'a> FrostDateCalculator<'a> {
    pub fn new(data: &'a dyn ReferenceData) -> Self {
        Self { data }
    }

    /// Frost window for `zone` in `year`
    ///
    /// Frost-free zones get the full calendar year. Southern-hemisphere
    /// dates are moved six months; when that puts the fall frost before the
    /// spring frost, the fall frost moves into `year + 1`.
    pub fn get_frost_dates(
        &self,
        zone: &ZoneId,
        year: i32,
        southern_hemisphere: bool,
    ) -> Result<FrostWindow> {
        let (spring, fall, nominal_days) = match self.lookup(zone) {
            Some(data) if data.is_frost_free() => return full_year_window(year),
            Some(ZoneFrostData {
                last_spring_frost: Some(spring),
                first_fall_frost: Some(fall),
                growing_season_days,
                ..
            }) => (*spring, *fall, *growing_season_days),
            _ => {
                tracing::debug!("No frost data for zone {}, using fallback dates", zone);
                let (spring_month, spring_day) = FALLBACK_LAST_SPRING_FROST;
                let (fall_month, fall_day) = FALLBACK_FIRST_FALL_FROST;
                (
                    MonthDay::new(spring_month, spring_day)?,
                    MonthDay::new(fall_month, fall_day)?,
                    FALLBACK_SEASON_DAYS,
                )
            }
        };

        if !southern_hemisphere {
            return Ok(FrostWindow {
                last_spring_frost: spring.in_year(year)?,
                first_fall_frost: fall.in_year(year)?,
                season_days: i64::from(nominal_days),
            });
        }

        let last_spring_frost = spring.rotate_months(SOUTHERN_MONTH_SHIFT).in_year(year)?;
        let mut first_fall_frost = fall.rotate_months(SOUTHERN_MONTH_SHIFT).in_year(year)?;
        if first_fall_frost < last_spring_frost {
            first_fall_frost = fall.rotate_months(SOUTHERN_MONTH_SHIFT).in_year(year + 1)?;
        }

        Ok(FrostWindow {
            last_spring_frost,
            first_fall_frost,
            season_days: days_between(last_spring_frost, first_fall_frost),
        })
    }

    /// Exact zone, then the same zone number with either half letter
    fn lookup(&self, zone: &ZoneId) -> Option<&'a ZoneFrostData> {
        if let Some(found) = self.data.zone_frost(zone) {
            return Some(found);
        }

        ['a', 'b'].iter().find_map(|&half| {
            let sibling = zone.with_half(half);
            let found = self.data.zone_frost(&sibling)?;
            tracing::debug!("Using frost data for {} in place of {}", sibling, zone);
            Some(found)
        })
    }
}

fn full_year_window(year: i32) -> Result<FrostWindow> {
    Ok(FrostWindow {
        last_spring_frost: dates::ymd(year, 1, 1)?,
        first_fall_frost: dates::ymd(year, 12, 31)?,
        season_days: FROST_FREE_SEASON_DAYS,
    })
}
