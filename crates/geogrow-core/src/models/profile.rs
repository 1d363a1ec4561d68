use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::zone::{Confidence, ZoneId};

/// Frost-bounded growing window for one zone and year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrostWindow {
    pub last_spring_frost: NaiveDate,
    pub first_fall_frost: NaiveDate,
    pub season_days: i64,
}

/// Everything the scheduler needs to know about a location for one year.
///
/// Built once per location/year by the profile builder and never mutated;
/// manual overrides produce a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingProfile {
    pub zone: ZoneId,
    pub last_spring_frost: NaiveDate,
    pub first_fall_frost: NaiveDate,
    pub growing_season_days: i64,
    pub is_tropical: bool,
    pub is_southern_hemisphere: bool,
    /// Wet-season start month (1-12), tropical profiles only
    pub wet_season_start: Option<u32>,
    /// Wet-season end month (1-12), tropical profiles only
    pub wet_season_end: Option<u32>,
    pub confidence: Confidence,
    pub latitude: f64,
    pub longitude: f64,
}

impl GrowingProfile {
    pub fn frost_window(&self) -> FrostWindow {
        FrostWindow {
            last_spring_frost: self.last_spring_frost,
            first_fall_frost: self.first_fall_frost,
            season_days: self.growing_season_days,
        }
    }
}

/// User-supplied replacements for computed profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualOverrides {
    pub zone: Option<ZoneId>,
    pub last_spring_frost: Option<NaiveDate>,
    pub first_fall_frost: Option<NaiveDate>,
}

impl ManualOverrides {
    pub fn is_empty(&self) -> bool {
        self.zone.is_none() && self.last_spring_frost.is_none() && self.first_fall_frost.is_none()
    }

    pub fn overrides_dates(&self) -> bool {
        self.last_spring_frost.is_some() || self.first_fall_frost.is_some()
    }
}
