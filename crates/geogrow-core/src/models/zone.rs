//! Hardiness zone types and the zone-keyed reference records.

use crate::dates;
use crate::error::{GrowError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A hardiness zone identifier such as `7a` or `10b`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId {
    number: u32,
    half: char,
}

impl ZoneId {
    /// Fallback for low latitudes with no table entry
    pub const TROPICAL_DEFAULT: ZoneId = ZoneId { number: 13, half: 'a' };
    /// Fallback above the last latitude band
    pub const COLDEST_DEFAULT: ZoneId = ZoneId { number: 1, half: 'a' };
    /// Fallback for mid latitudes not covered by any band
    pub const TEMPERATE_DEFAULT: ZoneId = ZoneId { number: 7, half: 'a' };

    /// Numeric part of the zone (`7` for `7a`)
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Half-zone letter, `'a'` or `'b'`
    pub fn half(&self) -> char {
        self.half
    }

    /// Same zone number with the other half letter
    pub fn with_half(&self, half: char) -> Self {
        Self { number: self.number, half }
    }
}

impl FromStr for ZoneId {
    type Err = GrowError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GrowError::InvalidZone { zone: s.to_string() };
        let trimmed = s.trim().to_ascii_lowercase();

        let half = trimmed.chars().last().ok_or_else(invalid)?;
        if half != 'a' && half != 'b' {
            return Err(invalid());
        }

        let digits = &trimmed[..trimmed.len() - 1];
        if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self { number, half })
    }
}

impl TryFrom<String> for ZoneId {
    type Error = GrowError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ZoneId> for String {
    fn from(zone: ZoneId) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.half)
    }
}

/// How directly a zone was determined.
///
/// Variants are declared in ascending order of authority so that
/// `Estimated < Precise < Manual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Regional prefix match or latitude-band fallback
    Estimated,
    /// Exact 3-character geohash prefix hit
    Precise,
    /// Explicitly supplied by the caller
    Manual,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Estimated => "estimated",
            Confidence::Precise => "precise",
            Confidence::Manual => "manual",
        };
        f.write_str(label)
    }
}

/// Result of zone resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub zone: ZoneId,
    pub confidence: Confidence,
}

impl ZoneRecord {
    pub fn new(zone: ZoneId, confidence: Confidence) -> Self {
        Self { zone, confidence }
    }

    /// A caller-supplied zone; always outranks computed records
    pub fn manual(zone: ZoneId) -> Self {
        Self::new(zone, Confidence::Manual)
    }
}

/// One row of the latitude-band fallback table, covering `[min_lat, max_lat)`
/// of absolute latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatitudeBand {
    pub min_lat: f64,
    pub max_lat: f64,
    pub zone: ZoneId,
}

impl LatitudeBand {
    pub fn contains(&self, abs_latitude: f64) -> bool {
        abs_latitude >= self.min_lat && abs_latitude < self.max_lat
    }
}

/// A month/day pair without a year, written `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so Feb 29 is accepted here
        dates::ymd(2000, month, day)?;
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Move the month forward by `months`, keeping the day.
    ///
    /// The day may exceed the new month's length; [`MonthDay::in_year`]
    /// clamps it.
    pub fn rotate_months(&self, months: u32) -> Self {
        Self { month: dates::rotate_month(self.month, months), day: self.day }
    }

    /// Place this month/day in a calendar year, clamping to the month's end
    pub fn in_year(&self, year: i32) -> Result<NaiveDate> {
        dates::ymd_clamped(year, self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = GrowError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GrowError::ReferenceData {
            reason: format!("Invalid month-day '{}': expected MM-DD", s),
        };
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = GrowError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(md: MonthDay) -> Self {
        md.to_string()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Frost calendar for one zone. `None` dates mark a frost-free zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFrostData {
    pub zone: ZoneId,
    pub last_spring_frost: Option<MonthDay>,
    pub first_fall_frost: Option<MonthDay>,
    pub growing_season_days: u32,
}

impl ZoneFrostData {
    pub fn is_frost_free(&self) -> bool {
        self.last_spring_frost.is_none() || self.first_fall_frost.is_none()
    }
}

/// Wet-season month range (inclusive, 1-indexed, may wrap past December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WetSeason {
    pub start_month: u32,
    pub end_month: u32,
}
