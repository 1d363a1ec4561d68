//! Calendar helpers shared by the frost and scheduling code.
//!
//! All arithmetic is checked: a date that falls outside chrono's range
//! surfaces as [`GrowError::InvalidDate`] instead of panicking.

use crate::error::{GrowError, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Build a calendar date, failing on impossible combinations
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(GrowError::InvalidDate { year, month, day })
}

/// Build a date, clamping `day` to the last day of the month
///
/// Used when month/day pairs are moved between months (e.g. Aug 31 shifted
/// six months lands on Feb 28/29).
pub fn ymd_clamped(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    ymd(year, month, day.min(last.day()))
}

/// Last calendar day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    match month {
        12 => ymd(year, 12, 31),
        1..=11 => {
            let first_of_next = ymd(year, month + 1, 1)?;
            first_of_next.pred_opt().ok_or(GrowError::InvalidDate { year, month, day: 0 })
        }
        _ => Err(GrowError::InvalidDate { year, month, day: 1 }),
    }
}

pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days)).ok_or(GrowError::InvalidDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Result<NaiveDate> {
    add_days(date, weeks * 7)
}

/// Signed number of days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Rotate a 1-indexed month forward by `offset` months, wrapping at December
pub fn rotate_month(month: u32, offset: u32) -> u32 {
    (month - 1 + offset) % 12 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_date() {
        assert_eq!(ymd_clamped(2025, 2, 31).unwrap(), ymd(2025, 2, 28).unwrap());
        assert_eq!(ymd_clamped(2024, 2, 31).unwrap(), ymd(2024, 2, 29).unwrap());
        assert_eq!(ymd_clamped(2025, 4, 15).unwrap(), ymd(2025, 4, 15).unwrap());
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 12).unwrap(), ymd(2025, 12, 31).unwrap());
        assert_eq!(last_day_of_month(2025, 6).unwrap(), ymd(2025, 6, 30).unwrap());
    }

    #[test]
    fn test_rotate_month() {
        assert_eq!(rotate_month(4, 6), 10);
        assert_eq!(rotate_month(10, 6), 4);
        assert_eq!(rotate_month(12, 6), 6);
        assert_eq!(rotate_month(6, 6), 12);
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(ymd(2025, 13, 1), Err(GrowError::InvalidDate { .. })));
    }

    #[test]
    fn test_days_between() {
        let start = ymd(2025, 4, 15).unwrap();
        let end = ymd(2025, 10, 15).unwrap();
        assert_eq!(days_between(start, end), 183);
        assert_eq!(add_weeks(start, 2).unwrap(), ymd(2025, 4, 29).unwrap());
    }
}
