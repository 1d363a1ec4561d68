//! Per-crop planting and harvest timelines.
//!
//! Dispatch is on [`CropKind`]: each category has its own handler, and the
//! tropical suitability gate runs before any of them. Harvest events for
//! annuals are always derived from a planting event; a crop with no
//! planting block gets no harvest.

use chrono::NaiveDate;
use geogrow_core::dates::{self, add_days, add_weeks};
use geogrow_core::error::Result;
use geogrow_core::models::{
    CropGrowingInfo, CropId, CropKind, CropTimeline, FrostTolerance, GrowingProfile,
    PlantingAction, PlantingEvent, SowTiming, UnavailableReason,
};
use geogrow_core::ports::ReferenceData;

/// Before-frost windows close at most this many weeks after opening
const BEFORE_FROST_SPAN_WEEKS: u32 = 4;

/// Length of an after-frost direct-sow window, in weeks
const DIRECT_SOW_SPAN_WEEKS: u32 = 4;

/// Length of an after-frost transplant window, in weeks
const TRANSPLANT_SPAN_WEEKS: u32 = 3;

/// Window length when a block gives no frost offset, in weeks
const DEFAULT_SPAN_WEEKS: i64 = 2;

/// Fall-planted sowing opens this many weeks before the first fall frost
const FALL_PLANTED_SOW_START_WEEKS: i64 = 4;

/// Fall-planted sowing closes this many weeks before the first fall frost
const FALL_PLANTED_SOW_END_WEEKS: i64 = 2;

/// Fall-planted harvest in the summer of the following year (month, day)
const FALL_PLANTED_HARVEST_START: (u32, u32) = (6, 15);
const FALL_PLANTED_HARVEST_END: (u32, u32) = (7, 31);

/// Builds crop timelines against a growing profile
pub struct PlantingScheduler<'a> {
    data: &'a dyn ReferenceData,
}

impl<'a> PlantingScheduler<'a> {
    pub fn new(data: &'a dyn ReferenceData) -> Self {
        Self { data }
    }

    /// Timeline of planting and harvest events for one crop in `year`
    ///
    /// Unknown crops and crops unsuitable for the climate produce an empty
    /// timeline with a reason; only date arithmetic overflow is an error.
    pub fn get_crop_timeline(
        &self,
        crop_id: &CropId,
        profile: &GrowingProfile,
        year: i32,
    ) -> Result<CropTimeline> {
        let crop = match self.data.crop(crop_id) {
            Some(crop) => crop,
            None => {
                return Ok(CropTimeline::unavailable(
                    crop_id.clone(),
                    false,
                    UnavailableReason::CropNotFound { crop_id: crop_id.clone() },
                ));
            }
        };

        if profile.is_tropical && crop.is_unsuitable_for_tropics() {
            return Ok(CropTimeline::unavailable(
                crop.id.clone(),
                crop.is_perennial,
                UnavailableReason::UnsuitableClimate { crop_name: crop.name.clone() },
            ));
        }

        let events = match crop.kind {
            CropKind::Indoor => indoor_events(crop, year)?,
            CropKind::FallPlanted => fall_planted_events(crop, profile, year)?,
            CropKind::TreeFruit { citrus } => {
                match self.tree_fruit_events(crop, citrus, profile, year)? {
                    Some(events) => events,
                    None => {
                        return Ok(CropTimeline::unavailable(
                            crop.id.clone(),
                            crop.is_perennial,
                            UnavailableReason::MissingHarvestMonth {
                                crop_name: crop.name.clone(),
                            },
                        ));
                    }
                }
            }
            CropKind::Annual => annual_events(crop, profile)?,
        };

        Ok(CropTimeline {
            crop_id: crop.id.clone(),
            events,
            is_perennial: crop.is_perennial,
            not_suitable_reason: None,
        })
    }

    /// Harvest-only timeline for established fruit trees
    fn tree_fruit_events(
        &self,
        crop: &CropGrowingInfo,
        citrus: bool,
        profile: &GrowingProfile,
        year: i32,
    ) -> Result<Option<Vec<PlantingEvent>>> {
        let Some(mut month) = self.data.harvest_month(&crop.id) else {
            tracing::debug!("No harvest month recorded for {}", crop.id);
            return Ok(None);
        };

        if profile.is_southern_hemisphere {
            month = dates::rotate_month(month, 6);
        }

        let start = dates::ymd(year, month, 1)?;
        let end = add_weeks(start, i64::from(crop.harvest_window.duration))?;
        let notes = if citrus { "Established citrus tree" } else { "Established fruit tree" };

        Ok(Some(vec![event(crop, PlantingAction::Harvest, start, end, Some(notes))]))
    }
}

fn event(
    crop: &CropGrowingInfo,
    action: PlantingAction,
    start_date: NaiveDate,
    end_date: NaiveDate,
    notes: Option<&str>,
) -> PlantingEvent {
    PlantingEvent {
        crop_id: crop.id.clone(),
        crop_name: crop.name.clone(),
        action,
        start_date,
        end_date,
        notes: notes.map(str::to_string),
    }
}

/// Year-round indoor crops: always available, never frost gated
fn indoor_events(crop: &CropGrowingInfo, year: i32) -> Result<Vec<PlantingEvent>> {
    let start = dates::ymd(year, 1, 1)?;
    let end = dates::ymd(year, 12, 31)?;

    Ok(vec![
        event(crop, PlantingAction::StartIndoors, start, end, Some("Grow indoors year-round")),
        event(crop, PlantingAction::Harvest, start, end, Some("Continuous harvest")),
    ])
}

/// Garlic-like crops: sown before the first fall frost, harvested next summer
fn fall_planted_events(
    crop: &CropGrowingInfo,
    profile: &GrowingProfile,
    year: i32,
) -> Result<Vec<PlantingEvent>> {
    let fall = profile.first_fall_frost;
    let sow_start = add_weeks(fall, -FALL_PLANTED_SOW_START_WEEKS)?;
    let sow_end = add_weeks(fall, -FALL_PLANTED_SOW_END_WEEKS)?;

    let harvest_year = year + 1;
    let (start_month, start_day) = FALL_PLANTED_HARVEST_START;
    let (end_month, end_day) = FALL_PLANTED_HARVEST_END;
    let harvest_start = dates::ymd(harvest_year, start_month, start_day)?;
    let harvest_end = dates::ymd(harvest_year, end_month, end_day)?;

    Ok(vec![
        event(crop, PlantingAction::DirectSow, sow_start, sow_end, Some("Plant in fall")),
        event(
            crop,
            PlantingAction::Harvest,
            harvest_start,
            harvest_end,
            Some("Harvest the following summer"),
        ),
    ])
}

/// Standard annuals (and herbaceous perennials) built from the crop's blocks
fn annual_events(crop: &CropGrowingInfo, profile: &GrowingProfile) -> Result<Vec<PlantingEvent>> {
    let frost = profile.last_spring_frost;
    let mut events = Vec::new();

    if let Some(range) = crop.start_indoors {
        // Larger offsets are earlier, so the max offset opens the window
        let start = add_weeks(frost, -i64::from(range.max))?;
        let end = add_weeks(frost, -i64::from(range.min))?;
        events.push(event(crop, PlantingAction::StartIndoors, start, end, None));
    }

    if let Some(timing) = crop.direct_sow {
        let (start, end) = frost_relative_window(frost, timing, DIRECT_SOW_SPAN_WEEKS)?;
        events.push(event(crop, PlantingAction::DirectSow, start, end, None));
    }

    if let Some(timing) = crop.transplant {
        let (start, end) = frost_relative_window(frost, timing, TRANSPLANT_SPAN_WEEKS)?;
        events.push(event(crop, PlantingAction::Transplant, start, end, None));
    }

    if let Some(fall_sow) = crop.fall_sow {
        if profile.zone.number() >= fall_sow.min_zone {
            let fall = profile.first_fall_frost;
            let start = add_weeks(fall, -i64::from(fall_sow.weeks_before_first_frost))?;
            let end = add_weeks(start, DEFAULT_SPAN_WEEKS)?.min(fall);
            events.push(event(crop, PlantingAction::DirectSow, start, end, Some("Fall crop")));
        }
    }

    if let Some(harvest) = harvest_event(crop, profile, &events)? {
        events.push(harvest);
    }

    Ok(events)
}

/// Window anchored to the last spring frost
///
/// Before-frost windows open `weeks_before` early and close up to four
/// weeks later, never after the frost date. After-frost windows open
/// `weeks_after` late and last `after_span_weeks`. With no offset the window
/// is the two weeks starting on the frost date.
fn frost_relative_window(
    frost: NaiveDate,
    timing: SowTiming,
    after_span_weeks: u32,
) -> Result<(NaiveDate, NaiveDate)> {
    match (timing.weeks_before_last_frost, timing.weeks_after_last_frost) {
        (Some(before), _) => {
            let start = add_weeks(frost, -i64::from(before))?;
            let end =
                add_weeks(frost, -i64::from(before.saturating_sub(BEFORE_FROST_SPAN_WEEKS)))?;
            Ok((start, end))
        }
        (None, Some(after)) => {
            let start = add_weeks(frost, i64::from(after))?;
            let end = add_weeks(start, i64::from(after_span_weeks))?;
            Ok((start, end))
        }
        (None, None) => Ok((frost, add_weeks(frost, DEFAULT_SPAN_WEEKS)?)),
    }
}

/// Harvest anchored to the first transplant, else the first direct sowing
fn harvest_event(
    crop: &CropGrowingInfo,
    profile: &GrowingProfile,
    plantings: &[PlantingEvent],
) -> Result<Option<PlantingEvent>> {
    let anchor = plantings
        .iter()
        .find(|e| e.action == PlantingAction::Transplant)
        .or_else(|| plantings.iter().find(|e| e.action == PlantingAction::DirectSow));

    let Some(anchor) = anchor else {
        return Ok(None);
    };

    let start = add_days(anchor.start_date, i64::from(crop.days_to_maturity.min))?;
    let mut end = add_weeks(start, i64::from(crop.harvest_window.duration))?;

    if crop.frost_tolerance == FrostTolerance::None {
        end = end.min(profile.first_fall_frost);
        if end < start {
            tracing::debug!("{} cannot mature before the first fall frost", crop.id);
            return Ok(None);
        }
    }

    Ok(Some(event(crop, PlantingAction::Harvest, start, end, None)))
}
