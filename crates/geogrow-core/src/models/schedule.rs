//! Scheduler output types: dated planting events, per-crop timelines, and
//! the month-bucketed calendar view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::crop::CropId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantingAction {
    StartIndoors,
    DirectSow,
    Transplant,
    Harvest,
}

impl fmt::Display for PlantingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlantingAction::StartIndoors => "start-indoors",
            PlantingAction::DirectSow => "direct-sow",
            PlantingAction::Transplant => "transplant",
            PlantingAction::Harvest => "harvest",
        };
        f.write_str(label)
    }
}

/// A dated action window for one crop. `start_date <= end_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingEvent {
    pub crop_id: CropId,
    pub crop_name: String,
    pub action: PlantingAction,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlantingEvent {
    /// True when `[start_date, end_date]` intersects `[from, to]`
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }
}

/// Why a crop produced no schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnavailableReason {
    CropNotFound { crop_id: CropId },
    UnsuitableClimate { crop_name: String },
    MissingHarvestMonth { crop_name: String },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::CropNotFound { crop_id } => {
                write!(f, "No growing data available for '{}'", crop_id)
            }
            UnavailableReason::UnsuitableClimate { crop_name } => {
                write!(f, "{} is not suitable for tropical climates", crop_name)
            }
            UnavailableReason::MissingHarvestMonth { crop_name } => {
                write!(f, "No harvest season is recorded for {}", crop_name)
            }
        }
    }
}

/// All events generated for one crop in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropTimeline {
    pub crop_id: CropId,
    pub events: Vec<PlantingEvent>,
    pub is_perennial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_suitable_reason: Option<UnavailableReason>,
}

impl CropTimeline {
    pub fn unavailable(crop_id: CropId, is_perennial: bool, reason: UnavailableReason) -> Self {
        Self { crop_id, events: Vec::new(), is_perennial, not_suitable_reason: Some(reason) }
    }

    pub fn events_for(&self, action: PlantingAction) -> impl Iterator<Item = &PlantingEvent> {
        self.events.iter().filter(move |e| e.action == action)
    }
}

/// One month's planting activity grouped by action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCalendar {
    pub month: u32,
    pub year: i32,
    pub start_indoors: Vec<PlantingEvent>,
    pub direct_sow: Vec<PlantingEvent>,
    pub transplant: Vec<PlantingEvent>,
    pub harvest: Vec<PlantingEvent>,
}

impl MonthlyCalendar {
    pub fn empty(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            start_indoors: Vec::new(),
            direct_sow: Vec::new(),
            transplant: Vec::new(),
            harvest: Vec::new(),
        }
    }

    pub fn bucket(&self, action: PlantingAction) -> &[PlantingEvent] {
        match action {
            PlantingAction::StartIndoors => &self.start_indoors,
            PlantingAction::DirectSow => &self.direct_sow,
            PlantingAction::Transplant => &self.transplant,
            PlantingAction::Harvest => &self.harvest,
        }
    }

    pub fn bucket_mut(&mut self, action: PlantingAction) -> &mut Vec<PlantingEvent> {
        match action {
            PlantingAction::StartIndoors => &mut self.start_indoors,
            PlantingAction::DirectSow => &mut self.direct_sow,
            PlantingAction::Transplant => &mut self.transplant,
            PlantingAction::Harvest => &mut self.harvest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_indoors.is_empty()
            && self.direct_sow.is_empty()
            && self.transplant.is_empty()
            && self.harvest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;

    fn event(start: NaiveDate, end: NaiveDate) -> PlantingEvent {
        PlantingEvent {
            crop_id: CropId::from("kale"),
            crop_name: "Kale".to_string(),
            action: PlantingAction::DirectSow,
            start_date: start,
            end_date: end,
            notes: None,
        }
    }

    #[test]
    fn test_overlap_cases() {
        let from = ymd(2025, 5, 1).unwrap();
        let to = ymd(2025, 5, 31).unwrap();

        // starts inside
        assert!(event(ymd(2025, 5, 20).unwrap(), ymd(2025, 6, 10).unwrap()).overlaps(from, to));
        // ends inside
        assert!(event(ymd(2025, 4, 20).unwrap(), ymd(2025, 5, 1).unwrap()).overlaps(from, to));
        // spans
        assert!(event(ymd(2025, 4, 1).unwrap(), ymd(2025, 7, 1).unwrap()).overlaps(from, to));
        // disjoint
        assert!(!event(ymd(2025, 6, 1).unwrap(), ymd(2025, 6, 10).unwrap()).overlaps(from, to));
    }

    #[test]
    fn test_action_serializes_kebab_case() {
        let json = serde_json::to_string(&PlantingAction::StartIndoors).unwrap();
        assert_eq!(json, "\"start-indoors\"");
        assert_eq!(PlantingAction::DirectSow.to_string(), "direct-sow");
    }

    #[test]
    fn test_reason_message() {
        let reason = UnavailableReason::UnsuitableClimate { crop_name: "Garlic".to_string() };
        assert_eq!(reason.to_string(), "Garlic is not suitable for tropical climates");
    }
}
