//! Month view over many crop timelines.

use crate::scheduler::PlantingScheduler;
use geogrow_core::config::CropSet;
use geogrow_core::dates;
use geogrow_core::error::Result;
use geogrow_core::models::{CropId, GrowingProfile, MonthlyCalendar, PlantingAction};
use geogrow_core::ports::ReferenceData;

const ACTIONS: [PlantingAction; 4] = [
    PlantingAction::StartIndoors,
    PlantingAction::DirectSow,
    PlantingAction::Transplant,
    PlantingAction::Harvest,
];

/// Buckets crop timelines into a single month
pub struct MonthlyCalendarBuilder<'a> {
    data: &'a dyn ReferenceData,
    scheduler: PlantingScheduler<'a>,
}

impl<'a> MonthlyCalendarBuilder<'a> {
    pub fn new(data: &'a dyn ReferenceData) -> Self {
        Self { data, scheduler: PlantingScheduler::new(data) }
    }

    /// Calendar for `month` of `year`
    ///
    /// An event lands in the month when its date range overlaps the month at
    /// all. Each bucket keeps the first event per crop and is sorted by start
    /// date; ties keep crop-set order.
    pub fn build(
        &self,
        profile: &GrowingProfile,
        month: u32,
        year: i32,
        crop_set: CropSet,
    ) -> Result<MonthlyCalendar> {
        let month_start = dates::ymd(year, month, 1)?;
        let month_end = dates::last_day_of_month(year, month)?;

        let mut calendar = MonthlyCalendar::empty(month, year);

        for crop_id in self.crop_ids(crop_set) {
            if self.data.is_non_growing(&crop_id) {
                continue;
            }
            if self.data.crop(&crop_id).is_none() {
                tracing::debug!("Skipping {}: not in the crop table", crop_id);
                continue;
            }

            let timeline = self.scheduler.get_crop_timeline(&crop_id, profile, year)?;
            for event in timeline.events {
                if !event.overlaps(month_start, month_end) {
                    continue;
                }

                let bucket = calendar.bucket_mut(event.action);
                if !bucket.iter().any(|existing| existing.crop_id == event.crop_id) {
                    bucket.push(event);
                }
            }
        }

        for action in ACTIONS {
            calendar.bucket_mut(action).sort_by_key(|event| event.start_date);
        }

        Ok(calendar)
    }

    fn crop_ids(&self, crop_set: CropSet) -> Vec<CropId> {
        match crop_set {
            CropSet::Popular => self.data.popular_crops().to_vec(),
            CropSet::All => self.data.crops().into_iter().map(|crop| crop.id.clone()).collect(),
        }
    }
}
