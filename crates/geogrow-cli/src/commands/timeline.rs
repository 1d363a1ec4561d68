use super::location::{growing_profile, resolve, year_or_current};
use crate::cli::TimelineArgs;
use crate::output::OutputWriter;
use crate::output_types::EventRow;
use anyhow::Result;
use geogrow_calendar::PlantingScheduler;
use geogrow_core::config::LayeredConfig;
use geogrow_core::models::CropId;
use geogrow_core::ports::ReferenceData;

pub fn execute(
    args: TimelineArgs,
    data: &dyn ReferenceData,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let year = year_or_current(args.year);
    let location = resolve(&args.location, data, config.geohash_precision.value)?;
    let profile = growing_profile(&location, &args.overrides, data, year)?;

    let crop_id = CropId::new(args.crop.trim().to_ascii_lowercase());
    let timeline = PlantingScheduler::new(data).get_crop_timeline(&crop_id, &profile, year)?;

    if output.is_json() {
        return output.result(timeline);
    }

    output.section(format!("{} in zone {} ({})", crop_id, profile.zone, year));
    if let Some(reason) = &timeline.not_suitable_reason {
        output.warning(reason);
        return Ok(());
    }
    output.table(timeline.events.iter().map(EventRow::from).collect())
}
