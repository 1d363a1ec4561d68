use super::location::{growing_profile, resolve, year_or_current};
use crate::cli::CalendarArgs;
use crate::output::OutputWriter;
use crate::output_types::EventRow;
use anyhow::Result;
use geogrow_calendar::MonthlyCalendarBuilder;
use geogrow_core::config::LayeredConfig;
use geogrow_core::models::PlantingAction;
use geogrow_core::ports::ReferenceData;

const SECTIONS: [(PlantingAction, &str); 4] = [
    (PlantingAction::StartIndoors, "Start indoors"),
    (PlantingAction::DirectSow, "Direct sow"),
    (PlantingAction::Transplant, "Transplant"),
    (PlantingAction::Harvest, "Harvest"),
];

pub fn execute(
    args: CalendarArgs,
    data: &dyn ReferenceData,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let year = year_or_current(args.year);
    let location = resolve(&args.location, data, config.geohash_precision.value)?;
    let profile = growing_profile(&location, &args.overrides, data, year)?;

    let calendar =
        MonthlyCalendarBuilder::new(data).build(&profile, args.month, year, config.crop_set.value)?;

    if output.is_json() {
        return output.result(calendar);
    }

    output.kv("Zone", format!("{} ({})", profile.zone, profile.confidence));
    if calendar.is_empty() {
        output.success(format!("Nothing to plant or harvest in {}-{:02}", year, args.month));
        return Ok(());
    }

    for (action, title) in SECTIONS {
        let events = calendar.bucket(action);
        if events.is_empty() {
            continue;
        }
        output.section(title);
        output.table(events.iter().map(EventRow::from).collect())?;
    }
    Ok(())
}
