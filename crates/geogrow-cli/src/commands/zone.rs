use super::location::{resolve, year_or_current};
use crate::cli::{FrostArgs, ZoneArgs};
use crate::output::OutputWriter;
use crate::output_types::{FrostOutput, ZoneOutput};
use anyhow::Result;
use geogrow_calendar::FrostDateCalculator;
use geogrow_core::config::LayeredConfig;
use geogrow_core::models::ZoneId;
use geogrow_core::ports::ReferenceData;

pub fn zone(
    args: ZoneArgs,
    data: &dyn ReferenceData,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let location = resolve(&args.location, data, config.geohash_precision.value)?;

    output.kv("Location", location.coordinate);
    output.kv("Geohash", &location.geohash);
    output.kv("Zone", format!("{} ({})", location.zone.zone, location.zone.confidence));

    output.result(ZoneOutput {
        latitude: location.coordinate.latitude,
        longitude: location.coordinate.longitude,
        geohash: location.geohash,
        zone: location.zone.zone,
        confidence: location.zone.confidence,
    })
}

pub fn frost(args: FrostArgs, data: &dyn ReferenceData, output: &OutputWriter) -> Result<()> {
    let zone: ZoneId = args.zone.parse()?;
    let year = year_or_current(args.year);
    let window = FrostDateCalculator::new(data).get_frost_dates(&zone, year, args.southern)?;

    output.kv("Zone", &zone);
    output.kv("Last spring frost", window.last_spring_frost);
    output.kv("First fall frost", window.first_fall_frost);
    output.kv("Growing season", format!("{} days", window.season_days));

    output.result(FrostOutput { zone, year, southern_hemisphere: args.southern, window })
}
