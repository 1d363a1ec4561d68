use super::location::{growing_profile, resolve, year_or_current};
use crate::cli::ProfileArgs;
use crate::output::OutputWriter;
use crate::output_types::ProfileOutput;
use anyhow::Result;
use geogrow_core::config::LayeredConfig;
use geogrow_core::models::Confidence;
use geogrow_core::ports::ReferenceData;
use geogrow_geocode::{place_or_fallback, CachedGeocoder, NominatimGeocoder};

pub fn execute(
    args: ProfileArgs,
    data: &dyn ReferenceData,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let year = year_or_current(args.year);
    let location = resolve(&args.location, data, config.geohash_precision.value)?;
    let profile = growing_profile(&location, &args.overrides, data, year)?;

    let place = if args.place {
        let geocoder = CachedGeocoder::from_config(NominatimGeocoder::from_config(config)?, config);
        Some(place_or_fallback(&geocoder, location.coordinate).to_string())
    } else {
        None
    };

    output.section(format!("Growing profile {}", year));
    if let Some(place) = &place {
        output.kv("Place", place);
    }
    output.kv("Location", location.coordinate);
    output.kv("Zone", format!("{} ({})", profile.zone, profile.confidence));
    output.kv("Last spring frost", profile.last_spring_frost);
    output.kv("First fall frost", profile.first_fall_frost);
    output.kv("Growing season", format!("{} days", profile.growing_season_days));
    output.kv("Hemisphere", if profile.is_southern_hemisphere { "southern" } else { "northern" });
    if let (Some(start), Some(end)) = (profile.wet_season_start, profile.wet_season_end) {
        output.kv("Wet season", format!("month {} to month {}", start, end));
    }

    if profile.confidence == Confidence::Estimated {
        output.warning("Zone is estimated; pass --zone or --spring/--fall to correct it");
    }

    output.result(ProfileOutput { profile, place })
}
