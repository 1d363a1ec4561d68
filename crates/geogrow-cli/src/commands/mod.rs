mod calendar;
mod config;
mod crops;
mod geohash;
mod location;
mod profile;
mod timeline;
mod zone;

use crate::cli::{Cli, Commands};
use crate::config_loader::{load_config, load_reference_data};
use crate::output::OutputWriter;
use anyhow::Result;
use geogrow_core::config::{parse_crop_set, CliConfigOverrides};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = &OutputWriter::new(cli.json);
    let overrides = cli_overrides(&cli)?;
    let config = load_config(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Encode(args) => geohash::encode(args, &config, output),
        Commands::Decode(args) => geohash::decode(args, output),
        Commands::Bytes8(args) => geohash::bytes8(args, output),
        Commands::FromBytes8(args) => geohash::from_bytes8(args, output),
        Commands::Config => config::execute(&config, output),
        Commands::Zone(args) => zone::zone(args, &*load_reference_data(&config)?, &config, output),
        Commands::Frost(args) => zone::frost(args, &*load_reference_data(&config)?, output),
        Commands::Profile(args) => {
            profile::execute(args, &*load_reference_data(&config)?, &config, output)
        }
        Commands::Timeline(args) => {
            timeline::execute(args, &*load_reference_data(&config)?, &config, output)
        }
        Commands::Calendar(args) => {
            calendar::execute(args, &*load_reference_data(&config)?, &config, output)
        }
        Commands::Crops => crops::execute(&*load_reference_data(&config)?, output),
    }
}

/// Config overrides carried by the parsed command line
fn cli_overrides(cli: &Cli) -> Result<CliConfigOverrides> {
    let mut overrides =
        CliConfigOverrides { reference_data: cli.reference_data.clone(), ..Default::default() };

    match &cli.command {
        Commands::Encode(args) => overrides.geohash_precision = args.precision,
        Commands::Profile(args) => overrides.geocoder_url = args.geocoder_url.clone(),
        Commands::Calendar(args) => {
            overrides.crop_set = args.crop_set.as_deref().map(parse_crop_set).transpose()?;
        }
        _ => {}
    }

    Ok(overrides)
}
