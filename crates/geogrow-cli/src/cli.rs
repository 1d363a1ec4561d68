use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// GeoGrow - Planting calendars from coordinates and geohashes
#[derive(Parser, Debug)]
#[command(name = "geogrow")]
#[command(about = "Planting calendars from coordinates and geohashes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./geogrow.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference data TOML replacing the built-in tables
    #[arg(long, global = true)]
    pub reference_data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a coordinate as a geohash
    Encode(EncodeArgs),

    /// Decode a geohash to its cell center and bounds
    Decode(DecodeArgs),

    /// Pack a geohash into an 8-byte hex token
    Bytes8(Bytes8Args),

    /// Recover a geohash and cell center from an 8-byte hex token
    FromBytes8(FromBytes8Args),

    /// Resolve the hardiness zone for a location
    Zone(ZoneArgs),

    /// Show frost dates for a hardiness zone
    Frost(FrostArgs),

    /// Build the growing profile for a location
    Profile(ProfileArgs),

    /// Planting timeline for a single crop
    Timeline(TimelineArgs),

    /// Planting actions for one month
    Calendar(CalendarArgs),

    /// List crops in the reference data
    Crops,

    /// Show effective configuration and where each value came from
    Config,
}

/// A location given either as coordinates or as a geohash
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "geohash")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "geohash")]
    pub lon: Option<f64>,

    /// Geohash of the location
    #[arg(long)]
    pub geohash: Option<String>,
}

/// Manual corrections applied on top of the computed profile
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Hardiness zone to use instead of the resolved one (e.g. 7b)
    #[arg(long)]
    pub zone: Option<String>,

    /// Last spring frost date (YYYY-MM-DD)
    #[arg(long)]
    pub spring: Option<String>,

    /// First fall frost date (YYYY-MM-DD)
    #[arg(long)]
    pub fall: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Number of geohash characters (1-12)
    #[arg(long)]
    pub precision: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Geohash to decode
    pub geohash: String,
}

#[derive(Parser, Debug)]
pub struct Bytes8Args {
    /// Geohash to pack (first 8 characters are kept)
    pub geohash: String,
}

#[derive(Parser, Debug)]
pub struct FromBytes8Args {
    /// Hex token, with or without a 0x prefix
    pub hex: String,
}

#[derive(Parser, Debug)]
pub struct ZoneArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

#[derive(Parser, Debug)]
pub struct FrostArgs {
    /// Hardiness zone (e.g. 7a)
    pub zone: String,

    /// Calendar year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Shift the frost calendar for the southern hemisphere
    #[arg(long)]
    pub southern: bool,
}

#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Calendar year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Look up the place name with the reverse geocoder
    #[arg(long)]
    pub place: bool,

    /// Reverse geocoder base URL
    #[arg(long)]
    pub geocoder_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct TimelineArgs {
    /// Crop id (e.g. tomato)
    pub crop: String,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Calendar year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Parser, Debug)]
pub struct CalendarArgs {
    /// Month number (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Calendar year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Crops to include (popular or all)
    #[arg(long)]
    pub crop_set: Option<String>,
}
