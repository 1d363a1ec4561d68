use crate::cli::{Bytes8Args, DecodeArgs, EncodeArgs, FromBytes8Args};
use crate::output::OutputWriter;
use crate::output_types::{BoundsOutput, Bytes8Output, DecodeOutput, EncodeOutput};
use anyhow::Result;
use geogrow_core::config::LayeredConfig;
use geogrow_geo::{decode_bbox, encode as encode_geohash, from_bytes8_hex, to_bytes8_hex};

pub fn encode(args: EncodeArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let precision = config.geohash_precision.value;
    let geohash = encode_geohash(args.lat, args.lon, precision)?;

    output.kv("Geohash", &geohash);
    output.kv("Precision", precision);

    output.result(EncodeOutput { geohash, precision, latitude: args.lat, longitude: args.lon })
}

pub fn decode(args: DecodeArgs, output: &OutputWriter) -> Result<()> {
    let bounds = decode_bbox(&args.geohash)?;
    let (min, max) = (bounds.rect.min(), bounds.rect.max());

    output.kv("Center", bounds.center);
    output.kv("Error", format!("±{:.6}° lat, ±{:.6}° lon", bounds.lat_error(), bounds.lon_error()));
    output.kv("Bounds", format!("{:.6}, {:.6} to {:.6}, {:.6}", min.y, min.x, max.y, max.x));

    output.result(DecodeOutput {
        geohash: args.geohash.to_ascii_lowercase(),
        latitude: bounds.center.latitude,
        longitude: bounds.center.longitude,
        lat_error: bounds.lat_error(),
        lon_error: bounds.lon_error(),
        bounds: BoundsOutput { min_lat: min.y, min_lon: min.x, max_lat: max.y, max_lon: max.x },
    })
}

pub fn bytes8(args: Bytes8Args, output: &OutputWriter) -> Result<()> {
    let hex = to_bytes8_hex(&args.geohash)?;
    output.kv("Token", &hex);
    output.result(Bytes8Output { geohash: args.geohash, hex })
}

pub fn from_bytes8(args: FromBytes8Args, output: &OutputWriter) -> Result<()> {
    let location = from_bytes8_hex(&args.hex)?;
    output.kv("Geohash", &location.geohash);
    output.kv("Center", format!("{:.6}, {:.6}", location.latitude, location.longitude));
    output.result(location)
}
