//! GeoGrow Geo - Geohash encoding and hardiness zone resolution
//!
//! This crate handles the location side of the engine: converting
//! coordinates to geohash tokens (and the fixed 8-byte interchange form),
//! and mapping a geohash to a hardiness zone with a confidence level.

pub mod bytes8;
pub mod geohash;
pub mod zone;

pub use bytes8::{from_bytes8_hex, to_bytes8, to_bytes8_hex, Bytes8Location};
pub use geohash::{decode, decode_bbox, encode, GeohashBounds, DEFAULT_PRECISION};
pub use zone::ZoneResolver;
