//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod geocoder;
pub mod reference;

pub use geocoder::ReverseGeocoder;
pub use reference::ReferenceData;
