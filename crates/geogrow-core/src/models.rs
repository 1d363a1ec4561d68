pub mod crop;
pub mod location;
pub mod profile;
pub mod schedule;
pub mod zone;

pub use crop::{
    CropGrowingInfo, CropId, CropKind, DaysToMaturity, FallSow, FrostTolerance, HarvestWindow,
    SowTiming, WeekRange,
};
pub use location::{Coordinate, PlaceName, GEOHASH_ALPHABET, TROPIC_LATITUDE};
pub use profile::{FrostWindow, GrowingProfile, ManualOverrides};
pub use schedule::{CropTimeline, MonthlyCalendar, PlantingAction, PlantingEvent, UnavailableReason};
pub use zone::{
    Confidence, LatitudeBand, MonthDay, WetSeason, ZoneFrostData, ZoneId, ZoneRecord,
};
