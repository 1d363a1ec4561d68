use std::collections::BTreeMap;

use crate::models::{CropGrowingInfo, CropId, LatitudeBand, WetSeason, ZoneFrostData, ZoneId};

/// Port for the static crop and zone reference tables
///
/// Implementations are loaded once and treated as immutable for the life
/// of the process. Prefix tables are ordered maps so that prefix scans are
/// deterministic.
pub trait ReferenceData: Send + Sync {
    /// Look up a crop by id
    fn crop(&self, id: &CropId) -> Option<&CropGrowingInfo>;

    /// All crops, ordered by id
    fn crops(&self) -> Vec<&CropGrowingInfo>;

    /// Ordered list of crops shown by default in calendars
    fn popular_crops(&self) -> &[CropId];

    /// Catalogue items that are not grown (seeds kits, tools, ...)
    fn non_growing_items(&self) -> &[CropId];

    /// Exact 3-character geohash prefix -> zone
    fn precise_zones(&self) -> &BTreeMap<String, ZoneId>;

    /// 2-character geohash prefix -> zone
    fn regional_zones(&self) -> &BTreeMap<String, ZoneId>;

    /// Latitude-band fallback table
    fn latitude_bands(&self) -> &[LatitudeBand];

    /// Frost calendar for an exact zone id
    fn zone_frost(&self, zone: &ZoneId) -> Option<&ZoneFrostData>;

    /// Tropical wet-season months for a hemisphere
    fn wet_season(&self, southern_hemisphere: bool) -> Option<WetSeason>;

    /// Northern-hemisphere harvest start month for tree and citrus fruit
    fn harvest_month(&self, crop: &CropId) -> Option<u32>;

    fn is_non_growing(&self, id: &CropId) -> bool {
        self.non_growing_items().contains(id)
    }
}
