//! Table-backed reference data
//!
//! The built-in tables are compiled into the binary from
//! `data/reference.toml`; alternate tables with the same shape can be loaded
//! from disk. Either way the result is an immutable [`TableReferenceData`]
//! that implements the [`ReferenceData`] port.

use crate::error::{GrowError, Result};
use crate::models::{
    CropGrowingInfo, CropId, LatitudeBand, WetSeason, ZoneFrostData, ZoneId, GEOHASH_ALPHABET,
};
use crate::ports::ReferenceData;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const BUILTIN_REFERENCE_TOML: &str = include_str!("../data/reference.toml");

static BUILTIN: LazyLock<std::result::Result<TableReferenceData, String>> = LazyLock::new(|| {
    TableReferenceData::from_toml_str(BUILTIN_REFERENCE_TOML).map_err(|e| e.to_string())
});

/// Shared, lazily parsed built-in tables
pub fn builtin_reference_data() -> Result<&'static TableReferenceData> {
    BUILTIN.as_ref().map_err(|reason| GrowError::ReferenceData { reason: reason.clone() })
}

/// On-disk shape of a reference data file
#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    popular_crops: Vec<CropId>,
    #[serde(default)]
    non_growing_items: Vec<CropId>,
    #[serde(default)]
    precise_zones: BTreeMap<String, ZoneId>,
    #[serde(default)]
    regional_zones: BTreeMap<String, ZoneId>,
    #[serde(default)]
    wet_season: WetSeasonTable,
    #[serde(default)]
    harvest_months: HashMap<CropId, u32>,
    #[serde(default)]
    latitude_bands: Vec<LatitudeBand>,
    #[serde(default)]
    zone_frost: Vec<ZoneFrostData>,
    #[serde(default)]
    crops: Vec<CropGrowingInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct WetSeasonTable {
    northern: Option<WetSeason>,
    southern: Option<WetSeason>,
}

/// Immutable in-memory reference tables
#[derive(Debug, Clone)]
pub struct TableReferenceData {
    crops: BTreeMap<CropId, CropGrowingInfo>,
    popular_crops: Vec<CropId>,
    non_growing_items: Vec<CropId>,
    precise_zones: BTreeMap<String, ZoneId>,
    regional_zones: BTreeMap<String, ZoneId>,
    latitude_bands: Vec<LatitudeBand>,
    zone_frost: HashMap<ZoneId, ZoneFrostData>,
    wet_season_northern: Option<WetSeason>,
    wet_season_southern: Option<WetSeason>,
    harvest_months: HashMap<CropId, u32>,
}

impl TableReferenceData {
    /// Parse the compiled-in tables (uncached; prefer [`builtin_reference_data`])
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_REFERENCE_TOML)
    }

    /// Load tables from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GrowError::ReferenceDataNotFound { path: path.to_path_buf() });
        }

        let content = fs::read_to_string(path)?;
        let data = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded reference data from {} ({} crops, {} zones)",
            path.display(),
            data.crops.len(),
            data.zone_frost.len()
        );
        Ok(data)
    }

    /// Parse tables from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ReferenceFile = toml::from_str(content).map_err(|e| GrowError::ReferenceData {
            reason: format!("Failed to parse TOML: {}", e),
        })?;
        Self::from_file(file)
    }

    fn from_file(file: ReferenceFile) -> Result<Self> {
        let precise_zones = normalize_prefixes(file.precise_zones, 3)?;
        let regional_zones = normalize_prefixes(file.regional_zones, 2)?;

        for band in &file.latitude_bands {
            if band.min_lat >= band.max_lat {
                return Err(GrowError::ReferenceData {
                    reason: format!(
                        "Latitude band [{}, {}) for zone {} is empty",
                        band.min_lat, band.max_lat, band.zone
                    ),
                });
            }
        }

        for (crop, month) in &file.harvest_months {
            validate_month(*month, &format!("harvest month for {}", crop))?;
        }

        for season in [&file.wet_season.northern, &file.wet_season.southern].into_iter().flatten() {
            validate_month(season.start_month, "wet season start")?;
            validate_month(season.end_month, "wet season end")?;
        }

        let mut crops = BTreeMap::new();
        for crop in file.crops {
            if let Some(range) = crop.start_indoors {
                if range.min > range.max {
                    return Err(GrowError::ReferenceData {
                        reason: format!("Crop {} has start_indoors min > max", crop.id),
                    });
                }
            }
            let id = crop.id.clone();
            if crops.insert(id.clone(), crop).is_some() {
                return Err(GrowError::ReferenceData {
                    reason: format!("Duplicate crop id '{}'", id),
                });
            }
        }

        let zone_frost =
            file.zone_frost.into_iter().map(|data| (data.zone.clone(), data)).collect();

        Ok(Self {
            crops,
            popular_crops: file.popular_crops,
            non_growing_items: file.non_growing_items,
            precise_zones,
            regional_zones,
            latitude_bands: file.latitude_bands,
            zone_frost,
            wet_season_northern: file.wet_season.northern,
            wet_season_southern: file.wet_season.southern,
            harvest_months: file.harvest_months,
        })
    }
}

/// Lowercase prefix keys, rejecting wrong lengths, non-geohash characters
/// and keys that collide once lowercased
fn normalize_prefixes(
    table: BTreeMap<String, ZoneId>,
    len: usize,
) -> Result<BTreeMap<String, ZoneId>> {
    let mut normalized = BTreeMap::new();
    for (prefix, zone) in table {
        let key = prefix.to_ascii_lowercase();
        if key.len() != len || !key.bytes().all(|b| GEOHASH_ALPHABET.contains(&b)) {
            return Err(GrowError::ReferenceData {
                reason: format!(
                    "Geohash prefix '{}' must be {} geohash characters",
                    prefix, len
                ),
            });
        }
        if normalized.insert(key, zone).is_some() {
            return Err(GrowError::ReferenceData {
                reason: format!("Duplicate geohash prefix '{}'", prefix),
            });
        }
    }
    Ok(normalized)
}

fn validate_month(month: u32, what: &str) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(GrowError::ReferenceData {
            reason: format!("Invalid {}: {} (expected 1-12)", what, month),
        });
    }
    Ok(())
}

impl ReferenceData for TableReferenceData {
    fn crop(&self, id: &CropId) -> Option<&CropGrowingInfo> {
        self.crops.get(id)
    }

    fn crops(&self) -> Vec<&CropGrowingInfo> {
        self.crops.values().collect()
    }

    fn popular_crops(&self) -> &[CropId] {
        &self.popular_crops
    }

    fn non_growing_items(&self) -> &[CropId] {
        &self.non_growing_items
    }

    fn precise_zones(&self) -> &BTreeMap<String, ZoneId> {
        &self.precise_zones
    }

    fn regional_zones(&self) -> &BTreeMap<String, ZoneId> {
        &self.regional_zones
    }

    fn latitude_bands(&self) -> &[LatitudeBand] {
        &self.latitude_bands
    }

    fn zone_frost(&self, zone: &ZoneId) -> Option<&ZoneFrostData> {
        self.zone_frost.get(zone)
    }

    fn wet_season(&self, southern_hemisphere: bool) -> Option<WetSeason> {
        if southern_hemisphere {
            self.wet_season_southern
        } else {
            self.wet_season_northern
        }
    }

    fn harvest_month(&self, crop: &CropId) -> Option<u32> {
        self.harvest_months.get(crop).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropKind;

    #[test]
    fn test_builtin_tables_parse() {
        let data = builtin_reference_data().unwrap();
        assert!(data.crops().len() > 20);
        assert!(!data.precise_zones().is_empty());
        assert!(!data.latitude_bands().is_empty());
    }

    #[test]
    fn test_builtin_zone_frost_dates() {
        let data = builtin_reference_data().unwrap();
        let zone: ZoneId = "7a".parse().unwrap();
        let frost = data.zone_frost(&zone).unwrap();
        assert_eq!(frost.last_spring_frost.unwrap().to_string(), "04-01");
        assert_eq!(frost.first_fall_frost.unwrap().to_string(), "10-31");
        assert_eq!(frost.growing_season_days, 213);

        let tropical: ZoneId = "11a".parse().unwrap();
        assert!(data.zone_frost(&tropical).unwrap().is_frost_free());
    }

    #[test]
    fn test_prefix_keys_are_lowercased() {
        let data = TableReferenceData::from_toml_str(
            r#"
[precise_zones]
"DRT" = "7a"

[regional_zones]
"Dr" = "6b"
"#,
        )
        .unwrap();

        assert_eq!(data.precise_zones().get("drt").map(ZoneId::to_string).as_deref(), Some("7a"));
        assert!(data.regional_zones().contains_key("dr"));
    }

    #[test]
    fn test_invalid_prefix_keys_are_rejected() {
        for table in [
            "[precise_zones]\n\"dra\" = \"7a\"",
            "[precise_zones]\n\"dr\" = \"7a\"",
            "[regional_zones]\n\"d-\" = \"7a\"",
            "[precise_zones]\n\"drt\" = \"7a\"\n\"DRT\" = \"7b\"",
        ] {
            let err = TableReferenceData::from_toml_str(table).unwrap_err();
            assert!(matches!(err, GrowError::ReferenceData { .. }), "{}", table);
        }
    }

    #[test]
    fn test_builtin_crop_kinds() {
        let data = builtin_reference_data().unwrap();
        assert_eq!(data.crop(&"garlic".into()).unwrap().kind, CropKind::FallPlanted);
        assert_eq!(data.crop(&"microgreens".into()).unwrap().kind, CropKind::Indoor);
        assert_eq!(
            data.crop(&"lemon".into()).unwrap().kind,
            CropKind::TreeFruit { citrus: true }
        );
        assert_eq!(data.harvest_month(&"apple".into()), Some(9));
    }

    #[test]
    fn test_builtin_popular_crops_reference_known_ids() {
        let data = builtin_reference_data().unwrap();
        for id in data.popular_crops() {
            assert!(
                data.crop(id).is_some() || data.is_non_growing(id),
                "popular crop '{}' is neither a crop nor a non-growing item",
                id
            );
        }
    }

    #[test]
    fn test_wet_seasons() {
        let data = builtin_reference_data().unwrap();
        let north = data.wet_season(false).unwrap();
        assert_eq!((north.start_month, north.end_month), (6, 10));
        let south = data.wet_season(true).unwrap();
        assert_eq!((south.start_month, south.end_month), (11, 3));
    }

    #[test]
    fn test_rejects_bad_prefix_length() {
        let toml_str = r#"
[precise_zones]
"9q8y" = "10b"
"#;
        let err = TableReferenceData::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, GrowError::ReferenceData { .. }));
    }

    #[test]
    fn test_rejects_empty_latitude_band() {
        let toml_str = r#"
[[latitude_bands]]
min_lat = 40.0
max_lat = 40.0
zone = "6a"
"#;
        assert!(TableReferenceData::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_rejects_invalid_zone_in_table() {
        let toml_str = r#"
[regional_zones]
"9q" = "banana"
"#;
        assert!(TableReferenceData::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = TableReferenceData::from_toml_file("/nonexistent/reference.toml").unwrap_err();
        assert!(matches!(err, GrowError::ReferenceDataNotFound { .. }));
    }
}
