//! Crop botanical reference data.
//!
//! A crop's scheduling category is a closed set ([`CropKind`]) rather than a
//! bag of boolean flags, so a crop can never match two categories at once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable crop identifier (e.g. `tomato`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(pub String);

impl CropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Scheduling category of a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CropKind {
    /// Frost-gated annual (or herbaceous perennial) built from sow/transplant blocks
    #[default]
    Annual,
    /// Grown indoors year-round (microgreens, sprouts)
    Indoor,
    /// Planted in autumn, harvested the following summer (garlic-like)
    FallPlanted,
    /// Established tree or citrus fruit; only the harvest is scheduled
    TreeFruit { citrus: bool },
}

/// Inclusive range of weeks relative to a frost date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub min: u32,
    pub max: u32,
}

/// Offset of a sowing or transplanting window from the last spring frost.
///
/// At most one of the two offsets is normally set; with neither, the window
/// opens on the frost date itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SowTiming {
    #[serde(default)]
    pub weeks_before_last_frost: Option<u32>,
    #[serde(default)]
    pub weeks_after_last_frost: Option<u32>,
}

/// Cool-season second planting anchored to the first fall frost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallSow {
    pub weeks_before_first_frost: u32,
    /// Lowest zone number in which a fall sowing still matures
    pub min_zone: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysToMaturity {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrostTolerance {
    /// Killed by the first frost
    #[default]
    None,
    Light,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestWindow {
    /// Recorded with the crop data; scheduling starts the harvest at maturity
    pub weeks_from_maturity: u32,
    /// Length of the harvest window in weeks
    pub duration: u32,
}

/// Static per-crop growing information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropGrowingInfo {
    pub id: CropId,
    pub name: String,
    #[serde(default)]
    pub kind: CropKind,
    #[serde(default)]
    pub start_indoors: Option<WeekRange>,
    #[serde(default)]
    pub direct_sow: Option<SowTiming>,
    #[serde(default)]
    pub transplant: Option<SowTiming>,
    #[serde(default)]
    pub fall_sow: Option<FallSow>,
    pub days_to_maturity: DaysToMaturity,
    #[serde(default)]
    pub frost_tolerance: FrostTolerance,
    #[serde(default)]
    pub is_perennial: bool,
    /// `Some(false)` excludes the crop in tropical climates
    #[serde(default)]
    pub tropical_suitable: Option<bool>,
    pub harvest_window: HarvestWindow,
}

impl CropGrowingInfo {
    pub fn is_unsuitable_for_tropics(&self) -> bool {
        self.tropical_suitable == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_kind_from_toml() {
        let toml_str = r#"
id = "lemon"
name = "Lemon"
kind = { type = "tree_fruit", citrus = true }
is_perennial = true
days_to_maturity = { min = 180, max = 240 }
harvest_window = { weeks_from_maturity = 0, duration = 12 }
"#;
        let crop: CropGrowingInfo = toml::from_str(toml_str).unwrap();
        assert_eq!(crop.kind, CropKind::TreeFruit { citrus: true });
        assert_eq!(crop.frost_tolerance, FrostTolerance::None);
        assert!(crop.direct_sow.is_none());
    }

    #[test]
    fn test_defaults_to_annual() {
        let toml_str = r#"
id = "radish"
name = "Radish"
direct_sow = { weeks_before_last_frost = 4 }
days_to_maturity = { min = 25, max = 30 }
frost_tolerance = "light"
harvest_window = { weeks_from_maturity = 0, duration = 2 }
"#;
        let crop: CropGrowingInfo = toml::from_str(toml_str).unwrap();
        assert_eq!(crop.kind, CropKind::Annual);
        assert_eq!(crop.direct_sow.unwrap().weeks_before_last_frost, Some(4));
        assert!(!crop.is_unsuitable_for_tropics());
    }
}
