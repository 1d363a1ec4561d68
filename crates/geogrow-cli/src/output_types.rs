//! Serializable shapes printed by the CLI

use chrono::NaiveDate;
use geogrow_core::config::ConfigSource;
use geogrow_core::models::{
    Confidence, CropGrowingInfo, CropKind, FrostWindow, GrowingProfile, PlantingEvent, ZoneId,
};
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize)]
pub struct EncodeOutput {
    pub geohash: String,
    pub precision: usize,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub geohash: String,
    pub latitude: f64,
    pub longitude: f64,
    pub lat_error: f64,
    pub lon_error: f64,
    pub bounds: BoundsOutput,
}

#[derive(Debug, Serialize)]
pub struct BoundsOutput {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

#[derive(Debug, Serialize)]
pub struct Bytes8Output {
    pub geohash: String,
    pub hex: String,
}

#[derive(Debug, Serialize)]
pub struct ZoneOutput {
    pub latitude: f64,
    pub longitude: f64,
    pub geohash: String,
    pub zone: ZoneId,
    pub confidence: Confidence,
}

#[derive(Debug, Serialize)]
pub struct FrostOutput {
    pub zone: ZoneId,
    pub year: i32,
    pub southern_hemisphere: bool,
    #[serde(flatten)]
    pub window: FrostWindow,
}

#[derive(Debug, Serialize)]
pub struct ProfileOutput {
    #[serde(flatten)]
    pub profile: GrowingProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// One planting event as a table row
#[derive(Debug, Serialize, Tabled)]
pub struct EventRow {
    #[tabled(rename = "Crop")]
    pub crop: String,
    #[tabled(rename = "Action")]
    pub action: String,
    #[tabled(rename = "From")]
    pub start_date: NaiveDate,
    #[tabled(rename = "To")]
    pub end_date: NaiveDate,
    #[tabled(rename = "Notes")]
    pub notes: String,
}

impl From<&PlantingEvent> for EventRow {
    fn from(event: &PlantingEvent) -> Self {
        Self {
            crop: event.crop_name.clone(),
            action: event.action.to_string(),
            start_date: event.start_date,
            end_date: event.end_date,
            notes: event.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct CropRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Perennial")]
    pub perennial: bool,
    #[tabled(rename = "Popular")]
    pub popular: bool,
}

impl CropRow {
    pub fn new(crop: &CropGrowingInfo, popular: bool) -> Self {
        let kind = match crop.kind {
            CropKind::Annual => "annual",
            CropKind::Indoor => "indoor",
            CropKind::FallPlanted => "fall planted",
            CropKind::TreeFruit { citrus: true } => "citrus",
            CropKind::TreeFruit { citrus: false } => "tree fruit",
        };
        Self {
            id: crop.id.to_string(),
            name: crop.name.clone(),
            kind: kind.to_string(),
            perennial: crop.is_perennial,
            popular,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigRow {
    pub fn new(key: String, value: String, source: ConfigSource) -> Self {
        Self { key, value, source: format!("{:?}", source).to_lowercase() }
    }
}
