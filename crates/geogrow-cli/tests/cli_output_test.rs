//! Integration tests for the geogrow binary
//!
//! Each test runs the built binary in an empty directory so no local
//! geogrow.toml or GEOGROW_* variables leak in, then parses its JSON.

use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "GEOGROW_GEOHASH_PRECISION",
    "GEOGROW_CROP_SET",
    "GEOGROW_GEOCODER_URL",
    "GEOGROW_GEOCODE_CACHE_CAPACITY",
    "GEOGROW_GEOCODE_CACHE_TTL",
    "GEOGROW_REFERENCE_DATA",
];

fn run_in(dir: &TempDir, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_geogrow"));
    command.current_dir(dir.path()).args(args).env("RUST_LOG", "error");
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.output().expect("Failed to execute geogrow")
}

fn run_json(args: &[&str]) -> Value {
    let dir = TempDir::new().unwrap();
    let mut args = args.to_vec();
    args.push("--json");

    let output = run_in(&dir, &args);
    assert!(
        output.status.success(),
        "geogrow {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

#[test]
fn test_encode_boston() {
    let data = run_json(&["encode", "--lat=42.36", "--lon=-71.06"]);
    assert_eq!(data["geohash"], "drt2yz");
    assert_eq!(data["precision"], 6);
}

#[test]
fn test_encode_precision_flag() {
    let data = run_json(&["encode", "--lat=42.36", "--lon=-71.06", "--precision", "3"]);
    assert_eq!(data["geohash"], "drt");
}

#[test]
fn test_decode_reports_bounds() {
    let data = run_json(&["decode", "drt2yz"]);
    let lat = data["latitude"].as_f64().unwrap();
    let lon = data["longitude"].as_f64().unwrap();
    assert!((lat - 42.36).abs() <= data["lat_error"].as_f64().unwrap());
    assert!((lon + 71.06).abs() <= data["lon_error"].as_f64().unwrap());
    assert!(data["bounds"]["min_lat"].as_f64().unwrap() < lat);
}

#[test]
fn test_bytes8_token() {
    let data = run_json(&["bytes8", "9q8yyk"]);
    assert_eq!(data["hex"], "0x39713879796b0000");

    let data = run_json(&["from-bytes8", "0x39713879796b0000"]);
    assert_eq!(data["geohash"], "9q8yyk");
}

#[test]
fn test_zone_from_geohash() {
    let data = run_json(&["zone", "--geohash", "drt2yz"]);
    assert_eq!(data["zone"], "7a");
    assert_eq!(data["confidence"], "precise");
}

#[test]
fn test_frost_dates() {
    let data = run_json(&["frost", "7a", "--year", "2025"]);
    assert_eq!(data["last_spring_frost"], "2025-04-01");
    assert_eq!(data["first_fall_frost"], "2025-10-31");

    let data = run_json(&["frost", "7a", "--year", "2025", "--southern"]);
    assert_eq!(data["last_spring_frost"], "2025-10-01");
    assert_eq!(data["first_fall_frost"], "2026-04-30");
}

#[test]
fn test_profile_with_manual_zone() {
    let data = run_json(&["profile", "--geohash", "drt2yz", "--year", "2025", "--zone", "9b"]);
    assert_eq!(data["zone"], "9b");
    assert_eq!(data["confidence"], "manual");
    assert!(data.get("place").is_none());
}

#[test]
fn test_tomato_timeline() {
    let data =
        run_json(&["timeline", "tomato", "--lat=42.36", "--lon=-71.06", "--year", "2025"]);
    assert_eq!(data["crop_id"], "tomato");

    let actions: Vec<&str> = data["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"start-indoors"));
    assert!(actions.contains(&"transplant"));
    assert!(actions.contains(&"harvest"));
}

#[test]
fn test_unknown_crop_has_reason() {
    let data = run_json(&["timeline", "dragonfruit", "--geohash", "drt", "--year", "2025"]);
    assert!(data["events"].as_array().unwrap().is_empty());
    assert_eq!(data["not_suitable_reason"]["kind"], "crop_not_found");
}

#[test]
fn test_april_calendar() {
    let data = run_json(&["calendar", "--month", "4", "--geohash", "drt", "--year", "2025"]);
    assert_eq!(data["month"], 4);
    assert!(!data["transplant"].as_array().unwrap().is_empty());
    assert_eq!(data["transplant"][0]["action"], "transplant");
}

#[test]
fn test_crops_list() {
    let data = run_json(&["crops"]);
    let ids: Vec<&str> =
        data.as_array().unwrap().iter().map(|row| row["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&"tomato"));
    assert!(ids.contains(&"garlic"));
}

#[test]
fn test_config_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("geogrow.toml"), "geohash_precision = 8\n").unwrap();

    let output = run_in(&dir, &["config", "--json"]);
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    let precision = parsed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["key"] == "geohash_precision")
        .unwrap()
        .clone();
    assert_eq!(precision["value"], "8");
    assert_eq!(precision["source"], "file");
}

#[test]
fn test_invalid_geohash_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_in(&dir, &["decode", "abc!", "--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
