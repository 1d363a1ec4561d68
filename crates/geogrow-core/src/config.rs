use crate::error::{GrowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "geogrow.toml";

/// Longest geohash the codec will produce (60 bits)
pub const MAX_GEOHASH_PRECISION: usize = 12;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which crops a monthly calendar iterates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CropSet {
    /// The ordered "popular crops" list
    #[default]
    Popular,
    /// Every crop in the reference table
    All,
}

/// Layered configuration for GeoGrow
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub geohash_precision: ConfigValue<usize>,
    pub crop_set: ConfigValue<CropSet>,
    pub geocoder_url: ConfigValue<String>,
    pub geocode_cache_capacity: ConfigValue<u64>,
    pub geocode_cache_ttl_secs: ConfigValue<u64>,
    pub reference_data: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geohash_precision: ConfigValue::new(6, ConfigSource::Default),
            crop_set: ConfigValue::new(CropSet::Popular, ConfigSource::Default),
            geocoder_url: ConfigValue::new(
                "https://nominatim.openstreetmap.org".to_string(),
                ConfigSource::Default,
            ),
            geocode_cache_capacity: ConfigValue::new(1024, ConfigSource::Default),
            geocode_cache_ttl_secs: ConfigValue::new(86_400, ConfigSource::Default),
            reference_data: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GrowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GrowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(precision) = file_config.geohash_precision {
            self.geohash_precision.update(validate_precision(precision)?, ConfigSource::File);
        }

        if let Some(crop_set) = file_config.crop_set {
            self.crop_set.update(crop_set, ConfigSource::File);
        }

        if let Some(url) = file_config.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::File);
        }

        if let Some(capacity) = file_config.geocode_cache_capacity {
            self.geocode_cache_capacity.update(capacity, ConfigSource::File);
        }

        if let Some(ttl) = file_config.geocode_cache_ttl_secs {
            self.geocode_cache_ttl_secs.update(ttl, ConfigSource::File);
        }

        if let Some(reference_data) = file_config.reference_data {
            // Relative paths are resolved against the config file's directory
            let resolved = match path.as_ref().parent() {
                Some(dir) if reference_data.is_relative() => dir.join(reference_data),
                _ => reference_data,
            };
            self.reference_data.update(Some(resolved), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the config file only if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.as_ref().display());
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOGROW_GEOHASH_PRECISION
        if let Ok(precision_str) = env::var("GEOGROW_GEOHASH_PRECISION") {
            match precision_str.parse::<usize>().map_err(|_| ()).and_then(|p| {
                validate_precision(p).map_err(|_| ())
            }) {
                Ok(precision) => {
                    self.geohash_precision.update(precision, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid GEOGROW_GEOHASH_PRECISION value '{}': expected integer 1-{}",
                    precision_str,
                    MAX_GEOHASH_PRECISION
                ),
            }
        }

        // GEOGROW_CROP_SET
        if let Ok(crop_set_str) = env::var("GEOGROW_CROP_SET") {
            match parse_crop_set(&crop_set_str) {
                Ok(crop_set) => self.crop_set.update(crop_set, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOGROW_CROP_SET value '{}': expected popular or all",
                    crop_set_str
                ),
            }
        }

        // GEOGROW_GEOCODER_URL
        if let Ok(url) = env::var("GEOGROW_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // GEOGROW_GEOCODE_CACHE_CAPACITY
        if let Ok(capacity_str) = env::var("GEOGROW_GEOCODE_CACHE_CAPACITY") {
            match capacity_str.parse::<u64>() {
                Ok(capacity) => {
                    self.geocode_cache_capacity.update(capacity, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid GEOGROW_GEOCODE_CACHE_CAPACITY value '{}': expected integer",
                    capacity_str
                ),
            }
        }

        // GEOGROW_GEOCODE_CACHE_TTL
        if let Ok(ttl_str) = env::var("GEOGROW_GEOCODE_CACHE_TTL") {
            match ttl_str.parse::<u64>() {
                Ok(ttl) => self.geocode_cache_ttl_secs.update(ttl, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOGROW_GEOCODE_CACHE_TTL value '{}': expected seconds",
                    ttl_str
                ),
            }
        }

        // GEOGROW_REFERENCE_DATA
        if let Ok(path) = env::var("GEOGROW_REFERENCE_DATA") {
            self.reference_data.update(Some(PathBuf::from(path)), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(precision) = overrides.geohash_precision {
            self.geohash_precision.update(precision, ConfigSource::Cli);
        }

        if let Some(crop_set) = overrides.crop_set {
            self.crop_set.update(crop_set, ConfigSource::Cli);
        }

        if let Some(url) = overrides.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::Cli);
        }

        if let Some(path) = overrides.reference_data {
            self.reference_data.update(Some(path), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "geohash_precision".to_string(),
            (self.geohash_precision.value.to_string(), self.geohash_precision.source),
        );

        map.insert(
            "crop_set".to_string(),
            (format!("{:?}", self.crop_set.value), self.crop_set.source),
        );

        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );

        map.insert(
            "geocode_cache_capacity".to_string(),
            (self.geocode_cache_capacity.value.to_string(), self.geocode_cache_capacity.source),
        );

        map.insert(
            "geocode_cache_ttl_secs".to_string(),
            (self.geocode_cache_ttl_secs.value.to_string(), self.geocode_cache_ttl_secs.source),
        );

        let reference = match &self.reference_data.value {
            Some(path) => path.display().to_string(),
            None => "builtin".to_string(),
        };
        map.insert("reference_data".to_string(), (reference, self.reference_data.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    geohash_precision: Option<usize>,
    crop_set: Option<CropSet>,
    geocoder_url: Option<String>,
    geocode_cache_capacity: Option<u64>,
    geocode_cache_ttl_secs: Option<u64>,
    reference_data: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub geohash_precision: Option<usize>,
    pub crop_set: Option<CropSet>,
    pub geocoder_url: Option<String>,
    pub reference_data: Option<PathBuf>,
}

/// Parse crop set from string
pub fn parse_crop_set(s: &str) -> Result<CropSet> {
    match s.to_lowercase().as_str() {
        "popular" => Ok(CropSet::Popular),
        "all" => Ok(CropSet::All),
        _ => Err(GrowError::ConfigInvalid {
            key: "crop_set".to_string(),
            reason: format!("Invalid crop set: {}. Use popular or all", s),
        }),
    }
}

/// Check a geohash precision is within the codec's range
pub fn validate_precision(precision: usize) -> Result<usize> {
    if (1..=MAX_GEOHASH_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(GrowError::ConfigInvalid {
            key: "geohash_precision".to_string(),
            reason: format!("{} is outside 1-{}", precision, MAX_GEOHASH_PRECISION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.geohash_precision.value, 6);
        assert_eq!(config.geohash_precision.source, ConfigSource::Default);
        assert_eq!(config.crop_set.value, CropSet::Popular);
        assert_eq!(config.geocoder_url.value, "https://nominatim.openstreetmap.org");
        assert!(config.reference_data.value.is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
geohash_precision = 8
crop_set = "all"
geocoder_url = "http://localhost:8080"
geocode_cache_capacity = 64
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.geohash_precision.value, 8);
        assert_eq!(config.geohash_precision.source, ConfigSource::File);
        assert_eq!(config.crop_set.value, CropSet::All);
        assert_eq!(config.geocoder_url.value, "http://localhost:8080");
        assert_eq!(config.geocode_cache_capacity.value, 64);
        assert_eq!(config.geocode_cache_ttl_secs.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_rejects_out_of_range_precision() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "geohash_precision = 20").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, GrowError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_relative_reference_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "reference_data = \"tables/custom.toml\"\n").unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(&config_path).unwrap();
        assert_eq!(config.reference_data.value, Some(dir.path().join("tables/custom.toml")));
    }

    #[test]
    fn test_optional_file_missing_keeps_defaults() {
        let config = LayeredConfig::with_defaults()
            .load_from_optional_file("/nonexistent/geogrow.toml")
            .unwrap();
        assert_eq!(config.geohash_precision.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            geohash_precision: Some(9),
            crop_set: Some(CropSet::All),
            geocoder_url: None,
            reference_data: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.geohash_precision.value, 9);
        assert_eq!(config.geohash_precision.source, ConfigSource::Cli);
        assert_eq!(config.crop_set.value, CropSet::All);
        assert_eq!(config.geocoder_url.source, ConfigSource::Default);
        assert_eq!(config.reference_data.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_crop_set() {
        assert_eq!(parse_crop_set("popular").unwrap(), CropSet::Popular);
        assert_eq!(parse_crop_set("ALL").unwrap(), CropSet::All);
        assert!(parse_crop_set("some").is_err());
    }

    #[test]
    fn test_validate_precision() {
        assert_eq!(validate_precision(1).unwrap(), 1);
        assert_eq!(validate_precision(12).unwrap(), 12);
        assert!(validate_precision(0).is_err());
        assert!(validate_precision(13).is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("geohash_precision"));
        assert!(map.contains_key("crop_set"));
        assert!(map.contains_key("geocoder_url"));

        let (reference, source) = &map["reference_data"];
        assert_eq!(reference, "builtin");
        assert_eq!(*source, ConfigSource::Default);
    }
}
