//! Configuration and reference data loading for CLI commands

use anyhow::{Context, Result};
use geogrow_core::config::{CliConfigOverrides, LayeredConfig, CONFIG_FILE_NAME};
use geogrow_core::{builtin_reference_data, TableReferenceData};
use std::borrow::Cow;
use std::path::Path;

/// Load layered configuration: defaults, then the config file, then the
/// environment, then CLI overrides
///
/// An explicit `config_path` must exist; otherwise `./geogrow.toml` is read
/// only when present.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let config = match config_path {
        Some(path) => LayeredConfig::with_defaults()
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => LayeredConfig::with_defaults()
            .load_from_optional_file(CONFIG_FILE_NAME)
            .context("Failed to load configuration file")?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// Reference tables named by the config, or the built-in tables
pub fn load_reference_data(config: &LayeredConfig) -> Result<Cow<'static, TableReferenceData>> {
    match &config.reference_data.value {
        Some(path) => {
            let data = TableReferenceData::from_toml_file(path).with_context(|| {
                format!("Failed to load reference data from {}", path.display())
            })?;
            Ok(Cow::Owned(data))
        }
        None => {
            let data = builtin_reference_data().context("Built-in reference data is invalid")?;
            Ok(Cow::Borrowed(data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogrow_core::config::{ConfigSource, CropSet};
    use geogrow_core::ports::ReferenceData;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_beat_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geogrow.toml");
        fs::write(&path, "geohash_precision = 8\ncrop_set = \"all\"\n").unwrap();

        let overrides = CliConfigOverrides { geohash_precision: Some(5), ..Default::default() };
        let config = load_config(Some(&path), overrides).unwrap();

        assert_eq!(config.geohash_precision.value, 5);
        assert_eq!(config.geohash_precision.source, ConfigSource::Cli);
        assert_eq!(config.crop_set.value, CropSet::All);
        assert_eq!(config.crop_set.source, ConfigSource::File);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), CliConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_builtin_reference_data_by_default() {
        let config = LayeredConfig::with_defaults();
        let data = load_reference_data(&config).unwrap();
        assert!(matches!(data, Cow::Borrowed(_)));
        assert!(!data.popular_crops().is_empty());
    }

    #[test]
    fn test_missing_reference_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let overrides = CliConfigOverrides {
            reference_data: Some(dir.path().join("missing.toml")),
            ..Default::default()
        };
        let mut config = LayeredConfig::with_defaults();
        config.update_from_cli(overrides);
        assert!(load_reference_data(&config).is_err());
    }
}
