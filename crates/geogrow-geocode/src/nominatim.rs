use geogrow_core::config::LayeredConfig;
use geogrow_core::error::{GrowError, Result};
use geogrow_core::models::{Coordinate, PlaceName};
use geogrow_core::ports::ReverseGeocoder;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("geogrow/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reverse geocoder backed by a Nominatim server
pub struct NominatimGeocoder {
    /// Base URL for the Nominatim API (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,

    /// Runtime the async requests are driven on
    runtime: tokio::runtime::Runtime,
}

impl NominatimGeocoder {
    /// Create a geocoder for the given server
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GrowError::ConfigMissing { key: "geocoder_url".to_string() });
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GrowError::GeocoderUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
                remediation: "Check the TLS configuration of this system".to_string(),
            })?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(
            |e| GrowError::GeocoderUnavailable {
                reason: format!("Failed to create async runtime: {}", e),
                remediation: "Ensure tokio is properly configured".to_string(),
            },
        )?;

        Ok(Self { base_url, client, runtime })
    }

    /// Create a geocoder from the configured server URL
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::new(config.geocoder_url.value.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lookup(&self, coordinate: Coordinate) -> Result<NominatimResponse> {
        self.runtime.block_on(async {
            let response = self
                .client
                .get(format!(
                    "{}/reverse?format=jsonv2&addressdetails=1&lat={}&lon={}",
                    self.base_url, coordinate.latitude, coordinate.longitude
                ))
                .send()
                .await
                .map_err(|e| GrowError::GeocoderUnavailable {
                    reason: format!("Failed to connect to Nominatim: {}", e),
                    remediation: format!(
                        "Ensure {} is reachable or set GEOGROW_GEOCODER_URL to another server",
                        self.base_url
                    ),
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(GrowError::GeocoderUnavailable {
                    reason: format!("Nominatim API error ({}): {}", status, error_text),
                    remediation: "Public Nominatim allows one request per second; retry later"
                        .to_string(),
                });
            }

            let body: NominatimResponse =
                response.json().await.map_err(|e| GrowError::GeocoderUnavailable {
                    reason: format!("Failed to parse Nominatim response: {}", e),
                    remediation: "Check Nominatim API compatibility".to_string(),
                })?;

            if let Some(error) = body.error {
                return Err(GrowError::GeocoderUnavailable {
                    reason: format!("Nominatim could not geocode {}: {}", coordinate, error),
                    remediation: "Try a coordinate on land".to_string(),
                });
            }

            Ok(body)
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String> {
        let body = self.lookup(coordinate)?;
        body.display_name.ok_or_else(|| GrowError::GeocoderUnavailable {
            reason: "Nominatim response has no display name".to_string(),
            remediation: "Check Nominatim API compatibility".to_string(),
        })
    }

    fn reverse_geocode_with_neighborhood(&self, coordinate: Coordinate) -> Result<PlaceName> {
        let body = self.lookup(coordinate)?;
        body.address.unwrap_or_default().into_place_name().ok_or_else(|| {
            GrowError::GeocoderUnavailable {
                reason: format!("No city or state found for {}", coordinate),
                remediation: "Try a coordinate inside a populated area".to_string(),
            }
        })
    }
}

/// Response body of the Nominatim reverse endpoint
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    address: Option<NominatimAddress>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    neighbourhood: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    fn into_place_name(self) -> Option<PlaceName> {
        let neighborhood = self.neighbourhood.or(self.suburb);
        let city = self.city.or(self.town).or(self.village).or(self.county);
        let state = self.state.or(self.country);

        match (city, state) {
            (Some(city), Some(state)) => Some(PlaceName { neighborhood, city, state }),
            (Some(city), None) => Some(PlaceName { neighborhood, city, state: String::new() }),
            (None, Some(state)) => Some(PlaceName { neighborhood, city: state.clone(), state }),
            (None, None) => None,
        }
    }
}
