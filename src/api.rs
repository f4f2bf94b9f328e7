//! OpenWeatherMap API client

use std::time::Duration;

use futures_util::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::conditions::ConditionIcon;
use crate::error::ApiError;
use crate::state::{CityQuery, WeatherEntry};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<ConditionSummary>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSummary {
    main: String,
}

/// Resolved position of a city query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions at a position
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentConditions {
    pub kelvin: f64,
    /// Provider category of the first condition, e.g. `Clouds`
    pub category: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Resolve a query to coordinates. Only the first match is used;
    /// `Ok(None)` means the provider knows no such place.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, query: &CityQuery) -> Result<Option<Coordinates>, ApiError> {
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=10&appid={}",
            self.base_url,
            urlencoding::encode(&query.geocode_query()),
            urlencoding::encode(&self.api_key),
        );

        let matches: Vec<GeocodingResult> = self.get_json(&url).await?;
        Ok(matches.into_iter().next().map(|m| Coordinates {
            lat: m.lat,
            lon: m.lon,
        }))
    }

    /// Fetch current conditions at the given coordinates
    #[instrument(skip(self), level = "debug")]
    pub async fn current_conditions(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentConditions, ApiError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}",
            self.base_url,
            coords.lat,
            coords.lon,
            urlencoding::encode(&self.api_key),
        );

        let data: CurrentWeatherResponse = self.get_json(&url).await?;
        Ok(CurrentConditions {
            kelvin: data.main.temp,
            category: data.weather.into_iter().next().map(|c| c.main),
        })
    }

    /// Produce the row for one query.
    ///
    /// Unknown places and transport failures become placeholder rows; HTTP
    /// status and decode errors are returned so the whole batch fails.
    pub async fn fetch_entry(&self, query: &CityQuery) -> Result<WeatherEntry, ApiError> {
        let label = query.label();

        let coords = match self.geocode(query).await {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                debug!(city = %label, "no geocoding match");
                return Ok(WeatherEntry::unresolved(label));
            }
            Err(e) if e.is_transport() => {
                warn!(city = %label, error = %e, "geocoding request failed");
                return Ok(WeatherEntry::unresolved(label));
            }
            Err(e) => return Err(e),
        };

        match self.current_conditions(coords).await {
            Ok(conditions) => Ok(WeatherEntry {
                city: label.to_string(),
                kelvin: Some(conditions.kelvin),
                icon: ConditionIcon::from_category(conditions.category.as_deref()),
            }),
            Err(e) if e.is_transport() => {
                warn!(city = %label, error = %e, "weather request failed");
                Ok(WeatherEntry::unresolved(label))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch every query concurrently; rows come back in input order.
    #[instrument(skip_all, fields(count = cities.len()), level = "info")]
    pub async fn fetch_all(&self, cities: &[CityQuery]) -> Result<Vec<WeatherEntry>, ApiError> {
        let entries = try_join_all(cities.iter().map(|city| self.fetch_entry(city))).await?;
        debug!(rows = entries.len(), "refresh complete");
        Ok(entries)
    }
}
