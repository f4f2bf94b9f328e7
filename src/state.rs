//! Application state - single source of truth

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

pub use crate::conditions::{ConditionIcon, TempUnit};

/// Cities shown on a cold start when none are configured
pub const DEFAULT_CITIES: [&str; 5] = [
    "San Francisco",
    "San Diego",
    "Oakland",
    "Los Angeles",
    "Freemont",
];

/// Spinner timing for the refresh indicator.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// A city the user asked for, as typed: `City[, State[, Country]]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CityQuery {
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: None,
            country: None,
        }
    }

    /// Parse user input. Returns `None` when no city name is present.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input
            .split(',')
            .map(str::trim)
            .map(|part| (!part.is_empty()).then(|| part.to_string()));

        let city = parts.next().flatten()?;
        let state = parts.next().flatten();
        let country = parts.next().flatten();
        Some(Self {
            city,
            state,
            country,
        })
    }

    /// Label shown in the list
    pub fn label(&self) -> &str {
        &self.city
    }

    /// The `q` parameter for the geocoding endpoint
    pub fn geocode_query(&self) -> String {
        [Some(&self.city), self.state.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One rendered row: city label, temperature and condition icon
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherEntry {
    pub city: String,
    /// Provider reading in Kelvin; `None` when the row could not be resolved
    pub kelvin: Option<f64>,
    pub icon: ConditionIcon,
}

impl WeatherEntry {
    /// Placeholder row for a query that produced no weather
    pub fn unresolved(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            kelvin: None,
            icon: ConditionIcon::Unknown,
        }
    }

    pub fn temperature(&self, unit: TempUnit) -> String {
        unit.format(self.kelvin)
    }
}

/// Format a refresh time as `M/D/YYYY h:mm:ss AM`
pub fn format_updated_at(time: NaiveDateTime) -> String {
    time.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

/// Result of one refresh cycle
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub entries: Vec<WeatherEntry>,
    /// Wall-clock time the refresh was triggered, already formatted
    pub updated_at: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Queries in display order
    #[debug(section = "Cities", label = "Queries", debug_fmt)]
    pub cities: Vec<CityQuery>,

    /// Weather rows: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Rows", debug_fmt)]
    pub weather: DataResource<Vec<WeatherEntry>>,

    /// Whether a refresh is in flight while older rows stay visible
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Last refresh failure, shown without discarding loaded rows
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub refresh_error: Option<String>,

    #[debug(section = "Weather", label = "Last updated", debug_fmt)]
    pub last_updated: Option<String>,

    #[debug(section = "Weather", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    /// Highlighted row
    #[debug(section = "Cities", label = "Selected")]
    pub selected: usize,

    // --- Add-city input (skipped) ---
    #[debug(skip)]
    pub input_mode: bool,

    #[debug(skip)]
    pub input: String,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(cities: Vec<CityQuery>) -> Self {
        Self {
            cities,
            weather: DataResource::Empty,
            is_refreshing: false,
            refresh_error: None,
            last_updated: None,
            unit: TempUnit::default(),
            selected: 0,
            input_mode: false,
            input: String::new(),
            tick_count: 0,
        }
    }

    /// Rows currently on screen (may be stale while refreshing)
    pub fn entries(&self) -> &[WeatherEntry] {
        self.weather.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_busy(&self) -> bool {
        self.weather.is_loading() || self.is_refreshing
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES.into_iter().map(CityQuery::new).collect())
    }
}
