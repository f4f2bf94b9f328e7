//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::api::DEFAULT_BASE_URL;
use crate::error::ApiError;
use crate::state::{CityQuery, DEFAULT_CITIES};

/// City weather list - current conditions for a handful of cities
#[derive(Parser, Debug)]
#[command(name = "city-weather")]
#[command(about = "Current weather for a list of cities, in the terminal")]
pub struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// City to show, as `City[, State[, Country]]` (repeatable)
    #[arg(long = "city", short = 'c', value_name = "CITY")]
    pub cities: Vec<String>,

    /// Also refresh automatically every N seconds
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_interval: Option<u64>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "CITY_WEATHER_LOG")]
    pub log_file: Option<PathBuf>,

    /// Base URL of the OpenWeatherMap API
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    /// Configured cities, or the default set when none parse
    pub fn initial_cities(&self) -> Vec<CityQuery> {
        let cities: Vec<_> = self
            .cities
            .iter()
            .filter_map(|c| CityQuery::parse(c))
            .collect();
        if cities.is_empty() {
            DEFAULT_CITIES.into_iter().map(CityQuery::new).collect()
        } else {
            cities
        }
    }

    pub fn api_key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ApiError::MissingApiKey)
    }
}
