//! Effects - side effects declared by the reducer

use crate::state::CityQuery;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Geocode and fetch current weather for every query, in order
    FetchWeather { cities: Vec<CityQuery> },
}
