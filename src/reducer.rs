//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, CityQuery};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => DispatchResult::changed_with(begin_fetch(state)),

        Action::WeatherDidLoad(report) => {
            state.weather = DataResource::Loaded(report.entries);
            state.last_updated = Some(report.updated_at);
            state.is_refreshing = false;
            state.refresh_error = None;
            clamp_selection(state);
            DispatchResult::changed()
        }

        Action::WeatherDidError(msg) => {
            if state.weather.is_loaded() {
                state.refresh_error = Some(msg);
            } else {
                state.weather = DataResource::Failed(msg);
            }
            state.is_refreshing = false;
            clamp_selection(state);
            DispatchResult::changed()
        }

        // ===== Input actions =====
        Action::InputOpen => {
            if state.input_mode {
                return DispatchResult::unchanged();
            }
            state.input_mode = true;
            DispatchResult::changed()
        }

        Action::InputClose => {
            if !state.input_mode {
                return DispatchResult::unchanged();
            }
            state.input_mode = false;
            DispatchResult::changed()
        }

        Action::InputChange(text) => {
            state.input = text;
            DispatchResult::changed()
        }

        Action::InputSubmit(text) => {
            let Some(query) = CityQuery::parse(&text) else {
                return DispatchResult::unchanged();
            };
            state.cities.push(query);
            state.selected = state.cities.len() - 1;
            state.input.clear();
            state.input_mode = false;
            DispatchResult::changed_with(begin_fetch(state))
        }

        // ===== List actions =====
        Action::ListSelect(index) => {
            if index < state.entries().len() && index != state.selected {
                state.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Keep the highlight on an existing row
fn clamp_selection(state: &mut AppState) {
    let rows = state.entries().len();
    if state.selected >= rows {
        state.selected = rows.saturating_sub(1);
    }
}

/// Mark the list as loading and request a fetch of every city
fn begin_fetch(state: &mut AppState) -> Effect {
    if state.weather.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.weather = DataResource::Loading;
    }
    state.refresh_error = None;
    state.tick_count = 0;
    Effect::FetchWeather {
        cities: state.cities.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConditionIcon, WeatherEntry, WeatherReport};

    fn report(labels: &[&str]) -> WeatherReport {
        WeatherReport {
            entries: labels
                .iter()
                .map(|city| WeatherEntry {
                    city: city.to_string(),
                    kelvin: Some(290.0),
                    icon: ConditionIcon::Clear,
                })
                .collect(),
            updated_at: "1/2/2024 3:04:05 PM".into(),
        }
    }

    #[test]
    fn test_weather_fetch_sets_loading() {
        let mut state = AppState::default();
        state.tick_count = 5;

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(state.tick_count, 0);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                cities: state.cities.clone()
            }]
        );
    }

    #[test]
    fn test_refresh_keeps_rows_visible() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidLoad(report(&["A", "B"])));

        reducer(&mut state, Action::WeatherFetch);

        assert!(state.weather.is_loaded());
        assert!(state.is_refreshing);
        assert_eq!(state.entries().len(), 2);
    }

    #[test]
    fn test_weather_did_load_sets_timestamp() {
        let mut state = AppState {
            weather: DataResource::Loading,
            selected: 9,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::WeatherDidLoad(report(&["A", "B", "C"])));

        assert!(result.changed);
        assert_eq!(state.last_updated.as_deref(), Some("1/2/2024 3:04:05 PM"));
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_error_without_rows_fails() {
        let mut state = AppState {
            weather: DataResource::Loading,
            ..Default::default()
        };

        reducer(&mut state, Action::WeatherDidError("boom".into()));

        assert!(state.weather.is_failed());
        assert_eq!(state.refresh_error, None);
    }

    #[test]
    fn test_error_with_rows_keeps_them() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidLoad(report(&["A"])));
        reducer(&mut state, Action::WeatherFetch);

        reducer(&mut state, Action::WeatherDidError("boom".into()));

        assert!(state.weather.is_loaded());
        assert!(!state.is_refreshing);
        assert_eq!(state.refresh_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_failed_add_keeps_highlight_on_existing_row() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidLoad(report(&["A", "B", "C"])));
        reducer(&mut state, Action::InputSubmit("Reno".into()));
        assert_eq!(state.selected, 3);

        reducer(&mut state, Action::WeatherDidError("boom".into()));

        assert_eq!(state.entries().len(), 3);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_failed_refresh_keeps_last_updated() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidLoad(report(&["A"])));
        reducer(&mut state, Action::WeatherFetch);

        reducer(&mut state, Action::WeatherDidError("boom".into()));

        assert_eq!(state.last_updated.as_deref(), Some("1/2/2024 3:04:05 PM"));
    }

    #[test]
    fn test_submit_appends_and_clears_input() {
        let mut state = AppState {
            input_mode: true,
            input: "Portland, OR".into(),
            ..Default::default()
        };
        let before = state.cities.len();

        let result = reducer(&mut state, Action::InputSubmit("Portland, OR".into()));

        assert_eq!(state.cities.len(), before + 1);
        assert_eq!(state.cities.last().unwrap().city, "Portland");
        assert!(state.input.is_empty());
        assert!(!state.input_mode);
        assert_eq!(state.selected, before);
        let Effect::FetchWeather { cities } = &result.effects[0];
        assert_eq!(cities.len(), before + 1);
    }

    #[test]
    fn test_submit_blank_is_ignored() {
        let mut state = AppState {
            input_mode: true,
            ..Default::default()
        };
        let before = state.cities.clone();

        let result = reducer(&mut state, Action::InputSubmit("   ".into()));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.cities, before);
        assert!(state.input_mode);
    }

    #[test]
    fn test_fetch_preserves_cities_and_input() {
        let mut state = AppState {
            input: "half typed".into(),
            ..Default::default()
        };
        let before = state.cities.clone();

        reducer(&mut state, Action::WeatherFetch);

        assert_eq!(state.cities, before);
        assert_eq!(state.input, "half typed");
    }

    #[test]
    fn test_list_select_bounds() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherDidLoad(report(&["A", "B"])));

        assert!(reducer(&mut state, Action::ListSelect(1)).changed);
        assert_eq!(state.selected, 1);
        assert!(!reducer(&mut state, Action::ListSelect(1)).changed);
        assert!(!reducer(&mut state, Action::ListSelect(5)).changed);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_tick_only_while_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
