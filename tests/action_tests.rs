//! Action and state tests using TestHarness
//!
//! - Create a store or harness with initial state
//! - Emit actions to simulate user/async events
//! - Assert on state, emitted actions and effects

use city_weather::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CityQuery, ConditionIcon, TempUnit, WeatherEntry, WeatherReport},
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId};

fn report_for(state: &AppState) -> WeatherReport {
    WeatherReport {
        entries: state
            .cities
            .iter()
            .map(|c| WeatherEntry {
                city: c.label().to_string(),
                kelvin: Some(288.0),
                icon: ConditionIcon::Clouds,
            })
            .collect(),
        updated_at: "6/7/2025 8:09:10 PM".into(),
    }
}

#[test]
fn test_reducer_weather_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().weather.is_empty());

    let result = store.dispatch(Action::WeatherFetch);
    assert!(result.changed, "State should change");
    assert!(store.state().weather.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::FetchWeather { cities } if cities.len() == 5
    ));
}

#[test]
fn test_reducer_weather_load_matches_city_count() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::WeatherFetch);
    let report = report_for(store.state());
    store.dispatch(Action::WeatherDidLoad(report));

    assert!(store.state().weather.is_loaded());
    assert_eq!(store.state().entries().len(), store.state().cities.len());
    assert_eq!(
        store.state().last_updated.as_deref(),
        Some("6/7/2025 8:09:10 PM")
    );
}

#[test]
fn test_add_city_appends_exactly_one() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::InputOpen);
    store.dispatch(Action::InputChange("Reno, NV".into()));
    let result = store.dispatch(Action::InputSubmit("Reno, NV".into()));

    let state = store.state();
    assert_eq!(state.cities.len(), 6);
    assert_eq!(state.cities[5], CityQuery::parse("Reno, NV").unwrap());
    assert!(state.input.is_empty(), "input should be cleared");
    assert!(!state.input_mode);
    assert!(matches!(
        &result.effects[0],
        Effect::FetchWeather { cities } if cities.len() == 6
    ));
}

#[test]
fn test_refresh_preserves_city_list() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let before = store.state().cities.clone();

    store.dispatch(Action::WeatherFetch);
    store.dispatch(Action::WeatherFetch);

    assert_eq!(store.state().cities, before);
}

#[test]
fn test_reducer_toggle_units() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().unit, TempUnit::Fahrenheit);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Celsius);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Fahrenheit);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherFetch);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r a q u", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad(WeatherReport::default());
    let toggle = Action::UiToggleUnits;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(toggle.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(toggle.is_ui());
}

#[test]
fn test_custom_cities() {
    let state = AppState::new(vec![CityQuery::new("Nome"), CityQuery::new("Juneau")]);

    assert_eq!(state.cities.len(), 2);
    assert_eq!(state.cities[0].label(), "Nome");
    assert!(state.entries().is_empty());
}
