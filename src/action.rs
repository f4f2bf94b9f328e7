//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: re-fetch every city in the list
    WeatherFetch,

    /// Result: all rows fetched (unresolved rows carry placeholders)
    WeatherDidLoad(WeatherReport),

    /// Result: the batch failed as a whole
    WeatherDidError(String),

    // ===== Input category =====
    /// Open the add-city field
    InputOpen,

    /// Close the add-city field without adding
    InputClose,

    /// Input text changed
    InputChange(String),

    /// Append the typed city and refresh everything
    InputSubmit(String),

    // ===== List category =====
    /// Highlight a row (by index)
    ListSelect(usize),

    // ===== UI category =====
    /// Toggle between Fahrenheit and Celsius
    UiToggleUnits,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Spinner tick while a refresh is in flight
    Tick,

    /// Exit the application
    Quit,
}
