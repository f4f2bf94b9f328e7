pub mod add_city_overlay;
pub mod title_header;
pub mod weather_display;
pub mod weather_list;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use add_city_overlay::{AddCityOverlay, AddCityOverlayProps};
pub use title_header::{TITLE_HEIGHT, TitleHeader, TitleHeaderProps};
pub use weather_display::{APP_TITLE, WeatherDisplay, WeatherDisplayProps};
pub use weather_list::{ERROR_ICON, WeatherList, WeatherListProps, row_line};
