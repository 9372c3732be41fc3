pub mod openweather;

pub use openweather::{parse_current, OpenWeatherClient, DEFAULT_BASE_URL, DEFAULT_LANG};
