//! Weather lookup port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Current conditions at a coordinate, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// °C, rounded
    pub temperature: i32,
    /// %
    pub humidity: u8,
    /// m/s, rounded
    pub wind_speed: i32,
    /// Degrees
    pub wind_direction: u16,
    pub description: String,
    pub icon: String,
    /// Metres
    pub visibility: u32,
    /// hPa
    pub pressure: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather API key is not configured")]
    MissingApiKey,

    #[error("Failed to fetch weather data: {0}")]
    Network(String),

    #[error("Weather API returned status {0}")]
    Api(u16),

    #[error("Unexpected weather payload: {0}")]
    Decode(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherData, WeatherError>;
}
