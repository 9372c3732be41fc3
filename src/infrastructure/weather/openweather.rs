//! OpenWeatherMap current-conditions client

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{WeatherData, WeatherError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LANG: &str = "ru";

pub struct OpenWeatherClient {
    base_url: String,
    api_key: Option<String>,
    lang: String,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            lang: lang.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherData, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .http
            .get(self.endpoint())
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
                ("lang", self.lang.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Weather request failed");
                WeatherError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Weather API refused the request");
            return Err(WeatherError::Api(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        parse_current(&body)
    }
}

// ── Payload ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    main: MainBlock,
    wind: WindBlock,
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

/// Map a `/weather` response body to [`WeatherData`].
/// Temperature and wind speed are rounded to whole units.
pub fn parse_current(body: &str) -> Result<WeatherData, WeatherError> {
    let payload: CurrentPayload =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Decode("no weather condition".into()))?;

    Ok(WeatherData {
        temperature: payload.main.temp.round() as i32,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed.round() as i32,
        wind_direction: payload.wind.deg,
        description: condition.description,
        icon: condition.icon,
        visibility: payload.visibility,
        pressure: payload.main.pressure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASTANA: &str = r#"{
        "coord": {"lon": 71.43, "lat": 51.13},
        "weather": [{"id": 803, "main": "Clouds", "description": "облачно с прояснениями", "icon": "04d"}],
        "main": {"temp": -7.62, "feels_like": -13.1, "pressure": 1021, "humidity": 74},
        "visibility": 10000,
        "wind": {"speed": 4.5, "deg": 230},
        "name": "Astana"
    }"#;

    #[test]
    fn test_parse_current_rounds_metric_values() {
        let data = parse_current(ASTANA).unwrap();
        assert_eq!(data.temperature, -8);
        assert_eq!(data.wind_speed, 5);
        assert_eq!(data.wind_direction, 230);
        assert_eq!(data.humidity, 74);
        assert_eq!(data.pressure, 1021);
        assert_eq!(data.visibility, 10000);
        assert_eq!(data.icon, "04d");
        assert_eq!(data.description, "облачно с прояснениями");
    }

    #[test]
    fn test_parse_current_without_condition_fails() {
        let body = r#"{"main":{"temp":1.0,"pressure":1000,"humidity":50},"wind":{"speed":1.0},"weather":[]}"#;
        assert!(matches!(parse_current(body), Err(WeatherError::Decode(_))));
    }

    #[test]
    fn test_parse_current_rejects_garbage() {
        assert!(matches!(parse_current("<html>"), Err(WeatherError::Decode(_))));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = OpenWeatherClient::new("http://localhost:9/data/2.5/", None, DEFAULT_LANG);
        assert_eq!(client.endpoint(), "http://localhost:9/data/2.5/weather");
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let client = OpenWeatherClient::new(DEFAULT_BASE_URL, Some("  ".into()), DEFAULT_LANG);
        let err = client.current(51.13, 71.43).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }
}
