//! Current weather from the Bright Sky API (DWD data).

use super::{ApiError, ApiResult, EnvConfig};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::Deserialize;

pub(crate) const DEFAULT_LAT: f64 = 48.73;
pub(crate) const DEFAULT_LON: f64 = 9.11;

const BRIGHTSKY_URL: &str = "https://api.brightsky.dev/weather";

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct WeatherEntry {
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct WeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WeatherIcon {
    Sun,
    CloudSun,
    Cloud,
    Fog,
    Rain,
    Snow,
    Thunder,
    Unknown,
}

impl WeatherIcon {
    pub fn from_condition(condition: &str, cloud_cover: f64) -> Self {
        match condition {
            "dry" if cloud_cover < 20.0 => WeatherIcon::Sun,
            "dry" if cloud_cover < 70.0 => WeatherIcon::CloudSun,
            "dry" => WeatherIcon::Cloud,
            "clear" | "mostly-clear" => WeatherIcon::Sun,
            "partly-cloudy" => WeatherIcon::CloudSun,
            "cloudy" | "overcast" => WeatherIcon::Cloud,
            "fog" | "fog-patches" => WeatherIcon::Fog,
            "light-rain" | "rain" | "heavy-rain" | "showers" | "drizzle" | "sleet" | "hail" => {
                WeatherIcon::Rain
            }
            "light-snow" | "snow" | "heavy-snow" => WeatherIcon::Snow,
            "thunderstorm" => WeatherIcon::Thunder,
            _ => WeatherIcon::Unknown,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀️",
            WeatherIcon::CloudSun => "⛅",
            WeatherIcon::Cloud => "☁️",
            WeatherIcon::Fog => "🌫️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Snow => "❄️",
            WeatherIcon::Thunder => "⛈️",
            WeatherIcon::Unknown => "❔",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WeatherSummary {
    pub temperature: i32,
    /// Precipitation probability of the next forecast hour, in percent.
    pub precipitation: u32,
    pub icon: WeatherIcon,
}

/// Latest observation at or before `now`, plus the rain chance of the first entry after it.
pub(crate) fn summarize(entries: &[WeatherEntry], now: DateTime<Utc>) -> Option<WeatherSummary> {
    let current = entries.iter().filter(|e| e.timestamp <= now).last()?;
    let forecast = entries.iter().find(|e| e.timestamp > now);

    let precipitation = forecast
        .and_then(|e| e.precipitation_probability)
        .unwrap_or(0.0)
        .round()
        .max(0.0) as u32;

    Some(WeatherSummary {
        temperature: current.temperature.unwrap_or(0.0).round() as i32,
        precipitation,
        icon: WeatherIcon::from_condition(
            current.condition.as_deref().unwrap_or_default(),
            current.cloud_cover.unwrap_or(0.0),
        ),
    })
}

pub(crate) async fn fetch_current(
    config: &EnvConfig,
    date: &str,
    now_ms: i64,
) -> ApiResult<WeatherSummary> {
    let url = format!(
        "{BRIGHTSKY_URL}?lat={}&lon={}&date={}",
        config.weather_lat,
        config.weather_lon,
        urlencoding::encode(date)
    );

    let res = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(ApiError::network)?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::http(status, body, "Weather request failed"));
    }

    let data: WeatherResponse = res.json().await.map_err(ApiError::parse)?;
    let now = Utc
        .timestamp_millis_opt(now_ms)
        .single()
        .ok_or_else(|| ApiError::parse("invalid clock"))?;

    summarize(&data.weather, now).ok_or_else(|| ApiError::parse("Keine aktuellen Wetterdaten"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<WeatherEntry> {
        serde_json::from_value(serde_json::json!([
            {"timestamp": "2024-05-01T09:00:00+02:00", "temperature": 12.4, "condition": "dry", "cloud_cover": 10, "precipitation_probability": 5},
            {"timestamp": "2024-05-01T10:00:00+02:00", "temperature": 13.6, "condition": "dry", "cloud_cover": 50, "precipitation_probability": null},
            {"timestamp": "2024-05-01T11:00:00+02:00", "temperature": 15.0, "condition": "rain", "cloud_cover": 90, "precipitation_probability": 64}
        ]))
        .expect("entries should parse")
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_summarize_picks_latest_past_entry() {
        let s = summarize(&entries(), at("2024-05-01T10:30:00+02:00")).expect("summary");
        assert_eq!(s.temperature, 14);
        assert_eq!(s.icon, WeatherIcon::CloudSun);
        assert_eq!(s.precipitation, 64);
    }

    #[test]
    fn test_summarize_without_forecast_or_past() {
        let s = summarize(&entries(), at("2024-05-01T12:00:00+02:00")).expect("summary");
        assert_eq!(s.icon, WeatherIcon::Rain);
        assert_eq!(s.precipitation, 0);

        assert_eq!(summarize(&entries(), at("2024-05-01T08:00:00+02:00")), None);
    }

    #[test]
    fn test_icon_mapping() {
        assert_eq!(WeatherIcon::from_condition("dry", 19.0), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::from_condition("dry", 70.0), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_condition("fog", 0.0), WeatherIcon::Fog);
        assert_eq!(WeatherIcon::from_condition("snow", 0.0), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_condition("???", 0.0), WeatherIcon::Unknown);
    }
}
