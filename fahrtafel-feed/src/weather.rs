//! Weather endpoint parsing
//!
//! Best-effort auxiliary readout: only the current temperature is taken
//! from the open-meteo response, formatted for the display header.

use core::fmt::Write;

use heapless::String;
use serde::Deserialize;

/// Capacity of the formatted temperature readout ("-10.5C")
pub const MAX_WEATHER_LEN: usize = 8;

#[derive(Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
}

#[derive(Deserialize, Default)]
struct CurrentWeather {
    #[serde(default)]
    temperature: Option<f32>,
}

/// Extract the current temperature as a "{temp}C" readout.
///
/// Returns `None` on any shortfall; weather failures never propagate.
pub fn parse_weather(payload: &[u8]) -> Option<String<MAX_WEATHER_LEN>> {
    let (response, _) = serde_json_core::de::from_slice::<WeatherResponse>(payload).ok()?;
    let temperature = response.current_weather?.temperature?;

    let mut out = String::new();
    write!(out, "{}C", temperature).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_temperature() {
        let body = br#"{"latitude": 49.22, "current_weather": {"temperature": 13.4, "windspeed": 7.2}}"#;
        assert_eq!(parse_weather(body).unwrap().as_str(), "13.4C");
    }

    #[test]
    fn test_negative_temperature() {
        let body = br#"{"current_weather": {"temperature": -2.5}}"#;
        assert_eq!(parse_weather(body).unwrap().as_str(), "-2.5C");
    }

    #[test]
    fn test_missing_block_is_none() {
        assert!(parse_weather(br#"{"latitude": 49.22}"#).is_none());
        assert!(parse_weather(b"garbage").is_none());
    }
}
