//! Simulation parameter types.
//!
//! The knobs exposed by the sidebar: wind, payload and weather. Values are
//! stored exactly as given; range checks are left to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather preset for the cosmetic simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Rain,
    Typhoon,
    Snow,
}

impl WeatherCondition {
    /// All conditions in sidebar order.
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Clear,
        WeatherCondition::Rain,
        WeatherCondition::Typhoon,
        WeatherCondition::Snow,
    ];
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherCondition::Clear => write!(f, "clear"),
            WeatherCondition::Rain => write!(f, "rain"),
            WeatherCondition::Typhoon => write!(f, "typhoon"),
            WeatherCondition::Snow => write!(f, "snow"),
        }
    }
}

/// Current simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Direction the wind blows from, degrees clockwise from north
    pub wind_direction: f64,
    /// Drone payload in kg
    pub drone_payload: f64,
    pub weather_condition: WeatherCondition,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            wind_speed: 5.0,
            wind_direction: 180.0,
            drone_payload: 2.5,
            weather_condition: WeatherCondition::Clear,
        }
    }
}

impl SimulationParams {
    /// Overwrites the fields present in `patch`.
    ///
    /// Each field is a terminal value, so a present field replaces the old
    /// one outright.
    pub fn apply(&mut self, patch: &SimulationParamsPatch) {
        if let Some(wind_speed) = patch.wind_speed {
            self.wind_speed = wind_speed;
        }
        if let Some(wind_direction) = patch.wind_direction {
            self.wind_direction = wind_direction;
        }
        if let Some(drone_payload) = patch.drone_payload {
            self.drone_payload = drone_payload;
        }
        if let Some(weather_condition) = patch.weather_condition {
            self.weather_condition = weather_condition;
        }
    }
}

/// Partial simulation parameter update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParamsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drone_payload: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_condition: Option<WeatherCondition>,
}

impl SimulationParamsPatch {
    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    pub fn with_wind_direction(mut self, wind_direction: f64) -> Self {
        self.wind_direction = Some(wind_direction);
        self
    }

    pub fn with_drone_payload(mut self, drone_payload: f64) -> Self {
        self.drone_payload = Some(drone_payload);
        self
    }

    pub fn with_weather(mut self, weather_condition: WeatherCondition) -> Self {
        self.weather_condition = Some(weather_condition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SimulationParams::default();
        assert_eq!(params.wind_speed, 5.0);
        assert_eq!(params.wind_direction, 180.0);
        assert_eq!(params.drone_payload, 2.5);
        assert_eq!(params.weather_condition, WeatherCondition::Clear);
    }

    #[test]
    fn test_apply_replaces_only_present_fields() {
        let mut params = SimulationParams::default();
        params.apply(&SimulationParamsPatch::default().with_weather(WeatherCondition::Typhoon));

        assert_eq!(params.weather_condition, WeatherCondition::Typhoon);
        assert_eq!(params.wind_speed, 5.0);
        assert_eq!(params.wind_direction, 180.0);
        assert_eq!(params.drone_payload, 2.5);
    }

    #[test]
    fn test_apply_accepts_out_of_range_values() {
        let mut params = SimulationParams::default();
        params.apply(&SimulationParamsPatch::default().with_wind_speed(-3.0));
        assert_eq!(params.wind_speed, -3.0);
    }

    #[test]
    fn test_weather_serialization() {
        assert_eq!(
            serde_json::to_string(&WeatherCondition::Typhoon).unwrap(),
            r#""typhoon""#
        );
        let parsed: WeatherCondition = serde_json::from_str(r#""snow""#).unwrap();
        assert_eq!(parsed, WeatherCondition::Snow);
        assert_eq!(WeatherCondition::Rain.to_string(), "rain");
    }

    #[test]
    fn test_patch_from_sparse_json() {
        let patch: SimulationParamsPatch =
            serde_json::from_str(r#"{"wind_speed": 12, "weather_condition": "rain"}"#).unwrap();
        assert_eq!(patch.wind_speed, Some(12.0));
        assert_eq!(patch.weather_condition, Some(WeatherCondition::Rain));
        assert_eq!(patch.wind_direction, None);
    }
}
