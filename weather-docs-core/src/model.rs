use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, units::DualUnitValue};

/// Message used when the provider reports no active alerts.
pub const NO_ALERTS: &str = "There are no alerts.";

/// Latitude/longitude pair sent to the weather provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the provider's `weather` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentWeather {
    pub time: String,
    pub temp: DualUnitValue,
    pub weather_conditions: Vec<Condition>,
    pub feels_like: DualUnitValue,
    pub humidity: String,
    pub uv: String,
    pub windspeed: DualUnitValue,
}

impl CurrentWeather {
    pub fn cell(&self, field: Field) -> CellValue<'_> {
        match field {
            Field::Temp => CellValue::Dual(&self.temp),
            Field::WeatherConditions => CellValue::Conditions(&self.weather_conditions),
            Field::FeelsLike => CellValue::Dual(&self.feels_like),
            Field::Humidity => CellValue::Text(&self.humidity),
            Field::Uv => CellValue::Text(&self.uv),
            Field::Windspeed => CellValue::Dual(&self.windspeed),
        }
    }

    /// Icon of the leading condition, if any.
    pub fn icon(&self) -> Option<&str> {
        self.weather_conditions.first().map(|c| c.icon.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyEntry {
    pub time: String,
    pub temp: DualUnitValue,
    pub weather_conditions: Vec<Condition>,
    pub chance_of_rain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub time: String,
    pub min_temp: DualUnitValue,
    pub max_temp: DualUnitValue,
    pub weather_conditions: Vec<Condition>,
    pub chance_of_rain: String,
}

/// Normalized weather for one location: current conditions, 12 hourly and
/// 7 daily entries in provider order, and the first alert's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRecord {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
    pub alert: String,
}

/// Rows of the current-weather table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Temp,
    WeatherConditions,
    FeelsLike,
    Humidity,
    Uv,
    Windspeed,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Temp,
        Field::WeatherConditions,
        Field::FeelsLike,
        Field::Humidity,
        Field::Uv,
        Field::Windspeed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Temp => "temp",
            Field::WeatherConditions => "weather_conditions",
            Field::FeelsLike => "feels_like",
            Field::Humidity => "humidity",
            Field::Uv => "uv",
            Field::Windspeed => "windspeed",
        }
    }

    /// Human-readable label shown in the table's first column.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Temp => "Temperature",
            Field::WeatherConditions => "Weather Conditions",
            Field::FeelsLike => "Feels like",
            Field::Humidity => "Humidity (%)",
            Field::Uv => "UV Index",
            Field::Windspeed => "Wind speed",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// A value headed for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
    Dual(&'a DualUnitValue),
    Conditions(&'a [Condition]),
    Text(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_roundtrip() {
        for field in Field::ALL {
            let parsed: Field = field.key().parse().expect("known key must parse");
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = "pressure".parse::<Field>().unwrap_err();
        assert!(matches!(err, Error::UnknownField(ref key) if key == "pressure"));
    }

    #[test]
    fn labels_are_human_readable() {
        let labels: Vec<_> = Field::ALL.iter().map(Field::label).collect();
        assert_eq!(
            labels,
            ["Temperature", "Weather Conditions", "Feels like", "Humidity (%)", "UV Index", "Wind speed"]
        );
    }
}
