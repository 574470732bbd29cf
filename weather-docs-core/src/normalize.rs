//! Turns a One Call response into a [`WeatherRecord`] of display strings.

use chrono::{Local, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Number, Value};

use crate::{
    Error, Result,
    model::{Condition, CurrentWeather, DailyEntry, HourlyEntry, NO_ALERTS, WeatherRecord},
    units::{DualUnitValue, rain_chance},
};

pub const HOURLY_ENTRIES: usize = 12;
pub const DAILY_ENTRIES: usize = 7;

const REQUIRED_KEYS: [&str; 4] = ["current", "hourly", "daily", "timezone"];

const CURRENT_TIME_FORMAT: &str = "%A, %B %d, %Y at %I:%M %p";
const HOURLY_TIME_FORMAT: &str = "%I:%M %p";
const DAILY_TIME_FORMAT: &str = "%B %d";

#[derive(Debug, Deserialize)]
struct RawWeatherResponse {
    timezone: String,
    current: RawCurrent,
    // Entries are decoded one by one, and only those that end up in the record.
    hourly: Vec<Value>,
    daily: Vec<Value>,
    #[serde(default)]
    alerts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    dt: i64,
    temp: f64,
    feels_like: f64,
    humidity: Number,
    uvi: Number,
    wind_speed: f64,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct RawHourly {
    dt: i64,
    temp: f64,
    weather: Vec<Condition>,
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct RawDailyTemp {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    dt: i64,
    temp: RawDailyTemp,
    weather: Vec<Condition>,
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct RawAlert {
    description: String,
}

/// Normalize a raw provider response.
///
/// Hourly and daily lists are cut to exactly [`HOURLY_ENTRIES`] and
/// [`DAILY_ENTRIES`]; shorter lists are rejected.
pub fn normalize(raw: &Value) -> Result<WeatherRecord> {
    for key in REQUIRED_KEYS {
        if raw.get(key).is_none() {
            return Err(Error::MalformedResponse(format!("missing '{key}'")));
        }
    }

    let parsed = RawWeatherResponse::deserialize(raw)
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    ensure_len("hourly", parsed.hourly.len(), HOURLY_ENTRIES)?;
    ensure_len("daily", parsed.daily.len(), DAILY_ENTRIES)?;

    let tz: Tz = parsed
        .timezone
        .parse()
        .map_err(|_| Error::MalformedResponse(format!("unknown timezone '{}'", parsed.timezone)))?;

    let current = &parsed.current;
    let current = CurrentWeather {
        time: local_time(current.dt, tz, CURRENT_TIME_FORMAT)?,
        temp: DualUnitValue::temperature(current.temp),
        weather_conditions: conditions(&current.weather)?,
        feels_like: DualUnitValue::temperature(current.feels_like),
        humidity: format!("{} %", current.humidity),
        uv: current.uvi.to_string(),
        windspeed: DualUnitValue::speed(current.wind_speed),
    };

    let hourly = parsed
        .hourly
        .iter()
        .take(HOURLY_ENTRIES)
        .map(|hour| {
            let hour: RawHourly = entry("hourly", hour)?;
            Ok(HourlyEntry {
                time: local_time(hour.dt, tz, HOURLY_TIME_FORMAT)?,
                temp: DualUnitValue::temperature(hour.temp),
                weather_conditions: conditions(&hour.weather)?,
                chance_of_rain: rain_chance(hour.pop),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let daily = parsed
        .daily
        .iter()
        .take(DAILY_ENTRIES)
        .map(|day| {
            let day: RawDaily = entry("daily", day)?;
            Ok(DailyEntry {
                time: local_time(day.dt, tz, DAILY_TIME_FORMAT)?,
                min_temp: DualUnitValue::temperature(day.temp.min),
                max_temp: DualUnitValue::temperature(day.temp.max),
                weather_conditions: conditions(&day.weather)?,
                chance_of_rain: rain_chance(day.pop),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Only the first alert is published.
    let alert = match parsed.alerts.first() {
        Some(first) => entry::<RawAlert>("alerts", first)?.description,
        None => NO_ALERTS.to_string(),
    };

    Ok(WeatherRecord { current, hourly, daily, alert })
}

fn ensure_len(section: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::InsufficientData { section, expected, actual });
    }
    Ok(())
}

fn entry<T: DeserializeOwned>(section: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::MalformedResponse(format!("{section} entry: {e}")))
}

fn conditions(weather: &[Condition]) -> Result<Vec<Condition>> {
    if weather.is_empty() {
        return Err(Error::MalformedResponse("empty 'weather' list".into()));
    }
    Ok(weather.to_vec())
}

/// Decode `ts` as machine-local time, then express it in `tz`.
fn local_time(ts: i64, tz: Tz, format: &str) -> Result<String> {
    let local = Local
        .timestamp_opt(ts, 0)
        .single()
        .ok_or_else(|| Error::MalformedResponse(format!("invalid timestamp {ts}")))?;

    Ok(local.with_timezone(&tz).format(format).to_string())
}
