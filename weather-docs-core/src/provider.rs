use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{Error, Result, model::Coordinates};

pub mod geonames;
pub mod openweather;

pub use geonames::GeonamesDirectory;
pub use openweather::OpenWeatherProvider;

/// Source of raw forecast documents.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, coordinates: Coordinates) -> Result<serde_json::Value>;
}

/// A city as listed by the geonames dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    pub name: String,
    pub ascii_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl City {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Lookup of cities to generate topics for.
#[async_trait]
pub trait CityDirectory: Send + Sync + Debug {
    /// Up to `limit` cities above `min_population`, most populous first.
    async fn largest(&self, limit: u32, min_population: u64) -> Result<Vec<City>>;

    /// Cities whose ASCII name matches exactly.
    async fn by_ascii_name(&self, ascii_name: &str) -> Result<Vec<City>>;
}

/// Read the body of `res`, failing with the status and a truncated body on
/// non-success responses.
pub(crate) async fn read_body(res: Response, what: &str) -> Result<String> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| Error::Transport(format!("Failed to read {what} response body: {e}")))?;

    if !status.is_success() {
        return Err(Error::Transport(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("{\"cod\":401}"), "{\"cod\":401}");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }

    #[test]
    fn city_deserializes_from_geonames_record() {
        let city: City = serde_json::from_value(serde_json::json!({
            "name": "Nürnberg",
            "ascii_name": "Nuernberg",
            "latitude": 49.45421,
            "longitude": 11.07752,
            "country_code": "DE",
            "population": 499_237,
            "timezone": "Europe/Berlin",
            "country": "Germany"
        }))
        .expect("valid record");

        assert_eq!(city.ascii_name, "Nuernberg");
        assert_eq!(city.coordinates(), Coordinates { latitude: 49.45421, longitude: 11.07752 });
    }
}
