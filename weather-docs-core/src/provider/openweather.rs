use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{Error, Result, model::Coordinates};

use super::{WeatherProvider, read_body};

pub const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// OpenWeather One Call 3.0 in metric units, without the minutely block.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_url(api_key: String, url: String) -> Self {
        Self {
            api_key,
            url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, coordinates: Coordinates) -> Result<serde_json::Value> {
        debug!(lat = coordinates.latitude, lon = coordinates.longitude, "requesting forecast");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("exclude", "minutely"),
                ("units", "metric"),
            ])
            .query(&[("lat", coordinates.latitude), ("lon", coordinates.longitude)])
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to send request to OpenWeather: {e}")))?;

        let body = read_body(res, "OpenWeather").await?;

        serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("OpenWeather JSON: {e}")))
    }
}
