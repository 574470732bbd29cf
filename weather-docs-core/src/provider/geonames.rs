use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

use super::{City, CityDirectory, read_body};

pub const GEONAMES_URL: &str = "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets/geonames-all-cities-with-a-population-500/records";

/// The dataset API refuses larger pages.
pub const MAX_LIMIT: u32 = 100;

const SELECT: &str = "name, ascii_name, latitude, longitude, country_code, population, timezone, country";

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    results: Vec<City>,
}

/// Opendatasoft's geonames "cities with a population over 500" dataset.
#[derive(Debug, Clone)]
pub struct GeonamesDirectory {
    url: String,
    http: Client,
}

impl GeonamesDirectory {
    pub fn with_url(url: String) -> Self {
        Self { url, http: Client::new() }
    }

    async fn query(&self, filter: &str, limit: u32) -> Result<Vec<City>> {
        debug!(filter, limit, "querying geonames");

        let limit = limit.min(MAX_LIMIT).to_string();
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("select", SELECT),
                ("where", filter),
                ("order_by", "population desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to send request to geonames: {e}")))?;

        let body = read_body(res, "Geonames").await?;
        let parsed: RecordsResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("geonames JSON: {e}")))?;

        Ok(parsed.results)
    }
}

#[async_trait]
impl CityDirectory for GeonamesDirectory {
    async fn largest(&self, limit: u32, min_population: u64) -> Result<Vec<City>> {
        self.query(&format!("population > {min_population}"), limit).await
    }

    async fn by_ascii_name(&self, ascii_name: &str) -> Result<Vec<City>> {
        let quoted = ascii_name.replace('\'', "\\'");
        self.query(&format!("ascii_name='{quoted}'"), MAX_LIMIT).await
    }
}
