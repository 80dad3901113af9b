//! Client for the AQI prediction service.

use async_trait::async_trait;
use ecoroute_core::{AqiForecastProvider, Coordinate, ProviderError};
use reqwest::Client;
use serde_json::Value;

use crate::http::{read_json, transport, trim_base};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }
}

#[async_trait]
impl AqiForecastProvider for PredictionClient {
    async fn forecast(&self, at: Coordinate) -> Result<Value, ProviderError> {
        let url = format!("{}/predict_aqi_series", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("lat", at.lat.to_string()), ("lon", at.lon.to_string())])
            .send()
            .await
            .map_err(transport)?;

        read_json(response).await
    }
}
