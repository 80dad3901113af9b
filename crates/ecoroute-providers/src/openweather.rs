//! OpenWeather air-pollution and geocoding client.

use async_trait::async_trait;
use ecoroute_core::{AqiProvider, Coordinate, Geocoder, ProviderError};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{read_json, require_key, transport, trim_base};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for OpenWeather's `air_pollution` and `geo/direct` endpoints.
///
/// The pollution index is OpenWeather's 1 (good) to 5 (very poor) scale.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionResponse {
    list: Option<Vec<AirPollutionEntry>>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: Option<AirPollutionMain>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionMain {
    aqi: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoHit {
    lat: f64,
    lon: f64,
}

impl OpenWeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            api_key: api_key.into(),
        }
    }
}

pub(crate) fn parse_air_pollution(payload: AirPollutionResponse) -> Result<f64, ProviderError> {
    payload
        .list
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|entry| entry.main)
        .and_then(|main| main.aqi)
        .ok_or(ProviderError::NoData)
}

pub(crate) fn parse_geocode(hits: Vec<GeoHit>) -> Option<Coordinate> {
    hits.into_iter()
        .next()
        .and_then(|hit| Coordinate::new(hit.lat, hit.lon))
}

#[async_trait]
impl AqiProvider for OpenWeatherClient {
    async fn air_quality(&self, at: Coordinate) -> Result<f64, ProviderError> {
        require_key("OPENWEATHER_API_KEY", &self.api_key)?;
        let url = format!("{}/data/2.5/air_pollution", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", at.lat.to_string()),
                ("lon", at.lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let payload: AirPollutionResponse = read_json(response).await?;
        parse_air_pollution(payload)
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, ProviderError> {
        require_key("OPENWEATHER_API_KEY", &self.api_key)?;
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", place.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let hits: Vec<GeoHit> = read_json(response).await?;
        let found = parse_geocode(hits);
        if found.is_none() {
            tracing::debug!("Geocoder found no match for '{}'", place);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn reads_first_list_entry() {
        let payload: AirPollutionResponse = serde_json::from_str(
            r#"{
                "coord": {"lon": 73.85, "lat": 18.52},
                "list": [
                    {"main": {"aqi": 3}, "components": {"pm2_5": 31.4}, "dt": 1700000000},
                    {"main": {"aqi": 5}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(parse_air_pollution(payload), Ok(3.0));
    }

    #[test]
    fn missing_or_empty_list_is_no_data() {
        let missing: AirPollutionResponse = serde_json::from_str(r#"{"cod": 401}"#).unwrap();
        assert_eq!(parse_air_pollution(missing), Err(ProviderError::NoData));

        let empty: AirPollutionResponse = serde_json::from_str(r#"{"list": []}"#).unwrap();
        assert_eq!(parse_air_pollution(empty), Err(ProviderError::NoData));

        let no_aqi: AirPollutionResponse =
            serde_json::from_str(r#"{"list": [{"main": {}}]}"#).unwrap();
        assert_eq!(parse_air_pollution(no_aqi), Err(ProviderError::NoData));
    }

    #[test]
    fn geocode_takes_first_hit() {
        let hits: Vec<GeoHit> = serde_json::from_str(
            r#"[{"name": "Pune", "lat": 18.5204, "lon": 73.8567, "country": "IN"}]"#,
        )
        .unwrap();
        assert_eq!(
            parse_geocode(hits),
            Some(Coordinate { lat: 18.5204, lon: 73.8567 })
        );
        assert_eq!(parse_geocode(Vec::new()), None);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = OpenWeatherClient::new(
            crate::build_client(Duration::from_secs(1)).unwrap(),
            DEFAULT_BASE_URL,
            "",
        );
        let result = client.air_quality(Coordinate { lat: 0.0, lon: 0.0 }).await;
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[tokio::test]
    async fn silent_upstream_times_out() {
        // Accepts connections but never writes a response.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = OpenWeatherClient::new(
            crate::build_client(Duration::from_millis(200)).unwrap(),
            format!("http://{}", addr),
            "test-key",
        );
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.air_quality(Coordinate { lat: 18.52, lon: 73.85 }),
        )
        .await
        .expect("client timeout should fire first");

        assert_eq!(result, Err(ProviderError::Timeout));
        server.abort();
    }
}
