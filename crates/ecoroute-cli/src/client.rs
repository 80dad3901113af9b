//! HTTP client for the EcoRoute server.

use anyhow::{bail, Result};
use ecoroute_core::{aqi_label, CandidateRoute};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct RouteClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct RoutesRequest<'a> {
    start: &'a str,
    end: &'a str,
}

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    routes: Vec<CandidateRoute>,
}

impl RouteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Ask the server for labeled routes between two places or `"lat,lon"` pairs.
    pub async fn find_routes(&self, start: &str, end: &str) -> Result<Vec<CandidateRoute>> {
        let url = format!("{}/api/routes", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RoutesRequest { start, end })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body["message"].as_str().unwrap_or("request failed");
            match body["error"].as_str() {
                Some(error) => bail!("server returned {}: {} ({})", status, message, error),
                None => bail!("server returned {}: {}", status, message),
            }
        }

        let body: RoutesResponse = response.json().await?;
        Ok(body.routes)
    }
}

/// One-line description of a route for terminal output.
pub fn format_route(route: &CandidateRoute) -> String {
    let aqi = route
        .aqi
        .map(|aqi| format!("{} ({})", aqi, aqi_label(Some(aqi))))
        .unwrap_or_else(|| aqi_label(None).to_string());
    format!(
        "{:<20} {:>4} min {:>5} km  AQI {:<14} via {}",
        route.name.as_str(),
        route.eta_minutes,
        route.distance_km,
        aqi,
        route.summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_payload() {
        let body: RoutesResponse = serde_json::from_str(
            r#"{"routes": [{
                "name": "Cleanest Air Route",
                "eta": 15,
                "distance": 4,
                "aqi": 1,
                "aqi_label": "Good",
                "summary": "Ring Rd",
                "coordinates": [{"lat": 18.5, "lon": 73.8}]
            }]}"#,
        )
        .unwrap();

        let route = &body.routes[0];
        assert_eq!(route.eta_minutes, 15);
        assert_eq!(route.aqi, Some(1));
        assert_eq!(route.encoded_polyline, None);
        assert_eq!(
            format_route(route),
            "Cleanest Air Route     15 min     4 km  AQI 1 (Good)       via Ring Rd"
        );
    }

    #[test]
    fn missing_aqi_formats_as_na() {
        let body: RoutesResponse = serde_json::from_str(
            r#"{"routes": [{
                "name": "Fastest Route", "eta": 9, "distance": 3, "aqi": null,
                "summary": "Route", "coordinates": []
            }]}"#,
        )
        .unwrap();
        assert!(format_route(&body.routes[0]).contains("AQI N/A"));
    }
}
