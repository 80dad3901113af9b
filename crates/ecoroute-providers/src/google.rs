//! Google Directions API client.

use async_trait::async_trait;
use ecoroute_core::{DirectionsProvider, ProviderError, ProviderRoute, Waypoint};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{read_json, require_key, transport, trim_base};
use crate::polyline::{decode, GOOGLE_PRECISION};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Client for `maps/api/directions/json` with alternatives enabled.
pub struct GoogleDirectionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<GoogleRoute>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    summary: Option<String>,
    #[serde(default)]
    legs: Vec<GoogleLeg>,
    overview_polyline: Option<OverviewPolyline>,
}

#[derive(Debug, Deserialize)]
struct GoogleLeg {
    duration: Option<TextValue>,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

impl GoogleDirectionsClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            api_key: api_key.into(),
        }
    }
}

/// Normalize a directions payload. Google returns `[lat, lng]` already, so
/// only the overview polyline needs decoding.
pub(crate) fn parse_directions(
    payload: DirectionsResponse,
) -> Result<Vec<ProviderRoute>, ProviderError> {
    match payload.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Ok(Vec::new()),
        _ => {
            return Err(ProviderError::Upstream(
                payload.error_message.unwrap_or(payload.status),
            ))
        }
    }

    Ok(payload.routes.into_iter().map(to_provider_route).collect())
}

fn to_provider_route(route: GoogleRoute) -> ProviderRoute {
    let leg = route.legs.into_iter().next();
    let encoded = route.overview_polyline.map(|overview| overview.points);
    let polyline = encoded
        .as_deref()
        .and_then(|points| match decode(points, GOOGLE_PRECISION) {
            Ok(polyline) => Some(polyline),
            Err(err) => {
                tracing::warn!("Discarding undecodable overview polyline: {}", err);
                None
            }
        });

    ProviderRoute {
        duration_s: leg.as_ref().and_then(|leg| leg.duration.as_ref()).map(|d| d.value),
        distance_m: leg.as_ref().and_then(|leg| leg.distance.as_ref()).map(|d| d.value),
        polyline,
        encoded_polyline: encoded,
        summary: route.summary,
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<Vec<ProviderRoute>, ProviderError> {
        require_key("GOOGLE_API_KEY", &self.api_key)?;
        let url = format!("{}/maps/api/directions/json", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("alternatives", "true".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let payload: DirectionsResponse = read_json(response).await?;
        let routes = parse_directions(payload)?;
        tracing::debug!("Google returned {} routes", routes.len());
        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<ProviderRoute>, ProviderError> {
        parse_directions(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn reads_first_leg_and_decodes_polyline() {
        let routes = parse(
            r#"{
                "status": "OK",
                "routes": [
                    {
                        "summary": "NH48",
                        "legs": [{
                            "duration": {"text": "10 mins", "value": 600},
                            "distance": {"text": "5.0 km", "value": 5000},
                            "steps": []
                        }],
                        "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"}
                    },
                    {
                        "summary": "",
                        "legs": [{
                            "duration": {"text": "15 mins", "value": 900},
                            "distance": {"text": "4.0 km", "value": 4000}
                        }],
                        "overview_polyline": {"points": "_p~iF~ps|U"}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].duration_s, Some(600.0));
        assert_eq!(routes[0].distance_m, Some(5000.0));
        assert_eq!(routes[0].summary.as_deref(), Some("NH48"));
        assert_eq!(routes[0].polyline.as_ref().map(|p| p.len()), Some(3));
        assert_eq!(
            routes[0].encoded_polyline.as_deref(),
            Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@")
        );
        assert_eq!(routes[1].polyline.as_ref().map(|p| p.len()), Some(1));
    }

    #[test]
    fn missing_leg_fields_stay_absent() {
        let routes = parse(r#"{"status": "OK", "routes": [{"legs": []}]}"#).unwrap();
        assert_eq!(routes[0].duration_s, None);
        assert_eq!(routes[0].polyline, None);
    }

    #[test]
    fn broken_polyline_is_dropped_but_route_kept() {
        let routes = parse(
            r#"{"status": "OK", "routes": [{"legs": [], "overview_polyline": {"points": "_p~"}}]}"#,
        )
        .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].polyline, None);
    }

    #[test]
    fn zero_results_is_empty() {
        assert!(parse(r#"{"status": "ZERO_RESULTS", "routes": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn error_status_surfaces_message() {
        let err = parse(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Upstream("The provided API key is invalid.".to_string())
        );

        let err = parse(r#"{"status": "OVER_QUERY_LIMIT"}"#).unwrap_err();
        assert_eq!(err, ProviderError::Upstream("OVER_QUERY_LIMIT".to_string()));
    }
}
