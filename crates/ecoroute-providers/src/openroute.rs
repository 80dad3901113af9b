//! OpenRouteService directions client.
//!
//! ORS only routes between coordinates and emits GeoJSON `[lon, lat]`
//! pairs, which are swapped to the internal `(lat, lon)` order here.

use async_trait::async_trait;
use ecoroute_core::{Coordinate, DirectionsProvider, Polyline, ProviderError, ProviderRoute, Waypoint};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http::{require_key, transport, trim_base};

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_PROFILE: &str = "driving-car";

const ALTERNATIVE_TARGET_COUNT: u32 = 3;

pub struct OpenRouteServiceClient {
    client: Client,
    base_url: String,
    api_key: String,
    profile: String,
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
    alternative_routes: AlternativeRoutes,
}

#[derive(Debug, Serialize)]
struct AlternativeRoutes {
    target_count: u32,
    share_factor: f64,
    weight_factor: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Option<FeatureProperties>,
    geometry: Option<LineGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    summary: Option<RouteSummary>,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message { message: String },
    Text(String),
}

impl OpenRouteServiceClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            api_key: api_key.into(),
            profile: profile.into(),
        }
    }
}

fn lon_lat(waypoint: &Waypoint) -> Result<[f64; 2], ProviderError> {
    waypoint
        .coordinate()
        .map(|c| [c.lon, c.lat])
        .ok_or_else(|| {
            ProviderError::Configuration(format!(
                "openrouteservice needs coordinates, got place '{}'",
                waypoint
            ))
        })
}

pub(crate) fn parse_routes(payload: FeatureCollection) -> Vec<ProviderRoute> {
    payload
        .features
        .into_iter()
        .map(|feature| {
            let summary = feature.properties.and_then(|props| props.summary);
            let polyline = feature.geometry.map(|geometry| {
                geometry
                    .coordinates
                    .iter()
                    .filter(|pair| pair.len() >= 2)
                    .filter_map(|pair| Coordinate::from_lon_lat([pair[0], pair[1]]))
                    .collect::<Polyline>()
            });
            ProviderRoute {
                duration_s: summary.as_ref().and_then(|s| s.duration),
                distance_m: summary.as_ref().and_then(|s| s.distance),
                polyline,
                encoded_polyline: None,
                summary: None,
            }
        })
        .collect()
}

#[async_trait]
impl DirectionsProvider for OpenRouteServiceClient {
    async fn directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<Vec<ProviderRoute>, ProviderError> {
        require_key("ORS_API_KEY", &self.api_key)?;
        let body = DirectionsRequest {
            coordinates: vec![lon_lat(origin)?, lon_lat(destination)?],
            alternative_routes: AlternativeRoutes {
                target_count: ALTERNATIVE_TARGET_COUNT,
                share_factor: 0.6,
                weight_factor: 1.4,
            },
        };
        let url = format!("{}/v2/directions/{}/geojson", self.base_url, self.profile);
        let response = self
            .client
            .post(url)
            .header("Authorization", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(match detail {
                Some(ErrorDetail::Message { message }) | Some(ErrorDetail::Text(message)) => {
                    ProviderError::Upstream(message)
                }
                None => ProviderError::Status(status.as_u16()),
            });
        }

        let payload: FeatureCollection = response.json().await.map_err(transport)?;
        let routes = parse_routes(payload);
        tracing::debug!("OpenRouteService returned {} routes", routes.len());
        Ok(routes)
    }

    fn accepts_place_names(&self) -> bool {
        false
    }
}
