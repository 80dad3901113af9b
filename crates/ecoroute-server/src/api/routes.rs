//! REST API routes.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use ecoroute_core::{aqi_label, CandidateRoute, Coordinate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::request_id::ensure_request_id;
use crate::health_advisor::{self, Recommendation};
use crate::route_finder::find_routes;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(|| async { "PING" }))
        .route("/health", get(|| async { "OK" }))
        .route("/api/routes", post(routes_handler))
        .route("/api/aqi/predictions", get(aqi_predictions))
        .route("/api/health/recommend", post(health_recommend))
        .layer(middleware::from_fn(ensure_request_id))
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct RoutesRequest {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteView>,
}

/// A labeled route as sent to clients.
#[derive(Debug, Serialize)]
pub struct RouteView {
    #[serde(flatten)]
    pub route: CandidateRoute,
    pub aqi_label: &'static str,
}

impl From<CandidateRoute> for RouteView {
    fn from(route: CandidateRoute) -> Self {
        let aqi_label = aqi_label(route.aqi);
        Self { route, aqi_label }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub city: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// === Handlers ===

/// Rank candidate routes between `start` and `end` by ETA and air quality.
async fn routes_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoutesRequest>, JsonRejection>,
) -> Result<Json<RoutesResponse>, ApiError> {
    let (start, end) = match payload {
        Ok(Json(req)) => (non_blank(req.start), non_blank(req.end)),
        Err(rejection) => {
            tracing::debug!("Rejected route request body: {}", rejection);
            (None, None)
        }
    };
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ApiError::bad_request("Start and End required"));
    };

    let routes = find_routes(&state, &start, &end).await.map_err(|err| {
        tracing::error!("Route request '{}' -> '{}' failed: {:?}", start, end, err);
        ApiError::from(err)
    })?;

    Ok(Json(RoutesResponse {
        routes: routes.into_iter().map(RouteView::from).collect(),
    }))
}

/// Proxy the AQI prediction service for a location.
async fn aqi_predictions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<Value>, ApiError> {
    let at = match (non_blank(query.lat), non_blank(query.lon)) {
        (Some(lat), Some(lon)) => match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Coordinate::new(lat, lon),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| ApiError::bad_request("Latitude and longitude required"))?;

    state
        .providers()
        .forecast
        .forecast(at)
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!("AQI prediction for {} failed: {}", at, err);
            ApiError::internal("Error fetching AQI predictions")
        })
}

/// Health advice for the current air quality in a city.
async fn health_recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let city = payload
        .ok()
        .and_then(|Json(req)| non_blank(req.city))
        .ok_or_else(|| ApiError::bad_request("City name is required."))?;

    health_advisor::recommend(&state, &city)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Could not fetch AQI for {}.", city)))
}
