//! Route finding: resolve endpoints, fetch directions, evaluate and label.

use ecoroute_core::{evaluate, label, CandidateRoute, EvaluationError, ProviderError, Waypoint};
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum RouteFinderError {
    #[error("Error geocoding location")]
    Geocoding(#[source] ProviderError),
    #[error("Error geocoding location")]
    LocationNotFound(String),
    #[error("Error fetching directions")]
    Directions(#[source] ProviderError),
    #[error("No routes found")]
    NoRoutes,
}

impl RouteFinderError {
    /// Detail safe to echo back to the client.
    pub fn detail(&self) -> String {
        match self {
            RouteFinderError::Geocoding(err) | RouteFinderError::Directions(err) => err.to_string(),
            RouteFinderError::LocationNotFound(place) => format!("no match for '{}'", place),
            RouteFinderError::NoRoutes => String::new(),
        }
    }
}

/// Find, score and label routes between two free-text endpoints.
pub async fn find_routes(
    state: &AppState,
    start: &str,
    end: &str,
) -> Result<Vec<CandidateRoute>, RouteFinderError> {
    let providers = state.providers();
    let (origin, destination) = tokio::try_join!(
        resolve_waypoint(state, start),
        resolve_waypoint(state, end)
    )?;

    let raw_routes = providers
        .directions
        .directions(&origin, &destination)
        .await
        .map_err(RouteFinderError::Directions)?;
    tracing::info!(
        "Directions {} -> {}: {} candidate routes",
        origin,
        destination,
        raw_routes.len()
    );

    let routes = evaluate(providers.aqi.as_ref(), raw_routes)
        .await
        .map_err(|EvaluationError::Empty| RouteFinderError::NoRoutes)?;

    Ok(label(routes))
}

/// Parse `"lat,lon"` text, and geocode place names when the directions
/// provider cannot take them directly.
async fn resolve_waypoint(state: &AppState, text: &str) -> Result<Waypoint, RouteFinderError> {
    let place = match Waypoint::parse(text) {
        Waypoint::Place(place) if !state.providers().directions.accepts_place_names() => place,
        waypoint => return Ok(waypoint),
    };

    match state.providers().geocoder.geocode(&place).await {
        Ok(Some(coordinate)) => {
            tracing::debug!("Geocoded '{}' to {}", place, coordinate);
            Ok(Waypoint::Coordinate(coordinate))
        }
        Ok(None) => Err(RouteFinderError::LocationNotFound(place)),
        Err(err) => {
            tracing::warn!("Geocoding '{}' failed: {}", place, err);
            Err(RouteFinderError::Geocoding(err))
        }
    }
}
