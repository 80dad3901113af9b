//! External collaborators consumed by the pipeline.
//!
//! Implementations live in `ecoroute-providers`; tests use in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;
use crate::models::{Coordinate, ProviderRoute};

/// Pollution index at a single point. Lower is cleaner.
#[async_trait]
pub trait AqiProvider: Send + Sync {
    async fn air_quality(&self, at: Coordinate) -> Result<f64, ProviderError>;
}

/// Candidate routes between two waypoints, in provider order.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<Vec<ProviderRoute>, ProviderError>;

    /// Whether free-text places can be passed through as-is. When false,
    /// callers must geocode [`Waypoint::Place`] values first.
    fn accepts_place_names(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a place name. `Ok(None)` means the provider found no match.
    async fn geocode(&self, place: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Predicted AQI series for a location, passed through untouched.
#[async_trait]
pub trait AqiForecastProvider: Send + Sync {
    async fn forecast(&self, at: Coordinate) -> Result<Value, ProviderError>;
}

/// Start or end of a route request.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    Place(String),
    Coordinate(Coordinate),
}

impl Waypoint {
    /// `"lat,lon"` text becomes a coordinate, anything else a place name.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match Coordinate::parse(text) {
            Some(coordinate) => Waypoint::Coordinate(coordinate),
            None => Waypoint::Place(text.to_string()),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Waypoint::Coordinate(coordinate) => Some(*coordinate),
            Waypoint::Place(_) => None,
        }
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Waypoint::Place(place) => f.write_str(place),
            Waypoint::Coordinate(coordinate) => coordinate.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_parse_distinguishes_coordinates() {
        assert_eq!(
            Waypoint::parse("18.52,73.85"),
            Waypoint::Coordinate(Coordinate { lat: 18.52, lon: 73.85 })
        );
        assert_eq!(
            Waypoint::parse("  Kondhwa, Pune "),
            Waypoint::Place("Kondhwa, Pune".to_string())
        );
    }
}
