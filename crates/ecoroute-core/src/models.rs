//! Core data models for route evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A WGS84 position. Internal order is always (lat, lon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }

    /// Build a coordinate from a `[lon, lat]` pair (GeoJSON order).
    pub fn from_lon_lat(pair: [f64; 2]) -> Option<Self> {
        Self::new(pair[1], pair[0])
    }

    /// Parse `"lat,lon"` text. Whitespace around either number is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lon) = text.split_once(',')?;
        let lat = lat.trim().parse().ok()?;
        let lon = lon.trim().parse().ok()?;
        Self::new(lat, lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Ordered path of a route as produced by a directions provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline(Vec<Coordinate>);

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    pub fn into_inner(self) -> Vec<Coordinate> {
        self.0
    }
}

impl Deref for Polyline {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One queried point along a route and its pollution reading, if the
/// provider produced one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiSample {
    pub coordinate: Coordinate,
    pub reading: Option<f64>,
}

/// Route as delivered by a directions provider, before validation.
///
/// Every field is optional because provider payloads are. The evaluator
/// drops routes missing duration, distance or path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderRoute {
    pub duration_s: Option<f64>,
    pub distance_m: Option<f64>,
    pub polyline: Option<Polyline>,
    /// Provider's encoded overview polyline, passed through to clients.
    pub encoded_polyline: Option<String>,
    pub summary: Option<String>,
}

/// Human-readable route label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteLabel {
    #[serde(rename = "Fastest Route")]
    Fastest,
    #[serde(rename = "Cleanest Air Route")]
    CleanestAir,
    #[serde(rename = "Balanced Route")]
    Balanced,
    #[default]
    #[serde(rename = "Alternative Route")]
    Alternative,
}

impl RouteLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteLabel::Fastest => "Fastest Route",
            RouteLabel::CleanestAir => "Cleanest Air Route",
            RouteLabel::Balanced => "Balanced Route",
            RouteLabel::Alternative => "Alternative Route",
        }
    }
}

impl fmt::Display for RouteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider route enriched with its AQI aggregate.
///
/// Only `name` changes after construction; the ranker owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    pub name: RouteLabel,
    #[serde(rename = "eta")]
    pub eta_minutes: u32,
    #[serde(rename = "distance")]
    pub distance_km: u32,
    /// Rounded mean of the valid samples; `None` when every sample failed.
    pub aqi: Option<u32>,
    pub summary: String,
    #[serde(rename = "coordinates")]
    pub polyline: Polyline,
    #[serde(
        rename = "overview_polyline",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub encoded_polyline: Option<String>,
}
