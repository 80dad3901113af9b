//! EcoRoute core - route evaluation by travel time and air quality.
//!
//! The pipeline runs once per route request:
//! raw provider routes -> [`evaluator`] (samples AQI along each path through
//! [`sampler`]) -> [`ranker`] (assigns human-readable labels).

pub mod error;
pub mod evaluator;
pub mod health;
pub mod models;
pub mod provider;
pub mod ranker;
pub mod sampler;

pub use error::{EvaluationError, ProviderError};
pub use evaluator::{evaluate, extract_route, MAX_EVALUATED_ROUTES};
pub use health::{aqi_label, health_tips, to_us_scale};
pub use models::{AqiSample, CandidateRoute, Coordinate, Polyline, ProviderRoute, RouteLabel};
pub use provider::{AqiForecastProvider, AqiProvider, DirectionsProvider, Geocoder, Waypoint};
pub use ranker::{label, label_routes, AQI_WEIGHT, ETA_WEIGHT, MISSING_AQI_SCORE};
pub use sampler::{aggregate, sample_indices, sample_route, sample_route_aqi};
