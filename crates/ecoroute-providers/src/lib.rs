//! EcoRoute providers - HTTP clients for the external services the route
//! pipeline depends on.
//!
//! Each client implements one or more of the `ecoroute-core` provider traits
//! and normalizes provider payloads into validated core types.

pub mod google;
pub mod http;
pub mod openroute;
pub mod openweather;
pub mod polyline;
pub mod prediction;

pub use google::GoogleDirectionsClient;
pub use http::build_client;
pub use openroute::OpenRouteServiceClient;
pub use openweather::OpenWeatherClient;
pub use prediction::PredictionClient;
