//! City-level air-quality advice.

use ecoroute_core::{health_tips, to_us_scale, Coordinate};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub city: String,
    /// Approximate US AQI derived from the provider index.
    pub aqi: u32,
    pub coordinates: Coordinate,
    pub recommendations: Vec<&'static str>,
}

/// Geocode `city`, read the current pollution index and attach advice.
/// `None` when the city cannot be located or has no reading.
pub async fn recommend(state: &AppState, city: &str) -> Option<Recommendation> {
    let providers = state.providers();
    let coordinates = match providers.geocoder.geocode(city).await {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!("Geocoding '{}' failed: {}", city, err);
            return None;
        }
    };

    let index = match providers.aqi.air_quality(coordinates).await {
        Ok(value) if value.is_finite() && value >= 0.0 => value.round() as u32,
        Ok(value) => {
            tracing::warn!("Unusable AQI reading {} for '{}'", value, city);
            return None;
        }
        Err(err) => {
            tracing::warn!("AQI lookup for '{}' failed: {}", city, err);
            return None;
        }
    };

    let aqi = to_us_scale(index);
    Some(Recommendation {
        city: city.to_string(),
        aqi,
        coordinates,
        recommendations: health_tips(aqi).to_vec(),
    })
}
