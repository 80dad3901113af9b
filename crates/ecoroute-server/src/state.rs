//! Shared application state: configuration plus the injected provider clients.
//!
//! Nothing here is mutated after startup; every request works on its own
//! local data.

use std::sync::Arc;

use ecoroute_core::{AqiForecastProvider, AqiProvider, DirectionsProvider, Geocoder, ProviderError};
use ecoroute_providers::{
    build_client, GoogleDirectionsClient, OpenRouteServiceClient, OpenWeatherClient,
    PredictionClient,
};

use crate::config::{Config, DirectionsBackend};

/// External collaborators used by the handlers.
#[derive(Clone)]
pub struct Providers {
    pub directions: Arc<dyn DirectionsProvider>,
    pub aqi: Arc<dyn AqiProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub forecast: Arc<dyn AqiForecastProvider>,
}

pub struct AppState {
    config: Config,
    providers: Providers,
}

impl AppState {
    pub fn new(config: Config, providers: Providers) -> Self {
        Self { config, providers }
    }

    /// Wire the real HTTP clients described by `config`.
    pub fn from_config(config: Config) -> Result<Self, ProviderError> {
        let client = build_client(config.provider_timeout())?;

        let openweather = Arc::new(OpenWeatherClient::new(
            client.clone(),
            config.openweather_base_url.clone(),
            config.openweather_api_key.clone(),
        ));
        let directions: Arc<dyn DirectionsProvider> = match config.directions_backend {
            DirectionsBackend::Google => Arc::new(GoogleDirectionsClient::new(
                client.clone(),
                config.google_base_url.clone(),
                config.google_api_key.clone(),
            )),
            DirectionsBackend::OpenRoute => Arc::new(OpenRouteServiceClient::new(
                client.clone(),
                config.ors_base_url.clone(),
                config.ors_api_key.clone(),
                config.ors_profile.clone(),
            )),
        };
        let forecast = Arc::new(PredictionClient::new(client, config.prediction_url.clone()));

        let providers = Providers {
            directions,
            aqi: openweather.clone(),
            geocoder: openweather,
            forecast,
        };
        Ok(Self::new(config, providers))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }
}
