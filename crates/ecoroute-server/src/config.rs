//! Server configuration from environment.

use std::env;
use std::time::Duration;

use ecoroute_providers::{google, openroute, openweather, prediction};

const DEFAULT_PROVIDER_TIMEOUT_S: u64 = 8;
const MAX_PROVIDER_TIMEOUT_S: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionsBackend {
    Google,
    OpenRoute,
}

impl DirectionsBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "openroute" | "openrouteservice" | "ors" => Some(Self::OpenRoute),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub directions_backend: DirectionsBackend,
    pub google_api_key: String,
    pub google_base_url: String,
    pub ors_api_key: String,
    pub ors_base_url: String,
    pub ors_profile: String,
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub prediction_url: String,
    /// Bound on every outbound provider call.
    pub provider_timeout_s: u64,
    /// Allowed browser origin; permissive CORS when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("ECOROUTE_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            directions_backend: env::var("DIRECTIONS_PROVIDER")
                .ok()
                .and_then(|s| DirectionsBackend::parse(&s))
                .unwrap_or(DirectionsBackend::Google),
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            google_base_url: env::var("GOOGLE_DIRECTIONS_URL")
                .unwrap_or_else(|_| google::DEFAULT_BASE_URL.to_string()),
            ors_api_key: env::var("ORS_API_KEY").unwrap_or_default(),
            ors_base_url: env::var("ORS_URL")
                .unwrap_or_else(|_| openroute::DEFAULT_BASE_URL.to_string()),
            ors_profile: env::var("ORS_PROFILE")
                .unwrap_or_else(|_| openroute::DEFAULT_PROFILE.to_string()),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            openweather_base_url: env::var("OPENWEATHER_URL")
                .unwrap_or_else(|_| openweather::DEFAULT_BASE_URL.to_string()),
            prediction_url: env::var("PREDICTION_SERVICE_URL")
                .unwrap_or_else(|_| prediction::DEFAULT_BASE_URL.to_string()),
            provider_timeout_s: env::var("PROVIDER_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_S)
                .clamp(1, MAX_PROVIDER_TIMEOUT_S),
            cors_origin: env::var("CORS_ORIGIN")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_s)
    }
}
