use std::env;

/// Endpoints and credentials for the two external services. Environment
/// variables override the defaults so a dev instance can point elsewhere.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Planning backend base URL.
    pub base_url: String,
    /// Geocoding provider base URL.
    pub geocode_base_url: String,
    /// Geocoding provider API key.
    pub api_key: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("TRIPLOG_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            geocode_base_url: env::var("TRIPLOG_GEOCODE_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            api_key: env::var("TRIPLOG_ORS_API_KEY").unwrap_or_default(),
        }
    }
}
