//! Autocomplete client for the geocoding provider.

use async_trait::async_trait;

use crate::models::FeatureCollection;

use super::{ApiConfig, ApiError};

/// Queries shorter than this are never sent to the provider.
pub const MIN_QUERY_LEN: usize = 2;

/// Seam for the geocoding provider; the search controller only knows this.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn autocomplete(&self, text: &str) -> Result<FeatureCollection, ApiError>;
}

pub struct OrsGeocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsGeocoder {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.geocode_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl Geocoder for OrsGeocoder {
    async fn autocomplete(&self, text: &str) -> Result<FeatureCollection, ApiError> {
        let response = self
            .http
            .get(format!("{}/geocode/autocomplete", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
