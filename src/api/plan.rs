//! Client for the single trip-planning request.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{LonLat, PlanResponse};

use super::{ApiConfig, ApiError};

/// Body of the planning POST, coordinates in wire order.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
    pub current_location: LonLat,
    pub pickup_location: LonLat,
    pub dropoff_location: LonLat,
    pub current_cycle_used: f64,
}

/// Seam for the planning backend; the planner shell only knows this.
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError>;
}

pub struct PlanClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlanClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlanService for PlanClient {
    async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/report/", self.base_url))
            .json(request)
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
