mod config;
mod error;
mod geocode;
mod plan;

pub use config::ApiConfig;
pub use error::ApiError;
pub use geocode::{Geocoder, OrsGeocoder, MIN_QUERY_LEN};
pub use plan::{PlanClient, PlanRequest, PlanService};
