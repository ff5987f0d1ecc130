//! Interaction core for an hours-of-service trip planner.
//!
//! Everything a driver-facing planning UI needs between the widgets and the
//! backends lives here: debounced location autocomplete with race-safe
//! result delivery ([`search`]), the trip form shell and its single planning
//! request ([`planner`]), 24-hour duty-timeline layout ([`timeline`]),
//! stop-category filtering ([`stops`]), bounding-box and polyline transforms
//! for the map ([`map`]), and fullscreen handling across vendor-prefixed
//! hosts ([`fullscreen`]). The actual rendering surfaces stay in the
//! embedding shell behind the [`map::MapViewport`] and
//! [`fullscreen::FullscreenHost`] traits.

pub mod api;
pub mod events;
pub mod fullscreen;
pub mod map;
pub mod models;
pub mod planner;
pub mod search;
pub mod stops;
pub mod timeline;
pub mod utils;

pub use api::{ApiConfig, ApiError};
pub use models::{LatLng, LonLat, TripPlan};
pub use planner::PlannerController;
pub use search::SearchController;
