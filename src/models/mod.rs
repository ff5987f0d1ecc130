//! Wire and display data types for the trip planner.
//!
//! The planning backend and the geocoding provider both speak GeoJSON-style
//! coordinate order: `[longitude, latitude]`. The map layer wants the
//! opposite order. The two conventions get distinct types here (`LonLat` for
//! the wire, [`LatLng`] for display) so a pair can only cross the boundary
//! through an explicit conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-order coordinate pair: `[longitude, latitude]`.
pub type LonLat = [f64; 2];

/// Display-order coordinate, the form map viewports consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts a wire-order pair into display order.
    pub fn from_wire(pair: LonLat) -> Self {
        Self {
            lat: pair[1],
            lng: pair[0],
        }
    }
}

/// The closed set of stop categories the route service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Break,
    Rest,
    Service,
    Fuel,
}

impl StopKind {
    pub const ALL: [StopKind; 4] = [
        StopKind::Break,
        StopKind::Rest,
        StopKind::Service,
        StopKind::Fuel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StopKind::Break => "break",
            StopKind::Rest => "rest",
            StopKind::Service => "service",
            StopKind::Fuel => "fuel",
        }
    }
}

/// Duty status of a single logged segment. The backend currently emits the
/// three known statuses; anything else deserializes into `Other` and renders
/// with the neutral fallback styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DutyStatus {
    Drive,
    OnDuty,
    OffDuty,
    Other(String),
}

impl From<String> for DutyStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "drive" => DutyStatus::Drive,
            "on_duty" => DutyStatus::OnDuty,
            "off_duty" => DutyStatus::OffDuty,
            _ => DutyStatus::Other(value),
        }
    }
}

impl From<DutyStatus> for String {
    fn from(value: DutyStatus) -> Self {
        match value {
            DutyStatus::Drive => "drive".to_string(),
            DutyStatus::OnDuty => "on_duty".to_string(),
            DutyStatus::OffDuty => "off_duty".to_string(),
            DutyStatus::Other(s) => s,
        }
    }
}

impl DutyStatus {
    /// Uppercased display label, e.g. `ON_DUTY`.
    pub fn display_label(&self) -> String {
        match self {
            DutyStatus::Drive => "DRIVE".to_string(),
            DutyStatus::OnDuty => "ON_DUTY".to_string(),
            DutyStatus::OffDuty => "OFF_DUTY".to_string(),
            DutyStatus::Other(s) => s.to_uppercase(),
        }
    }
}

/// A suggested pause along the route, as received from the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireStop {
    #[serde(rename = "type")]
    pub kind: StopKind,
    pub duration_seconds: f64,
    pub reason: String,
    /// Wire order: `[lon, lat]`.
    pub location: LonLat,
    pub time_from_start_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A stop in display form. Immutable once produced by normalization.
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    pub kind: StopKind,
    pub duration_seconds: f64,
    pub reason: String,
    pub location: LatLng,
    pub time_from_start_seconds: f64,
    pub address: Option<String>,
}

/// Kinds of per-leg route events (`hos_events` in the payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegEventKind {
    Break,
    Rest,
    Service,
    Drive,
}

/// One entry of the route-level event list the compliance engine produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEvent {
    #[serde(rename = "type")]
    pub kind: LegEventKind,
    pub duration_seconds: f64,
    #[serde(default)]
    pub distance_meters: Option<f64>,
    pub segment_index: i64,
    pub step_index: i64,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub location: Option<LonLat>,
    #[serde(default)]
    pub reason: Option<String>,
    pub time_from_start_seconds: f64,
}

/// A single timed duty segment within a reporting day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyEvent {
    #[serde(rename = "event_type")]
    pub status: DutyStatus,
    #[serde(default)]
    pub remark: Option<String>,
    pub time_from_start_seconds: f64,
    pub duration_seconds: f64,
}

/// One 24-hour reporting period: a start timestamp, its events, and the
/// aggregate totals the backend computed. Totals are taken as given; the
/// timeline layer never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    /// ISO-8601 timestamp string. Kept raw so a malformed value degrades to
    /// the raw string at render time instead of failing the whole payload.
    pub start_time: String,
    pub log_events: Vec<DutyEvent>,
    pub total_driving: f64,
    pub total_off_duty: f64,
    pub total_on_duty: f64,
}

impl DailyLog {
    /// Parses the day start, if well formed.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start_time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Distance/duration/cycle figures for the whole itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub original_travel_seconds: f64,
    pub added_stop_seconds: f64,
    pub total_itinerary_seconds: f64,
    /// Meters.
    pub total_distance: f64,
    /// Seconds of the 70-hour cycle consumed by the end of the trip.
    pub cycles_used_end: f64,
    pub cycles_remaining: f64,
    #[serde(default)]
    pub notes: String,
}

/// Route-level aggregate inside the planning response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directions {
    pub bbox: Vec<f64>,
    pub stops: Vec<WireStop>,
    #[serde(default)]
    pub hos_events: Vec<RouteEvent>,
    #[serde(default)]
    pub itinerary_total_seconds: f64,
    pub hos_summary: RouteSummary,
    pub eld: Vec<DailyLog>,
}

/// The full planning response as it arrives from the backend, coordinates in
/// wire order. Converted into a [`TripPlan`] exactly once on receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub current_coords: LonLat,
    pub pickup_coords: LonLat,
    pub dropoff_coords: LonLat,
    pub directions: Directions,
    /// Encoded polyline of the route path.
    pub coordinates: String,
    pub current_cycle_used: f64,
}

/// The normalized, display-order plan the shell owns. Replaced wholesale on
/// every successful request.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub current: LatLng,
    pub pickup: LatLng,
    pub dropoff: LatLng,
    /// Encoded polyline, decoded lazily for the map contract.
    pub path: String,
    pub bbox: Vec<f64>,
    pub stops: Vec<Stop>,
    pub route_events: Vec<RouteEvent>,
    pub summary: RouteSummary,
    pub logs: Vec<DailyLog>,
    pub current_cycle_used: f64,
}

/// Geocoder response: a GeoJSON-style feature collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl GeoFeature {
    /// Human-readable label, falling back through `label`, then `name`.
    pub fn label(&self) -> &str {
        self.properties
            .label
            .as_deref()
            .or(self.properties.name.as_deref())
            .unwrap_or("Selected place")
    }

    /// Wire-order coordinates for point features.
    pub fn coords(&self) -> Option<LonLat> {
        let geometry = self.geometry.as_ref()?;
        if geometry.kind != "Point" || geometry.coordinates.len() < 2 {
            return None;
        }
        Some([geometry.coordinates[0], geometry.coordinates[1]])
    }

    /// `"lat, lon"` subtitle shown under the label in result lists.
    pub fn subtitle(&self) -> Option<String> {
        self.coords()
            .map(|c| format!("{:.4}, {:.4}", c[1], c[0]))
    }
}
