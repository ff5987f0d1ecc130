//! Turns a normalized plan into what the result screen shows: the decoded
//! route path, map markers, the fitted viewport, and the summary cards.

use log::error;
use serde::Serialize;

use crate::map::{decode_polyline, fit_viewport, MapViewport, Marker};
use crate::models::{LatLng, TripPlan};
use crate::utils::time::{to_hour_string, to_hours, to_miles};

/// Decodes the plan's route path. A malformed polyline is logged and renders
/// as no path rather than failing the whole screen.
pub fn route_path(plan: &TripPlan) -> Vec<LatLng> {
    match decode_polyline(&plan.path) {
        Ok(path) => path,
        Err(err) => {
            error!("Error decoding route path: {err}");
            Vec::new()
        }
    }
}

/// Markers for the three endpoints plus one per suggested stop, the stop's
/// reason as its popup.
pub fn plan_markers(plan: &TripPlan) -> Vec<Marker> {
    let mut markers = vec![
        Marker {
            position: plan.current,
            popup: "Current location".to_string(),
        },
        Marker {
            position: plan.pickup,
            popup: "Pickup".to_string(),
        },
        Marker {
            position: plan.dropoff,
            popup: "Dropoff".to_string(),
        },
    ];
    markers.extend(plan.stops.iter().map(|stop| Marker {
        position: stop.location,
        popup: stop.reason.clone(),
    }));
    markers
}

/// Pushes the whole plan onto a viewport: path, markers, then a bounds fit.
pub fn show_plan(map: &mut dyn MapViewport, plan: &TripPlan) {
    map.set_polyline(route_path(plan));
    map.set_markers(plan_markers(plan));
    fit_viewport(map, &plan.bbox);
}

/// Pre-formatted figures for the result screen's metric cards.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCards {
    /// Route length, miles with two decimals.
    pub distance_miles: String,
    pub driving_time: String,
    pub added_stop_time: String,
    pub total_trip_time: String,
    /// Whole hours of the 70-hour cycle consumed by trip end.
    pub cycle_used_hours: i64,
    pub cycle_remaining_hours: i64,
    pub notes: String,
}

pub fn summarize(plan: &TripPlan) -> SummaryCards {
    let summary = &plan.summary;
    SummaryCards {
        distance_miles: to_miles(summary.total_distance),
        driving_time: to_hour_string(summary.original_travel_seconds),
        added_stop_time: to_hour_string(summary.added_stop_seconds),
        total_trip_time: to_hour_string(summary.total_itinerary_seconds),
        cycle_used_hours: to_hours(summary.cycles_used_end),
        cycle_remaining_hours: to_hours(summary.cycles_remaining),
        notes: summary.notes.clone(),
    }
}
