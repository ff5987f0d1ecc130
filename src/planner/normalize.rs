//! One-shot translation of a planning response into display form.
//!
//! The backend speaks `[lon, lat]`; the map speaks `lat`/`lng`. The swap
//! happens exactly once, here, as a pure function on the freshly decoded
//! response. Its output uses [`LatLng`] throughout, so there is no wire-order
//! pair left in a [`TripPlan`] to swap a second time.

use crate::models::{LatLng, LonLat, PlanResponse, Stop, TripPlan};

/// Swaps a coordinate pair in place-order. Not idempotent: applying it twice
/// returns the original pair.
pub fn reverse_pair(pair: LonLat) -> [f64; 2] {
    [pair[1], pair[0]]
}

/// Converts a wire response into the display-order plan the shell owns.
/// Leaves the input untouched.
pub fn normalize(response: &PlanResponse) -> TripPlan {
    let stops = response
        .directions
        .stops
        .iter()
        .map(|stop| Stop {
            kind: stop.kind,
            duration_seconds: stop.duration_seconds,
            reason: stop.reason.clone(),
            location: LatLng::from_wire(stop.location),
            time_from_start_seconds: stop.time_from_start_seconds,
            address: stop.address.clone(),
        })
        .collect();

    TripPlan {
        current: LatLng::from_wire(response.current_coords),
        pickup: LatLng::from_wire(response.pickup_coords),
        dropoff: LatLng::from_wire(response.dropoff_coords),
        path: response.coordinates.clone(),
        bbox: response.directions.bbox.clone(),
        stops,
        route_events: response.directions.hos_events.clone(),
        summary: response.directions.hos_summary.clone(),
        logs: response.directions.eld.clone(),
        current_cycle_used: response.current_cycle_used,
    }
}
