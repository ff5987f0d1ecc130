use serde::Serialize;

use crate::models::{LonLat, TripPlan};

/// Which of the three location inputs a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRole {
    Current,
    Pickup,
    Dropoff,
}

/// Lifecycle of the planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlannerStatus {
    Idle,
    Calculating,
    Ready,
}

/// What the form has collected so far, in wire order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripInputs {
    pub current_location: Option<LonLat>,
    pub pickup_location: Option<LonLat>,
    pub dropoff_location: Option<LonLat>,
    pub cycle_used_hours: f64,
}

impl TripInputs {
    pub fn complete(&self) -> bool {
        self.current_location.is_some()
            && self.pickup_location.is_some()
            && self.dropoff_location.is_some()
    }
}

/// Observable state of the planning shell.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerState {
    pub status: PlannerStatus,
    pub inputs: TripInputs,
    /// Message shown above the form; cleared at the start of every attempt.
    pub validation_error: Option<String>,
    /// Last successful plan. Survives a failed refresh.
    pub plan: Option<TripPlan>,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self {
            status: PlannerStatus::Idle,
            inputs: TripInputs::default(),
            validation_error: None,
            plan: None,
        }
    }
}

/// Notifications the planning shell emits to the embedding UI.
#[derive(Debug, Clone)]
pub enum PlannerEvent {
    StateChanged,
}
