//! The trip-form shell: holds the three location inputs and the cycle-hours
//! figure, runs the single planning request, and owns the resulting plan.

use std::sync::Arc;

use anyhow::{bail, Result};
use log::{error, info};
use tokio::sync::{broadcast, Mutex};

use crate::api::{PlanRequest, PlanService};
use crate::models::LonLat;

use super::normalize::normalize;
use super::state::{LocationRole, PlannerEvent, PlannerState, PlannerStatus};

pub const MISSING_LOCATIONS_MESSAGE: &str =
    "Please fill out all locations in order to generate report";

#[derive(Clone)]
pub struct PlannerController {
    state: Arc<Mutex<PlannerState>>,
    service: Arc<dyn PlanService>,
    events: broadcast::Sender<PlannerEvent>,
}

impl PlannerController {
    pub fn new(service: Arc<dyn PlanService>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Arc::new(Mutex::new(PlannerState::default())),
            service,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> PlannerState {
        self.state.lock().await.clone()
    }

    /// Records (or clears, on `None`) one of the three location inputs.
    pub async fn set_location(&self, role: LocationRole, coords: Option<LonLat>) {
        {
            let mut state = self.state.lock().await;
            let slot = match role {
                LocationRole::Current => &mut state.inputs.current_location,
                LocationRole::Pickup => &mut state.inputs.pickup_location,
                LocationRole::Dropoff => &mut state.inputs.dropoff_location,
            };
            *slot = coords;
        }
        self.changed();
    }

    pub async fn set_cycle_used(&self, hours: f64) {
        self.state.lock().await.inputs.cycle_used_hours = hours;
        self.changed();
    }

    /// Runs the planning request. Re-entrant calls while a request is in
    /// flight are an error; incomplete inputs set the validation message and
    /// never reach the network. A backend failure keeps the previous plan.
    pub async fn calculate_trip(&self) -> Result<()> {
        let request = {
            let mut state = self.state.lock().await;
            if state.status == PlannerStatus::Calculating {
                bail!("trip calculation already in progress");
            }
            state.validation_error = None;

            if !state.inputs.complete() {
                state.validation_error = Some(MISSING_LOCATIONS_MESSAGE.to_string());
                drop(state);
                self.changed();
                return Ok(());
            }

            state.status = PlannerStatus::Calculating;
            PlanRequest {
                // Completeness was just checked.
                current_location: state.inputs.current_location.unwrap_or_default(),
                pickup_location: state.inputs.pickup_location.unwrap_or_default(),
                dropoff_location: state.inputs.dropoff_location.unwrap_or_default(),
                current_cycle_used: state.inputs.cycle_used_hours,
            }
        };
        self.changed();

        let result = self.service.plan(&request).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(response) => {
                state.plan = Some(normalize(&response));
                state.status = PlannerStatus::Ready;
                info!(
                    "trip plan ready: {} stops, {} log days",
                    state.plan.as_ref().map_or(0, |p| p.stops.len()),
                    state.plan.as_ref().map_or(0, |p| p.logs.len()),
                );
            }
            Err(err) => {
                error!("Error generating trip report: {err}");
                // Back to the last good state; the stale plan stays visible.
                state.status = if state.plan.is_some() {
                    PlannerStatus::Ready
                } else {
                    PlannerStatus::Idle
                };
            }
        }
        drop(state);
        self.changed();
        Ok(())
    }

    /// Clears the plan and all inputs, returning to the blank form.
    pub async fn reset(&self) {
        {
            let mut state = self.state.lock().await;
            *state = PlannerState::default();
        }
        self.changed();
    }

    fn changed(&self) {
        let _ = self.events.send(PlannerEvent::StateChanged);
    }
}
