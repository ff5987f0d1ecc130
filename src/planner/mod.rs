//! The trip-planning shell: form inputs, the single planning request, and
//! presentation of the resulting plan.

mod controller;
mod normalize;
mod present;
mod state;

pub use controller::{PlannerController, MISSING_LOCATIONS_MESSAGE};
pub use normalize::{normalize, reverse_pair};
pub use present::{plan_markers, route_path, show_plan, summarize, SummaryCards};
pub use state::{LocationRole, PlannerEvent, PlannerState, PlannerStatus, TripInputs};
