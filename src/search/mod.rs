mod controller;
mod state;

pub use controller::{SearchController, DEBOUNCE_DELAY};
pub use state::{Key, SearchEvent, SearchState};
