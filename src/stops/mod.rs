//! Category filtering for the mandatory-stop list.
//!
//! Filter semantics are a union: no active category means "show everything",
//! one or more active categories means "show stops whose category is among
//! the active ones". The filtered view is re-derived on every call; nothing
//! is cached.

use serde::{Deserialize, Serialize};

use crate::models::{Stop, StopKind};

/// One toggle per stop category. Pure view state, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub breaks: bool,
    pub rests: bool,
    pub services: bool,
    pub fuels: bool,
}

impl FilterState {
    pub fn is_active(&self, kind: StopKind) -> bool {
        match kind {
            StopKind::Break => self.breaks,
            StopKind::Rest => self.rests,
            StopKind::Service => self.services,
            StopKind::Fuel => self.fuels,
        }
    }

    pub fn set(&mut self, kind: StopKind, next: bool) {
        match kind {
            StopKind::Break => self.breaks = next,
            StopKind::Rest => self.rests = next,
            StopKind::Service => self.services = next,
            StopKind::Fuel => self.fuels = next,
        }
    }

    pub fn active_kinds(&self) -> Vec<StopKind> {
        StopKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .collect()
    }

    pub fn any_active(&self) -> bool {
        self.breaks || self.rests || self.services || self.fuels
    }
}

/// Derives the visible subset of `stops` under `filters`.
pub fn filter_stops(stops: &[Stop], filters: &FilterState) -> Vec<Stop> {
    if !filters.any_active() {
        return stops.to_vec();
    }
    stops
        .iter()
        .filter(|stop| filters.is_active(stop.kind))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatLng;

    fn stop(kind: StopKind) -> Stop {
        Stop {
            kind,
            duration_seconds: 1800.0,
            reason: format!("{} stop", kind.label()),
            location: LatLng::new(39.7, -104.9),
            time_from_start_seconds: 3600.0,
            address: None,
        }
    }

    #[test]
    fn all_false_is_identity() {
        let stops = vec![stop(StopKind::Break), stop(StopKind::Fuel)];
        let visible = filter_stops(&stops, &FilterState::default());
        assert_eq!(visible.len(), stops.len());
    }

    #[test]
    fn single_category() {
        let stops = vec![
            stop(StopKind::Break),
            stop(StopKind::Rest),
            stop(StopKind::Fuel),
        ];
        let mut filters = FilterState::default();
        filters.set(StopKind::Rest, true);

        let visible = filter_stops(&stops, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, StopKind::Rest);
    }

    #[test]
    fn multiple_categories_are_a_union() {
        let stops = vec![
            stop(StopKind::Break),
            stop(StopKind::Rest),
            stop(StopKind::Service),
            stop(StopKind::Fuel),
        ];
        let mut filters = FilterState::default();
        filters.set(StopKind::Break, true);
        filters.set(StopKind::Fuel, true);

        let visible = filter_stops(&stops, &filters);
        let kinds: Vec<StopKind> = visible.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StopKind::Break, StopKind::Fuel]);
    }

    #[test]
    fn toggling_off_restores_identity() {
        let stops = vec![stop(StopKind::Service)];
        let mut filters = FilterState::default();
        filters.set(StopKind::Break, true);
        assert!(filter_stops(&stops, &filters).is_empty());

        filters.set(StopKind::Break, false);
        assert_eq!(filter_stops(&stops, &filters).len(), 1);
        assert_eq!(filters.active_kinds(), vec![]);
    }
}
