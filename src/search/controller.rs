//! Debounced location-autocomplete controller.
//!
//! Every text change restarts a fixed-delay debounce timer; when the timer
//! fires with at least [`MIN_QUERY_LEN`] characters, the controller issues a
//! geocoding query. Two mechanisms keep stale responses out of the state:
//! the previous timer/query task is cancelled through its
//! `CancellationToken` (which aborts the in-flight request), and every
//! issued query takes a monotone sequence number — a response whose number
//! is no longer the maximum is discarded, so the rendered result set always
//! belongs to the most recently requested debounced value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::error;
use tokio::sync::{broadcast, Mutex};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, Geocoder, MIN_QUERY_LEN};
use crate::events::{ListenerRegistry, PointerDown, Subscription};
use crate::models::{FeatureCollection, GeoFeature};

use super::state::{Key, SearchEvent, SearchState};

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(400);

#[derive(Clone)]
pub struct SearchController {
    state: Arc<Mutex<SearchState>>,
    geocoder: Arc<dyn Geocoder>,
    events: broadcast::Sender<SearchEvent>,
    /// Token for the pending debounce/query task, if any.
    pending: Arc<Mutex<Option<CancellationToken>>>,
    query_seq: Arc<AtomicU64>,
    debounce: Duration,
}

impl SearchController {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_debounce(geocoder, DEBOUNCE_DELAY)
    }

    pub fn with_debounce(geocoder: Arc<dyn Geocoder>, debounce: Duration) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            state: Arc::new(Mutex::new(SearchState::default())),
            geocoder,
            events,
            pending: Arc::new(Mutex::new(None)),
            query_seq: Arc::new(AtomicU64::new(0)),
            debounce,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    /// User edit. Clears any prior selection (emitting the cleared
    /// notification before the new query can land), drops suppression, and
    /// restarts the debounce timer.
    pub async fn set_text(&self, value: &str) {
        {
            let mut state = self.state.lock().await;
            state.text = value.to_string();
            state.suppress_after_select = false;
            if state.selected.take().is_some() {
                let _ = self.events.send(SearchEvent::SelectionChanged(None));
            }
        }
        self.schedule_query(value.to_string()).await;
    }

    /// Keyboard navigation over the dropdown.
    pub async fn handle_key(&self, key: Key) {
        let committed = {
            let mut state = self.state.lock().await;

            if !state.dropdown_open {
                if key == Key::ArrowDown && !state.results.is_empty() {
                    state.dropdown_open = true;
                    state.highlight = 0;
                    let _ = self.events.send(SearchEvent::DropdownChanged { open: true });
                }
                return;
            }

            let count = state.results.len() as i32;
            match key {
                Key::ArrowDown => {
                    state.highlight = (state.highlight + 1).min(count - 1);
                    None
                }
                Key::ArrowUp => {
                    state.highlight = (state.highlight - 1).max(0);
                    None
                }
                Key::Enter => {
                    let index = state.highlight;
                    if index >= 0 && (index as usize) < state.results.len() {
                        Some(state.results[index as usize].clone())
                    } else {
                        None
                    }
                }
                Key::Escape => {
                    state.dropdown_open = false;
                    let _ = self
                        .events
                        .send(SearchEvent::DropdownChanged { open: false });
                    None
                }
            }
        };

        if let Some(feature) = committed {
            self.commit(feature).await;
        }
    }

    /// Pointer selection of a result row.
    pub async fn choose(&self, index: usize) {
        let feature = {
            let state = self.state.lock().await;
            state.results.get(index).cloned()
        };
        if let Some(feature) = feature {
            self.commit(feature).await;
        }
    }

    /// Clear action: empty text, null selection, closed dropdown, focus
    /// returned to the input.
    pub async fn clear(&self) {
        self.cancel_pending().await;
        {
            let mut state = self.state.lock().await;
            let was_open = state.dropdown_open;
            *state = SearchState::default();
            if was_open {
                let _ = self
                    .events
                    .send(SearchEvent::DropdownChanged { open: false });
            }
        }
        let _ = self.events.send(SearchEvent::SelectionChanged(None));
        let _ = self.events.send(SearchEvent::FocusRequested);
    }

    /// Closes the dropdown without touching the selection (Escape, outside
    /// click, the dropdown's own close affordance).
    pub async fn close_dropdown(&self) {
        let mut state = self.state.lock().await;
        if state.dropdown_open {
            state.dropdown_open = false;
            let _ = self
                .events
                .send(SearchEvent::DropdownChanged { open: false });
        }
    }

    /// Attaches this field to the page-wide pointer feed: any pointer-down
    /// whose hit chain does not include `container_id` closes the dropdown.
    /// Must be called within a tokio runtime; dropping the returned guard
    /// detaches the listener.
    pub fn bind_outside_click(
        &self,
        registry: &ListenerRegistry<PointerDown>,
        container_id: &str,
    ) -> Subscription<PointerDown> {
        let controller = self.clone();
        let container = container_id.to_string();
        registry.attach(move |event| {
            if !event.inside(&container) {
                let controller = controller.clone();
                tokio::spawn(async move {
                    controller.close_dropdown().await;
                });
            }
        })
    }

    async fn commit(&self, feature: GeoFeature) {
        let label = feature.label().to_string();
        {
            let mut state = self.state.lock().await;
            state.text = label.clone();
            state.selected = feature.coords();
            state.suppress_after_select = true;
            state.highlight = -1;
            if state.dropdown_open {
                state.dropdown_open = false;
                let _ = self
                    .events
                    .send(SearchEvent::DropdownChanged { open: false });
            }
        }
        let _ = self
            .events
            .send(SearchEvent::SelectionChanged(Some(feature)));

        // The label is now the input value, so it flows through the same
        // debounce/query pipeline; suppression keeps the dropdown closed
        // when that query resolves.
        self.schedule_query(label).await;
    }

    async fn cancel_pending(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.cancel();
        }
    }

    async fn schedule_query(&self, value: String) {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock().await;
            if let Some(previous) = pending.take() {
                previous.cancel();
            }
            *pending = Some(token.clone());
        }

        let controller = self.clone();
        tokio::spawn(async move {
            controller.debounce_and_query(value, token).await;
        });
    }

    async fn debounce_and_query(self, value: String, token: CancellationToken) {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = sleep(self.debounce) => {}
        }

        {
            let mut state = self.state.lock().await;
            state.debounced_text = value.clone();
        }

        if value.chars().count() < MIN_QUERY_LEN {
            let mut state = self.state.lock().await;
            state.loading = false;
            state.highlight = -1;
            if state.dropdown_open {
                state.dropdown_open = false;
                let _ = self
                    .events
                    .send(SearchEvent::DropdownChanged { open: false });
            }
            return;
        }

        let seq = self.query_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.loading = true;
        }

        let result = tokio::select! {
            _ = token.cancelled() => return,
            result = self.geocoder.autocomplete(&value) => result,
        };

        // Latest wins: a response for a superseded query never lands.
        if seq != self.query_seq.load(Ordering::SeqCst) {
            return;
        }

        self.apply_results(result).await;
    }

    async fn apply_results(&self, result: Result<FeatureCollection, ApiError>) {
        let mut state = self.state.lock().await;
        state.loading = false;
        state.results = match result {
            Ok(collection) => collection.features,
            Err(err) => {
                // Treated as "no results"; never retried, never surfaced.
                error!("autocomplete query failed: {err}");
                Vec::new()
            }
        };

        if state.suppress_after_select {
            return;
        }

        let was_open = state.dropdown_open;
        state.dropdown_open = if state.results.is_empty() {
            // Empty result set: open state depends only on the live input.
            state.text.chars().count() >= MIN_QUERY_LEN
        } else {
            true
        };
        state.highlight = -1;

        if was_open != state.dropdown_open {
            let _ = self.events.send(SearchEvent::DropdownChanged {
                open: state.dropdown_open,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    use crate::models::{FeatureProperties, Geometry};

    /// Scripted geocoder: records queries, answers with one feature named
    /// after the query (or nothing / an error when told to).
    struct FakeGeocoder {
        calls: StdMutex<Vec<String>>,
        delay: Duration,
        empty: bool,
        fail: bool,
    }

    impl FakeGeocoder {
        fn new() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                delay: Duration::ZERO,
                empty: false,
                fail: false,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn feature(label: &str) -> GeoFeature {
        GeoFeature {
            geometry: Some(Geometry {
                kind: "Point".to_string(),
                coordinates: vec![-104.99, 39.73],
            }),
            properties: FeatureProperties {
                id: None,
                label: Some(label.to_string()),
                name: None,
            },
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn autocomplete(&self, text: &str) -> Result<FeatureCollection, ApiError> {
            self.calls.lock().unwrap().push(text.to_string());
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if self.fail {
                return Err(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            if self.empty {
                return Ok(FeatureCollection::default());
            }
            Ok(FeatureCollection {
                features: vec![feature(&format!("{text} City"))],
            })
        }
    }

    fn controller(geocoder: Arc<FakeGeocoder>) -> SearchController {
        SearchController::new(geocoder)
    }

    async fn settle() {
        // Paused-clock runtimes auto-advance past the debounce and any
        // scripted provider delay once all tasks are idle.
        sleep(Duration::from_secs(2)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_issue_exactly_one_query() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("a").await;
        sleep(Duration::from_millis(100)).await;
        search.set_text("ab").await;
        settle().await;

        assert_eq!(geocoder.calls(), vec!["ab".to_string()]);
        let state = search.snapshot().await;
        assert_eq!(state.debounced_text, "ab");
        assert!(state.dropdown_open);
        assert_eq!(state.highlight, -1);
        assert_eq!(state.results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn short_input_never_queries_and_stays_closed() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("a").await;
        settle().await;

        assert!(geocoder.calls().is_empty());
        assert!(!search.snapshot().await.dropdown_open);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_results_follow_the_live_input_length() {
        let geocoder = Arc::new(FakeGeocoder {
            empty: true,
            ..FakeGeocoder::new()
        });
        let search = controller(geocoder.clone());

        search.set_text("nowhere").await;
        settle().await;

        let state = search.snapshot().await;
        assert!(state.results.is_empty());
        assert!(state.dropdown_open, "no-results panel still shows");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_query_is_logged_and_treated_as_no_results() {
        let _ = env_logger::builder().is_test(true).try_init();
        let geocoder = Arc::new(FakeGeocoder {
            fail: true,
            ..FakeGeocoder::new()
        });
        let search = controller(geocoder.clone());

        search.set_text("denver").await;
        settle().await;

        let state = search.snapshot().await;
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn keyboard_navigation_clamps_and_commits() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());
        let mut events = search.subscribe();

        search.set_text("denver").await;
        settle().await;

        // Closed dropdown: ArrowUp does nothing, ArrowDown opens at 0.
        search.close_dropdown().await;
        search.handle_key(Key::ArrowUp).await;
        assert!(!search.snapshot().await.dropdown_open);
        search.handle_key(Key::ArrowDown).await;
        let state = search.snapshot().await;
        assert!(state.dropdown_open);
        assert_eq!(state.highlight, 0);

        // One result: further ArrowDown clamps, ArrowUp clamps at 0.
        search.handle_key(Key::ArrowDown).await;
        assert_eq!(search.snapshot().await.highlight, 0);
        search.handle_key(Key::ArrowUp).await;
        assert_eq!(search.snapshot().await.highlight, 0);

        search.handle_key(Key::Enter).await;
        let state = search.snapshot().await;
        assert_eq!(state.text, "denver City");
        assert_eq!(state.selected, Some([-104.99, 39.73]));
        assert!(!state.dropdown_open);
        assert!(state.suppress_after_select);
        assert_eq!(state.highlight, -1);

        // The commit emitted the selected feature.
        let mut selected = None;
        while let Ok(event) = events.try_recv() {
            if let SearchEvent::SelectionChanged(Some(f)) = event {
                selected = Some(f);
            }
        }
        assert_eq!(selected.unwrap().label(), "denver City");
    }

    #[tokio::test(start_paused = true)]
    async fn escape_closes_without_clearing_selection() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("denver").await;
        settle().await;
        search.handle_key(Key::ArrowDown).await;
        search.handle_key(Key::Enter).await;
        settle().await;

        search.handle_key(Key::Escape).await;
        let state = search.snapshot().await;
        assert!(state.selected.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn selection_suppresses_the_labels_own_query() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("denver").await;
        settle().await;
        search.handle_key(Key::ArrowDown).await;
        search.handle_key(Key::Enter).await;

        // The committed label flows through debounce and resolves; the
        // dropdown must stay closed until the next edit clears suppression.
        settle().await;
        let state = search.snapshot().await;
        assert_eq!(geocoder.calls().last().unwrap(), "denver City");
        assert!(!state.dropdown_open);
        assert!(state.suppress_after_select);

        search.set_text("denver city x").await;
        assert!(!search.snapshot().await.suppress_after_select);
        settle().await;
        assert!(search.snapshot().await.dropdown_open);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_after_selection_emits_cleared_before_new_results() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("denver").await;
        settle().await;
        search.handle_key(Key::ArrowDown).await;
        search.handle_key(Key::Enter).await;
        settle().await;

        let mut events = search.subscribe();
        search.set_text("boulder").await;

        // Cleared notification is synchronous with the edit.
        match events.try_recv() {
            Ok(SearchEvent::SelectionChanged(None)) => {}
            other => panic!("expected cleared selection first, got {other:?}"),
        }
        assert!(search.snapshot().await.selected.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_debounced_value_discards_the_stale_query() {
        let geocoder = Arc::new(FakeGeocoder {
            delay: Duration::from_millis(300),
            ..FakeGeocoder::new()
        });
        let search = controller(geocoder.clone());

        search.set_text("de").await;
        // Let the first debounce fire and its (slow) query start.
        sleep(Duration::from_millis(450)).await;
        search.set_text("den").await;
        settle().await;

        assert_eq!(geocoder.calls(), vec!["de".to_string(), "den".to_string()]);
        let state = search.snapshot().await;
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].label(), "den City");
        assert_eq!(state.debounced_text, "den");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_resets_everything_and_requests_focus() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());

        search.set_text("denver").await;
        settle().await;
        search.handle_key(Key::ArrowDown).await;
        search.handle_key(Key::Enter).await;
        settle().await;

        let mut events = search.subscribe();
        search.clear().await;

        let state = search.snapshot().await;
        assert!(state.text.is_empty());
        assert!(state.selected.is_none());
        assert!(!state.dropdown_open);
        assert!(!state.suppress_after_select);
        assert!(state.results.is_empty());

        let mut saw_cleared = false;
        let mut saw_focus = false;
        while let Ok(event) = events.try_recv() {
            match event {
                SearchEvent::SelectionChanged(None) => saw_cleared = true,
                SearchEvent::FocusRequested => saw_focus = true,
                _ => {}
            }
        }
        assert!(saw_cleared && saw_focus);

        // No stray query fires after the reset.
        let calls_before = geocoder.calls().len();
        settle().await;
        assert_eq!(geocoder.calls().len(), calls_before);
    }

    #[tokio::test(start_paused = true)]
    async fn outside_click_closes_and_guard_detaches() {
        let geocoder = Arc::new(FakeGeocoder::new());
        let search = controller(geocoder.clone());
        let registry: ListenerRegistry<PointerDown> = ListenerRegistry::new();
        let guard = search.bind_outside_click(&registry, "search-current");

        search.set_text("denver").await;
        settle().await;
        assert!(search.snapshot().await.dropdown_open);

        // Click inside: stays open.
        registry.emit(&PointerDown {
            hit: vec!["result-1".to_string(), "search-current".to_string()],
        });
        tokio::task::yield_now().await;
        assert!(search.snapshot().await.dropdown_open);

        // Click outside: closes.
        registry.emit(&PointerDown {
            hit: vec!["page".to_string()],
        });
        settle().await;
        assert!(!search.snapshot().await.dropdown_open);

        drop(guard);
        assert_eq!(registry.listener_count(), 0);
    }
}
