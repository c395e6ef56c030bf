use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiError};

/// Loading/data/error lifecycle of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    /// Empty while there is no error
    pub error: String,
    pub loading: bool,
}

impl<T> FetchState<T> {
    /// State of a hook that has not heard back yet.
    pub const fn pending() -> Self {
        Self {
            data: None,
            error: String::new(),
            loading: true,
        }
    }

    /// A new request started; earlier data and error stay visible until it settles.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of the request. Exactly one of `data`/`error` ends up set.
    pub fn settle(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error.clear();
            }
            Err(e) => {
                self.data = None;
                self.error = e.to_string();
            }
        }
        self.loading = false;
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::pending()
    }
}

/// Identifies one activation of a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Decides whether a finished request may still write state.
///
/// Each activation takes a [`Ticket`]; starting another activation or
/// cancelling makes every earlier ticket stale.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Stop accepting results from every outstanding request.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Run `apply` only if `ticket` is still current. Returns whether it ran.
    pub fn apply_if_current(&self, ticket: Ticket, apply: impl FnOnce()) -> bool {
        if self.is_current(ticket) {
            apply();
            true
        } else {
            false
        }
    }
}

/// GET `path` whenever it changes and expose the request lifecycle.
///
/// Results that arrive after the owning component unmounted, or after
/// `path` moved on, are dropped. The network call itself is not aborted.
pub fn use_api<T>(path: Signal<String>) -> ReadSignal<FetchState<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let state = RwSignal::new(FetchState::<T>::pending());
    let tracker = RequestTracker::new();

    Effect::new({
        let tracker = tracker.clone();
        move |_| {
            let path = path.get();
            let ticket = tracker.begin();
            state.update(FetchState::begin);

            let client = client.clone();
            let tracker = tracker.clone();
            spawn_local(async move {
                let result = client.get::<T>(&path).await;
                tracker.apply_if_current(ticket, || {
                    state.try_update(|s| s.settle(result));
                });
            });
        }
    });

    on_cleanup(move || tracker.cancel());

    state.read_only()
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::client::testing::{client, MockTransport};

    #[test]
    fn test_settle_success_clears_error() {
        let mut state = FetchState::<u32> {
            data: None,
            error: "Network Error".into(),
            loading: true,
        };
        state.settle(Ok(7));
        assert_eq!(
            state,
            FetchState {
                data: Some(7),
                error: String::new(),
                loading: false,
            }
        );
    }

    #[test]
    fn test_settle_failure_clears_data() {
        let mut state = FetchState {
            data: Some(7_u32),
            error: String::new(),
            loading: false,
        };
        state.begin();
        assert!(state.loading);
        state.settle(Err(ApiError::Status { status: 500 }));
        assert_eq!(state.data, None);
        assert_eq!(state.error, "Request failed with status code 500");
        assert!(!state.loading);
    }

    #[test]
    fn test_result_after_unmount_is_dropped() {
        let api = client(MockTransport::ok_json(r#"{"status":"ok"}"#));
        let tracker = RequestTracker::new();
        let mut state = FetchState::<Value>::pending();

        let ticket = tracker.begin();
        // component unmounts while the request is in flight
        tracker.cancel();
        let result = block_on(api.get::<Value>("/health"));
        let applied = tracker.apply_if_current(ticket, || state.settle(result));

        assert!(!applied);
        assert_eq!(state, FetchState::pending());
        assert_eq!(api.transport().requests.borrow().len(), 1);
    }

    #[test]
    fn test_path_change_supersedes_earlier_request() {
        let tracker = RequestTracker::new();
        let mut state = FetchState::<Value>::pending();

        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.apply_if_current(first, || state.settle(Ok(json!("stale")))));
        assert!(tracker.apply_if_current(second, || state.settle(Ok(json!("fresh")))));
        assert_eq!(state.data, Some(json!("fresh")));
    }

    #[test]
    fn test_clones_share_generation() {
        let tracker = RequestTracker::new();
        let cleanup = tracker.clone();
        let ticket = tracker.begin();
        assert!(tracker.is_current(ticket));
        cleanup.cancel();
        assert!(!tracker.is_current(ticket));
    }

    proptest! {
        #[test]
        fn test_only_latest_ticket_is_current(activations in 1usize..50) {
            let tracker = RequestTracker::new();
            let tickets: Vec<_> = (0..activations).map(|_| tracker.begin()).collect();
            let (latest, earlier) = tickets.split_last().unwrap();
            prop_assert!(tracker.is_current(*latest));
            prop_assert!(earlier.iter().all(|t| !tracker.is_current(*t)));
        }
    }
}
