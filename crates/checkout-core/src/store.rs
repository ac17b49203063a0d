//! Checkout Store
//!
//! Explicit state container for [`PriceState`]. Every dispatch runs the
//! reducer and wakes subscribers through a `tokio::sync::watch` channel.
//! After `unmount` the store ignores late dispatches from requests that
//! were still in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::error::Result;
use crate::state::{reduce, Action, PriceState};

/// Observable price state container
pub struct CheckoutStore {
    state: watch::Sender<PriceState>,
    mounted: AtomicBool,
}

impl Default for CheckoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PriceState::default());
        Self {
            state,
            mounted: AtomicBool::new(true),
        }
    }

    /// Apply an action. Returns `false` when the store is unmounted and the
    /// action was dropped.
    pub fn dispatch(&self, action: Action) -> bool {
        if !self.is_mounted() {
            tracing::debug!(action = action.kind(), "Dropping action after unmount");
            return false;
        }

        tracing::trace!(action = action.kind(), "Dispatching action");
        self.state.send_modify(|state| *state = reduce(state, action));
        true
    }

    /// Decode and apply a serialized action; unknown types are an error
    pub fn dispatch_json(&self, value: serde_json::Value) -> Result<bool> {
        let action = Action::from_json(value)?;
        Ok(self.dispatch(action))
    }

    /// Set `loading` if a purchase may start, as one step.
    ///
    /// Returns the state the purchase starts from, or `None` when the payment
    /// client is missing, a purchase is already running, or the store is
    /// unmounted. Concurrent callers cannot both succeed.
    pub fn try_begin_loading(&self) -> Option<PriceState> {
        if !self.is_mounted() {
            return None;
        }

        let mut started = None;
        self.state.send_if_modified(|state| {
            if !state.can_purchase() {
                return false;
            }
            *state = reduce(state, Action::SetLoading { loading: true });
            started = Some(state.clone());
            true
        });
        started
    }

    /// Current state
    pub fn snapshot(&self) -> PriceState {
        self.state.borrow().clone()
    }

    /// Receive a notification on every applied transition
    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Tear down: later dispatches become no-ops
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::payment::{ClientHandle, PaymentClient};
    use crate::state::CheckoutFailure;
    use serde_json::json;

    struct StubClient;

    #[async_trait::async_trait]
    impl PaymentClient for StubClient {
        async fn redirect_to_checkout(&self, _session_id: &str) -> Option<CheckoutFailure> {
            None
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn config(code: &str) -> Action {
        Action::ConfigLoaded {
            unit_amount: 500,
            currency: Currency::parse(code).unwrap(),
            payment_client: None,
        }
    }

    #[test]
    fn test_dispatch_updates_snapshot() {
        let store = CheckoutStore::new();
        assert!(store.dispatch(config("USD")));
        assert!(store.dispatch(Action::Increment));

        let state = store.snapshot();
        assert_eq!(state.quantity(), 2);
        assert_eq!(state.price(), Some("$10.00"));
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = CheckoutStore::new();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetLoading { loading: true });
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());
    }

    #[test]
    fn test_unmount_drops_late_actions() {
        let store = CheckoutStore::new();
        store.dispatch(config("USD"));
        store.unmount();

        assert!(!store.dispatch(Action::Increment));
        assert_eq!(store.snapshot().quantity(), 1);
    }

    #[test]
    fn test_begin_loading_needs_payment_client() {
        let store = CheckoutStore::new();
        store.dispatch(config("USD"));
        assert!(store.try_begin_loading().is_none());
        assert!(!store.snapshot().is_loading());
    }

    #[test]
    fn test_begin_loading_admits_one_caller() {
        let store = std::sync::Arc::new(CheckoutStore::new());
        store.dispatch(Action::ConfigLoaded {
            unit_amount: 500,
            currency: Currency::usd(),
            payment_client: Some(ClientHandle::new(std::sync::Arc::new(StubClient))),
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.try_begin_loading().is_some())
            })
            .collect();
        let started = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|started| *started)
            .count();

        assert_eq!(started, 1);
        assert!(store.snapshot().is_loading());

        store.dispatch(Action::SetLoading { loading: false });
        store.unmount();
        assert!(store.try_begin_loading().is_none());
    }

    #[test]
    fn test_dispatch_json_unknown_action() {
        let store = CheckoutStore::new();
        assert!(store.dispatch_json(json!({ "type": "reset" })).is_err());
        assert_eq!(store.snapshot(), PriceState::default());
    }
}
