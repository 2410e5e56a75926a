//! Test subscriber that captures a state snapshot on every notification.

use std::sync::Arc;

use spin::Mutex;

use crate::{Action, Store, Subscription};

/// Subscriber that records [`Store::get_state`] each time it is notified.
///
/// Only available with the `testing` feature.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use oxide_thunk::{Action, StateRecorder, Store};
///
/// struct Bump;
/// impl Action for Bump {
///     fn kind(&self) -> &str { "BUMP" }
/// }
///
/// fn count(state: Option<&Arc<u8>>, action: Option<&Bump>) -> Arc<u8> {
///     let state = state.cloned().unwrap_or_default();
///     match action {
///         Some(Bump) => Arc::new(*state + 1),
///         None => state,
///     }
/// }
///
/// let store: Store<u8, Bump> = Store::new(count);
/// let recorder = StateRecorder::new();
/// let _subscription = recorder.attach(&store);
///
/// store.dispatch(Bump).unwrap();
/// store.dispatch(Bump).unwrap();
///
/// recorder.with_states(|states| {
///     assert_eq!(*states[0], 1);
///     assert_eq!(*states[1], 2);
/// });
/// ```
pub struct StateRecorder<S> {
    states: Arc<Mutex<Vec<Arc<S>>>>,
}

impl<S> Clone for StateRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
        }
    }
}

impl<S: Send + Sync + 'static> Default for StateRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + Sync + 'static> StateRecorder<S> {
    pub fn new() -> Self {
        Self {
            states: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to `store`, capturing its state after every dispatch.
    pub fn attach<A: Action>(&self, store: &Store<S, A>) -> Subscription {
        let states = self.states.clone();
        let reader = store.clone();
        store.subscribe(move || {
            states.lock().push(reader.get_state());
        })
    }

    /// Number of notifications seen so far.
    pub fn count(&self) -> usize {
        self.states.lock().len()
    }

    /// Access the captured snapshots, oldest first.
    pub fn with_states<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Arc<S>>) -> R,
    {
        let states = self.states.lock();
        f(&states)
    }
}
