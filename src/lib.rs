//! A predictable state container for Rust with thunk-style async dispatch.
//!
//! State lives in a single [`Store`]. It only changes when an [`Action`] is
//! dispatched and run through a pure [`Reducer`]. Independent slices of state
//! are composed with a [`CombinedReducer`]. Multi-step or delayed work is
//! expressed as a [`Thunk`], which the store invokes with dispatch and
//! state-read capabilities instead of reducing it, then hands to a
//! [`Spawner`] to run to completion.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_thunk::{Action, CombinedReducer, CombinedState, Store, ThreadSpawner, Thunk, ThunkApi};
//!
//! #[derive(Debug)]
//! enum CounterAction { Increment, Loaded(i32) }
//!
//! impl Action for CounterAction {
//!     fn kind(&self) -> &str {
//!         match self {
//!             CounterAction::Increment => "INCREMENT",
//!             CounterAction::Loaded(_) => "LOADED",
//!         }
//!     }
//! }
//!
//! fn counter(state: Option<&Arc<i32>>, action: Option<&CounterAction>) -> Arc<i32> {
//!     let state = state.cloned().unwrap_or_default();
//!     match action {
//!         Some(CounterAction::Increment) => Arc::new(*state + 1),
//!         Some(CounterAction::Loaded(value)) => Arc::new(*value),
//!         None => state,
//!     }
//! }
//!
//! let root = CombinedReducer::new().with_slice("counter", counter).unwrap();
//! let store: Store<CombinedState, CounterAction> = Store::with_thunk(root, ThreadSpawner);
//!
//! let reader = store.clone();
//! let subscription = store.subscribe(move || {
//!     let count = reader.get_state().get::<i32>("counter");
//!     println!("count is now {count:?}");
//! });
//!
//! store.dispatch(CounterAction::Increment).unwrap();
//!
//! let load = Thunk::new(|api: ThunkApi<CombinedState, CounterAction>| async move {
//!     api.dispatch(CounterAction::Loaded(42)).ok();
//! });
//! futures::executor::block_on(store.dispatch(load).unwrap().into_future());
//!
//! subscription.unsubscribe();
//! assert_eq!(store.get_state().get::<i32>("counter").as_deref(), Some(&42));
//! ```

// Module declarations
mod action;
mod combine;
mod error;
mod reducer;
mod spawner;
mod store;
mod thunk;

#[cfg(any(test, feature = "testing"))]
mod recorder;

pub mod app;

// Public re-exports
pub use action::{Action, Dispatchable, Dispatched};
pub use combine::{CombinedReducer, CombinedState};
pub use error::StoreError;
pub use reducer::Reducer;
pub use spawner::{Spawner, ThreadSpawner};
pub use store::{Store, Subscription};
pub use thunk::{Completion, Thunk, ThunkApi};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use recorder::StateRecorder;
#[cfg(any(test, feature = "testing"))]
pub use spawner::{create_test_spawner, QueuedSpawner};
