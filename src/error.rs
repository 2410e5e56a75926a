//! Errors surfaced by the store and its builders.

use thiserror::Error;

/// Errors returned by [`Store::dispatch`](crate::Store::dispatch),
/// [`Completion::wait`](crate::Completion::wait) and
/// [`CombinedReducer::with_slice`](crate::CombinedReducer::with_slice).
///
/// A failed dispatch never alters state or notifies subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The dispatched value cannot be processed by this store.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// Two slices were registered under the same name.
    #[error("slice `{0}` is already registered")]
    DuplicateSlice(&'static str),

    /// The spawner dropped a thunk's future before it completed.
    #[error("thunk was dropped by its spawner before completing")]
    ThunkAbandoned,
}
