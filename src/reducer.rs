//! The reducer contract.

use std::sync::Arc;

/// A pure function computing the next state from the current state and an action.
///
/// `state` is `None` when there is no prior state, and `action` is `None`
/// for the initialization call a store makes when it is created. A reducer
/// must return its default state in that case.
///
/// A reducer that does not recognize an action must return the `state` it
/// was given, the same `Arc`, so callers can detect "no change" with
/// [`Arc::ptr_eq`].
///
/// Functions and closures with the matching signature implement this trait
/// via the blanket implementation.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use oxide_thunk::Reducer;
///
/// fn counter(state: Option<&Arc<i64>>, action: Option<&i64>) -> Arc<i64> {
///     let state = state.cloned().unwrap_or_default();
///     match action {
///         Some(delta) => Arc::new(*state + delta),
///         None => state,
///     }
/// }
///
/// let initial = counter.reduce(None, None);
/// assert_eq!(*counter.reduce(Some(&initial), Some(&2)), 2);
/// ```
pub trait Reducer<S, A>: Send + Sync {
    /// Reduce an action to the next state.
    ///
    /// # Arguments
    ///
    /// * `state` - The current state, or `None` if there is none yet
    /// * `action` - The action, or `None` for the initialization sentinel
    fn reduce(&self, state: Option<&Arc<S>>, action: Option<&A>) -> Arc<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<&Arc<S>>, Option<&A>) -> Arc<S> + Send + Sync,
{
    fn reduce(&self, state: Option<&Arc<S>>, action: Option<&A>) -> Arc<S> {
        self(state, action)
    }
}
