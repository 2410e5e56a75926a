//! Composition of named slice reducers into one root reducer.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Reducer, StoreError};

type SliceState = Arc<dyn Any + Send + Sync>;

/// State produced by a [`CombinedReducer`]: one entry per named slice.
#[derive(Clone, Default)]
pub struct CombinedState {
    slices: BTreeMap<&'static str, SliceState>,
}

impl CombinedState {
    /// Typed access to a slice.
    ///
    /// Returns `None` if no slice is registered under `name` or if it holds
    /// a different type.
    pub fn get<S: Any + Send + Sync>(&self, name: &str) -> Option<Arc<S>> {
        self.slices.get(name)?.clone().downcast::<S>().ok()
    }

    /// `true` if a slice is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.slices.contains_key(name)
    }

    /// Slice names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slices.keys().copied()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// `true` if no slice is registered.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl fmt::Debug for CombinedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

trait ErasedSlice<A>: Send + Sync {
    fn reduce_erased(&self, state: Option<&SliceState>, action: Option<&A>) -> SliceState;
}

struct Slice<S, R> {
    reducer: R,
    _state: PhantomData<fn() -> S>,
}

impl<S, A, R> ErasedSlice<A> for Slice<S, R>
where
    S: Any + Send + Sync,
    R: Reducer<S, A>,
{
    fn reduce_erased(&self, state: Option<&SliceState>, action: Option<&A>) -> SliceState {
        // Entries are only ever written by the slice registered under that name.
        let typed = state.and_then(|state| state.clone().downcast::<S>().ok());
        self.reducer.reduce(typed.as_ref(), action)
    }
}

/// Root reducer built from independent, named slice reducers.
///
/// Every action is handed to every slice with that slice's own state.
/// A slice never observes another slice.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use oxide_thunk::{CombinedReducer, Reducer};
///
/// fn hits(state: Option<&Arc<u32>>, action: Option<&()>) -> Arc<u32> {
///     let state = state.cloned().unwrap_or_default();
///     match action {
///         Some(()) => Arc::new(*state + 1),
///         None => state,
///     }
/// }
///
/// let root = CombinedReducer::new()
///     .with_slice("hits", hits)
///     .unwrap();
///
/// let state = root.reduce(None, None);
/// assert_eq!(state.get::<u32>("hits").as_deref(), Some(&0));
/// ```
pub struct CombinedReducer<A> {
    slices: Vec<(&'static str, Box<dyn ErasedSlice<A>>)>,
}

impl<A> Default for CombinedReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CombinedReducer<A> {
    /// A reducer with no slices. Add them with [`with_slice`](Self::with_slice).
    pub fn new() -> Self {
        Self { slices: Vec::new() }
    }

    /// Register a slice reducer under `name`.
    ///
    /// Fails with [`StoreError::DuplicateSlice`] if the name is taken.
    pub fn with_slice<S, R>(mut self, name: &'static str, reducer: R) -> Result<Self, StoreError>
    where
        S: Any + Send + Sync,
        R: Reducer<S, A> + 'static,
        A: 'static,
    {
        if self.slices.iter().any(|(existing, _)| *existing == name) {
            return Err(StoreError::DuplicateSlice(name));
        }
        let slice: Box<dyn ErasedSlice<A>> = Box::new(Slice {
            reducer,
            _state: PhantomData,
        });
        self.slices.push((name, slice));
        log::trace!("slice `{name}` registered");
        Ok(self)
    }
}

impl<A> Reducer<CombinedState, A> for CombinedReducer<A> {
    fn reduce(&self, state: Option<&Arc<CombinedState>>, action: Option<&A>) -> Arc<CombinedState> {
        let mut next = CombinedState::default();
        let mut changed = state.map_or(true, |state| state.len() != self.slices.len());

        for (name, slice) in &self.slices {
            let previous = state.and_then(|state| state.slices.get(name));
            let reduced = slice.reduce_erased(previous, action);
            changed |= previous.map_or(true, |previous| !Arc::ptr_eq(previous, &reduced));
            next.slices.insert(*name, reduced);
        }

        match state {
            Some(state) if !changed => Arc::clone(state),
            _ => Arc::new(next),
        }
    }
}
