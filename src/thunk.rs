//! Thunks: callables dispatched in place of plain actions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use crate::{Action, Dispatchable, Dispatched, Store, StoreError};

/// Capabilities handed to a running [`Thunk`].
///
/// Clone it into spawned work or `async` blocks. It is a handle to the same
/// store the thunk was dispatched on.
pub struct ThunkApi<S, A> {
    store: Store<S, A>,
}

impl<S, A> Clone for ThunkApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S, A> ThunkApi<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    pub(crate) fn new(store: Store<S, A>) -> Self {
        Self { store }
    }

    /// Dispatch a plain action or a nested thunk on the owning store.
    pub fn dispatch(&self, value: impl Into<Dispatchable<S, A>>) -> Result<Dispatched<A>, StoreError> {
        self.store.dispatch(value)
    }

    /// Dispatch a nested thunk and get a handle to its typed result.
    ///
    /// See [`Store::dispatch_thunk`].
    pub fn dispatch_thunk<T: Send + 'static>(&self, thunk: Thunk<S, A, T>) -> Result<Completion<T>, StoreError> {
        self.store.dispatch_thunk(thunk)
    }

    /// Read the state as it is now, not as it was when the thunk was dispatched.
    pub fn get_state(&self) -> Arc<S> {
        self.store.get_state()
    }
}

/// A deferred unit of work that may dispatch any number of actions over time.
///
/// A thunk is invoked exactly once, synchronously, during
/// [`Store::dispatch`]. Anything it does before returning its future
/// happens before `dispatch` returns. The future is then handed to the
/// store's [`Spawner`](crate::Spawner), so the rest runs even if the caller
/// drops the returned handle.
///
/// `T` is whatever the thunk resolves to. Thunks dispatched through
/// [`Store::dispatch`] resolve to `()`; use
/// [`Store::dispatch_thunk`] to get a typed result back.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use oxide_thunk::{Action, Store, ThreadSpawner, Thunk, ThunkApi};
///
/// struct Add(i64);
/// impl Action for Add {
///     fn kind(&self) -> &str { "ADD" }
/// }
///
/// fn counter(state: Option<&Arc<i64>>, action: Option<&Add>) -> Arc<i64> {
///     let state = state.cloned().unwrap_or_default();
///     match action {
///         Some(Add(delta)) => Arc::new(*state + delta),
///         None => state,
///     }
/// }
///
/// let store: Store<i64, Add> = Store::with_thunk(counter, ThreadSpawner);
///
/// let add_twice = Thunk::new(|api: ThunkApi<i64, Add>| async move {
///     api.dispatch(Add(1)).ok();
///     api.dispatch(Add(1)).ok();
///     *api.get_state()
/// });
///
/// let completion = store.dispatch_thunk(add_twice).unwrap();
/// assert_eq!(futures::executor::block_on(completion.wait()), Ok(2));
/// ```
#[allow(clippy::type_complexity)]
pub struct Thunk<S, A, T = ()>(Box<dyn FnOnce(ThunkApi<S, A>) -> BoxFuture<'static, T> + Send + 'static>);

impl<S: 'static, A: 'static, T: Send + 'static> Thunk<S, A, T> {
    /// Create a thunk from a closure returning a future.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(ThunkApi<S, A>) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self(Box::new(move |api| f(api).boxed()))
    }

    /// Create a thunk that does all of its work synchronously.
    ///
    /// Its completion resolves as soon as the spawner runs it.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce(ThunkApi<S, A>) -> T + Send + 'static,
    {
        Self(Box::new(move |api| future::ready(f(api)).boxed()))
    }

    pub(crate) fn invoke(self, api: ThunkApi<S, A>) -> BoxFuture<'static, T> {
        (self.0)(api)
    }
}

/// Handle to the result of a spawned [`Thunk`].
///
/// Await it with [`wait`](Self::wait) or drop it. Dropping only discards the
/// result; the thunk keeps running on the store's spawner.
pub struct Completion<T> {
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> Completion<T> {
    pub(crate) fn channel() -> (flume::Sender<T>, Self) {
        let (sender, receiver) = flume::bounded(1);
        (sender, Self { receiver })
    }

    /// Wait for the thunk to finish and take its result.
    ///
    /// # Errors
    ///
    /// [`StoreError::ThunkAbandoned`] if the spawner dropped the future
    /// before it completed.
    pub async fn wait(self) -> Result<T, StoreError> {
        self.receiver
            .into_recv_async()
            .await
            .map_err(|_| StoreError::ThunkAbandoned)
    }

    /// Take the result if the thunk has already finished.
    pub fn try_take(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}
