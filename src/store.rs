//! The store that owns state, routes dispatches and notifies subscribers.

use std::sync::{Arc, Weak};

use spin::Mutex;

use futures::future::FutureExt;

use crate::{Action, Completion, Dispatchable, Dispatched, Reducer, Spawner, StoreError, Thunk, ThunkApi};

type Listener = Arc<dyn Fn() + Send + Sync>;
type SharedSpawner = Arc<dyn Spawner + Send + Sync>;

#[derive(Default)]
struct Listeners {
    entries: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Holds the current state and the subscriber list.
///
/// `Store` is a handle: cloning it is cheap and every clone refers to the
/// same state. State only changes inside [`dispatch`](Self::dispatch). The
/// reducer runs with no lock held; the result is installed only if no other
/// dispatch replaced the state in the meantime, otherwise the action is
/// reduced again against the newer state. Subscribers are always called with
/// no lock held.
///
/// Thunks are rejected unless the store was created with
/// [`Store::with_thunk`], which also supplies the [`Spawner`] that drives
/// them.
///
/// See the [crate-level documentation](crate) for a complete example.
///
/// # Type Parameters
///
/// * `S` - The root state type produced by the reducer
/// * `A` - The action type accepted by the reducer
pub struct Store<S, A> {
    state: Arc<Mutex<Arc<S>>>,
    listeners: Arc<Mutex<Listeners>>,
    reducer: Arc<dyn Reducer<S, A>>,
    spawner: Option<SharedSpawner>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
            reducer: Arc::clone(&self.reducer),
            spawner: self.spawner.clone(),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store that only accepts plain actions.
    ///
    /// The initial state is whatever `reducer` returns for no prior state
    /// and the initialization sentinel.
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::create(reducer, None)
    }

    /// Create a store that also accepts [`Thunk`]s.
    ///
    /// # Arguments
    ///
    /// * `reducer` - The root reducer
    /// * `spawner` - Runs the future of every dispatched thunk to completion
    pub fn with_thunk<R, Sp>(reducer: R, spawner: Sp) -> Self
    where
        R: Reducer<S, A> + 'static,
        Sp: Spawner + Send + Sync + 'static,
    {
        Self::create(reducer, Some(Arc::new(spawner)))
    }

    fn create<R>(reducer: R, spawner: Option<SharedSpawner>) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        let initial = reducer.reduce(None, None);
        log::debug!("store created (thunks enabled: {})", spawner.is_some());

        Store {
            state: Arc::new(Mutex::new(initial)),
            listeners: Arc::new(Mutex::new(Listeners::default())),
            reducer: Arc::new(reducer),
            spawner,
        }
    }

    /// `true` if the store was created with [`Store::with_thunk`].
    pub fn accepts_thunks(&self) -> bool {
        self.spawner.is_some()
    }

    /// The current state snapshot.
    pub fn get_state(&self) -> Arc<S> {
        self.state.lock().clone()
    }

    /// Dispatch a plain action or a thunk.
    ///
    /// - A plain action is validated, reduced into the new state, and every
    ///   subscriber registered at that moment is notified before this returns.
    ///   The action is handed back in [`Dispatched::Action`].
    /// - A thunk is invoked with a [`ThunkApi`] for this store and its future
    ///   is spawned. A handle to it is returned in [`Dispatched::Pending`].
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidAction`] if the action kind is empty, or if a
    /// thunk is dispatched on a store created with [`Store::new`]. State is
    /// left untouched and no subscriber is notified.
    pub fn dispatch(&self, value: impl Into<Dispatchable<S, A>>) -> Result<Dispatched<A>, StoreError> {
        match value.into() {
            Dispatchable::Action(action) => {
                self.apply(&action)?;
                Ok(Dispatched::Action(action))
            }
            Dispatchable::Thunk(thunk) => self.dispatch_thunk(thunk).map(Dispatched::Pending),
        }
    }

    /// Dispatch a thunk and get a handle to whatever it resolves to.
    ///
    /// The thunk is invoked before this returns and its future is handed to
    /// the store's spawner. Dropping the returned [`Completion`] does not
    /// stop it.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidAction`] if the store was created with
    /// [`Store::new`]. The thunk is not invoked.
    pub fn dispatch_thunk<T: Send + 'static>(&self, thunk: Thunk<S, A, T>) -> Result<Completion<T>, StoreError> {
        let Some(spawner) = &self.spawner else {
            log::warn!("rejected thunk dispatched on a store without thunk support");
            return Err(StoreError::InvalidAction(
                "thunks require a store created with `Store::with_thunk`".to_string(),
            ));
        };

        log::trace!("invoking thunk");
        let work = thunk.invoke(ThunkApi::new(self.clone()));
        let (sender, completion) = Completion::channel();

        spawner.spawn(
            async move {
                // Nobody may be waiting.
                let _ = sender.send(work.await);
            }
            .boxed(),
        );

        Ok(completion)
    }

    /// Register a callback invoked after every state replacement.
    ///
    /// The callback receives no arguments; read the new state with
    /// [`get_state`](Self::get_state) on a captured handle.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        log::trace!("subscriber {id} registered");

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of callbacks currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }

    fn apply(&self, action: &A) -> Result<(), StoreError> {
        let kind = action.kind();
        if kind.trim().is_empty() {
            log::warn!("rejected action with an empty kind");
            return Err(StoreError::InvalidAction("action kind must not be empty".to_string()));
        }
        log::debug!("dispatching {kind}");

        let mut current = self.get_state();
        loop {
            let next = self.reducer.reduce(Some(&current), Some(action));
            let mut state = self.state.lock();
            if Arc::ptr_eq(&*state, &current) {
                *state = next;
                break;
            }
            log::trace!("state replaced during reduction of {kind}, retrying");
            current = Arc::clone(&state);
        }

        self.notify();
        Ok(())
    }

    fn notify(&self) {
        // Snapshot first: changes made by a callback apply from the next pass.
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener();
        }
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping it keeps the subscription alive. Call
/// [`unsubscribe`](Self::unsubscribe) to remove exactly the callback it was
/// created for.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Remove the callback from its store.
    ///
    /// Safe to call from inside a notification. The pass in progress still
    /// reaches this callback; later passes do not.
    pub fn unsubscribe(self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        listeners.lock().entries.retain(|(id, _)| *id != self.id);
        log::trace!("subscriber {} removed", self.id);
    }
}
