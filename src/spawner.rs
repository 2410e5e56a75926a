//! Executors that drive dispatched thunks to completion.

use std::future::Future;
use std::pin::Pin;
use std::thread;

/// Runs thunk futures after [`Store::dispatch`](crate::Store::dispatch)
/// hands them off.
///
/// A thunk-enabled store never polls thunk futures itself. Every dispatched
/// thunk is passed here exactly once, so its later dispatches happen whether
/// or not the caller keeps the returned handle.
///
/// Function pointers and closures automatically implement this trait via the
/// blanket implementation, so any async runtime can be plugged in:
///
/// ```rust,ignore
/// let store = Store::with_thunk(reducer, |future| {
///     tokio::spawn(future);
/// });
/// ```
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// Drives each future to completion on a dedicated OS thread.
///
/// Suitable for scripts and tools without an async runtime. If the thread
/// cannot be started the future is dropped and its completion handle
/// reports [`StoreError::ThunkAbandoned`](crate::StoreError::ThunkAbandoned).
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSpawner;

impl Spawner for ThreadSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        let spawned = thread::Builder::new()
            .name("oxide-thunk".to_string())
            .spawn(move || futures::executor::block_on(future));

        if let Err(err) = spawned {
            log::error!("failed to start thunk thread: {err}");
        }
    }
}

#[cfg(any(test, feature = "testing"))]
fn test_spawner_fn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    futures::executor::block_on(fut);
}

/// Creates a spawner that blocks on each future before returning.
///
/// Only available with the `testing` feature or during tests.
///
/// Thunks finish inside [`Store::dispatch`](crate::Store::dispatch), which
/// keeps tests deterministic. A thunk must not dispatch a nested thunk and
/// wait on it with this spawner, since executors do not nest.
#[cfg(any(test, feature = "testing"))]
pub fn create_test_spawner() -> fn(Pin<Box<dyn Future<Output = ()> + Send>>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
type Queued = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Spawner that parks futures until the test runs them.
///
/// Only available with the `testing` feature or during tests.
///
/// Cloning shares the queue, so keep one clone and hand the other to
/// [`Store::with_thunk`](crate::Store::with_thunk).
#[cfg(any(test, feature = "testing"))]
#[derive(Clone, Default)]
pub struct QueuedSpawner {
    queue: std::sync::Arc<spin::Mutex<std::collections::VecDeque<Queued>>>,
}

#[cfg(any(test, feature = "testing"))]
impl QueuedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of futures spawned but not yet run.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run queued futures one at a time, in spawn order, until the queue is
    /// empty. Futures spawned while running are picked up too.
    ///
    /// Returns how many futures were run.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.lock().pop_front();
            match next {
                Some(future) => {
                    futures::executor::block_on(future);
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Drop every queued future without running it.
    pub fn discard_all(&self) {
        self.queue.lock().clear();
    }
}

#[cfg(any(test, feature = "testing"))]
impl Spawner for QueuedSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self.queue.lock().push_back(future);
    }
}
