//! The external user service the fetch thunk talks to.

use std::thread;
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use super::User;

/// Name every simulated lookup resolves to.
pub const SIMULATED_USER_NAME: &str = "John Doe";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("user {user_id} is unavailable")]
    Unavailable { user_id: u64 },

    #[error("response channel closed before a result arrived")]
    Disconnected,

    #[error("failed to start request: {0}")]
    Spawn(String),
}

/// Source of user records.
///
/// The returned future owns everything it needs, so it can outlive `self`.
pub trait UserApi: Send + Sync {
    fn fetch_user(&self, user_id: u64) -> BoxFuture<'static, Result<User, ApiError>>;
}

/// Stand-in for a remote service: answers on a worker thread after a delay.
///
/// The answer travels back over a single-slot channel. If the worker goes
/// away without answering, the request fails with [`ApiError::Disconnected`].
#[derive(Debug, Clone)]
pub struct SimulatedUserApi {
    delay: Duration,
    fail: bool,
}

impl SimulatedUserApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Make every request fail with [`ApiError::Unavailable`].
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl UserApi for SimulatedUserApi {
    fn fetch_user(&self, user_id: u64) -> BoxFuture<'static, Result<User, ApiError>> {
        let (sender, receiver) = flume::bounded(1);
        let delay = self.delay;
        let fail = self.fail;

        let spawned = thread::Builder::new()
            .name(format!("simulated-api-{user_id}"))
            .spawn(move || {
                thread::sleep(delay);
                let response = if fail {
                    Err(ApiError::Unavailable { user_id })
                } else {
                    Ok(User {
                        id: user_id,
                        name: SIMULATED_USER_NAME.to_string(),
                    })
                };
                sender.send(response).ok();
            });

        if let Err(err) = spawned {
            return future::ready(Err(ApiError::Spawn(err.to_string()))).boxed();
        }

        async move {
            match receiver.into_recv_async().await {
                Ok(response) => response,
                Err(_) => Err(ApiError::Disconnected),
            }
        }
        .boxed()
    }
}
