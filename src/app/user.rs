use std::sync::Arc;

use crate::{CombinedState, Thunk, ThunkApi};

use super::{AppAction, UserApi};

/// Error recorded in [`UserState::error`] when a fetch fails.
pub const FETCH_USER_ERROR: &str = "Failed to fetch user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Status of the most recent user fetch.
///
/// While `loading` is set, `error` is always `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn fetch_user_request() -> AppAction {
    AppAction::FetchUserRequest
}

pub fn fetch_user_success(user: User) -> AppAction {
    AppAction::FetchUserSuccess(user)
}

pub fn fetch_user_failure(error: impl Into<String>) -> AppAction {
    AppAction::FetchUserFailure(error.into())
}

pub fn user_reducer(state: Option<&Arc<UserState>>, action: Option<&AppAction>) -> Arc<UserState> {
    let state = state.cloned().unwrap_or_default();

    match action {
        Some(AppAction::FetchUserRequest) => Arc::new(UserState {
            loading: true,
            error: None,
            ..UserState::clone(&state)
        }),
        Some(AppAction::FetchUserSuccess(user)) => Arc::new(UserState {
            loading: false,
            user: Some(user.clone()),
            ..UserState::clone(&state)
        }),
        // The previously fetched user is kept.
        Some(AppAction::FetchUserFailure(error)) => Arc::new(UserState {
            loading: false,
            error: Some(error.clone()),
            ..UserState::clone(&state)
        }),
        _ => state,
    }
}

/// Fetch a user through `api`, tracking progress in the `user` slice.
///
/// `FETCH_USER_REQUEST` is dispatched as soon as the store invokes the
/// thunk, before `dispatch` returns. The rest runs on the store's spawner
/// and dispatches exactly one of `FETCH_USER_SUCCESS` or
/// `FETCH_USER_FAILURE`, whether or not the caller keeps the returned
/// handle. API errors are logged and never escape the thunk.
pub fn fetch_user(api: Arc<dyn UserApi>, user_id: u64) -> Thunk<CombinedState, AppAction> {
    Thunk::new(move |dispatcher: ThunkApi<CombinedState, AppAction>| {
        send(&dispatcher, fetch_user_request());
        let response = api.fetch_user(user_id);

        async move {
            match response.await {
                Ok(user) => send(&dispatcher, fetch_user_success(user)),
                Err(err) => {
                    log::warn!("fetching user {user_id} failed: {err}");
                    send(&dispatcher, fetch_user_failure(FETCH_USER_ERROR));
                }
            }
        }
    })
}

fn send(dispatcher: &ThunkApi<CombinedState, AppAction>, action: AppAction) {
    if let Err(err) = dispatcher.dispatch(action) {
        log::error!("failed to dispatch from fetch_user: {err}");
    }
}
