//! The demonstration application: a todo list and a user-fetch status record
//! wired into one thunk-enabled store.

mod api;
mod config;
mod todos;
mod user;

use std::sync::Arc;

use crate::{Action, CombinedReducer, CombinedState, Spawner, Store, StoreError};

pub use api::{ApiError, SimulatedUserApi, UserApi, SIMULATED_USER_NAME};
pub use config::DemoConfig;
pub use todos::{add_todo, remove_todo, todos_reducer, Todo, TodosState};
pub use user::{
    fetch_user, fetch_user_failure, fetch_user_request, fetch_user_success, user_reducer, User,
    UserState, FETCH_USER_ERROR,
};

/// Slice name of [`TodosState`].
pub const TODOS: &str = "todos";
/// Slice name of [`UserState`].
pub const USER: &str = "user";

/// Kind of [`AppAction::AddTodo`].
pub const ADD_TODO: &str = "ADD_TODO";
/// Kind of [`AppAction::RemoveTodo`].
pub const REMOVE_TODO: &str = "REMOVE_TODO";
/// Kind of [`AppAction::FetchUserRequest`].
pub const FETCH_USER_REQUEST: &str = "FETCH_USER_REQUEST";
/// Kind of [`AppAction::FetchUserSuccess`].
pub const FETCH_USER_SUCCESS: &str = "FETCH_USER_SUCCESS";
/// Kind of [`AppAction::FetchUserFailure`].
pub const FETCH_USER_FAILURE: &str = "FETCH_USER_FAILURE";

/// Every transition the demo application knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    AddTodo(Todo),
    RemoveTodo(u64),
    FetchUserRequest,
    FetchUserSuccess(User),
    FetchUserFailure(String),
}

impl Action for AppAction {
    fn kind(&self) -> &str {
        match self {
            AppAction::AddTodo(_) => ADD_TODO,
            AppAction::RemoveTodo(_) => REMOVE_TODO,
            AppAction::FetchUserRequest => FETCH_USER_REQUEST,
            AppAction::FetchUserSuccess(_) => FETCH_USER_SUCCESS,
            AppAction::FetchUserFailure(_) => FETCH_USER_FAILURE,
        }
    }
}

/// The store type used by the demo application.
pub type AppStore = Store<CombinedState, AppAction>;

/// The `todos` and `user` slices combined.
pub fn root_reducer() -> Result<CombinedReducer<AppAction>, StoreError> {
    CombinedReducer::new()
        .with_slice(TODOS, todos_reducer)?
        .with_slice(USER, user_reducer)
}

/// A thunk-enabled store over [`root_reducer`].
///
/// # Arguments
///
/// * `spawner` - Runs [`fetch_user`] and any other dispatched thunk
pub fn build_store<Sp>(spawner: Sp) -> Result<AppStore, StoreError>
where
    Sp: Spawner + Send + Sync + 'static,
{
    Ok(Store::with_thunk(root_reducer()?, spawner))
}

/// The `todos` slice of a root state.
pub fn select_todos(state: &CombinedState) -> Option<Arc<TodosState>> {
    state.get(TODOS)
}

/// The `user` slice of a root state.
pub fn select_user(state: &CombinedState) -> Option<Arc<UserState>> {
    state.get(USER)
}
