use std::sync::Arc;
use std::time::Duration;

use futures::executor::block_on;
use futures::future::{self, FutureExt};
use mockall::predicate::eq;
use oxide_thunk::app::{
    self, ApiError, AppStore, SimulatedUserApi, Todo, User, UserApi, UserState, FETCH_USER_ERROR,
    SIMULATED_USER_NAME,
};
use oxide_thunk::{CombinedState, QueuedSpawner, Spawner, StateRecorder, ThreadSpawner};

use super::MockUserService;

fn john_doe() -> User {
    User {
        id: 101,
        name: "John Doe".to_string(),
    }
}

fn given_an_app_store<Sp>(spawner: Sp) -> (AppStore, StateRecorder<CombinedState>)
where
    Sp: Spawner + Send + Sync + 'static,
{
    let store = app::build_store(spawner).unwrap();
    let recorder = StateRecorder::new();
    // Dropping the handle leaves the subscription registered.
    let _ = recorder.attach(&store);
    (store, recorder)
}

fn loaded_simulated_user() -> UserState {
    UserState {
        user: Some(User {
            id: 101,
            name: SIMULATED_USER_NAME.to_string(),
        }),
        loading: false,
        error: None,
    }
}

fn user_states(recorder: &StateRecorder<CombinedState>) -> Vec<UserState> {
    recorder.with_states(|states| {
        states
            .iter()
            .map(|state| UserState::clone(&app::select_user(state).unwrap()))
            .collect()
    })
}

#[test]
fn given_a_successful_api_should_move_through_loading_to_loaded() {
    let queue = QueuedSpawner::new();
    let (store, recorder) = given_an_app_store(queue.clone());
    let mut api = MockUserService::new();
    api.expect_fetch_user()
        .with(eq(101))
        .times(1)
        .returning(|_| future::ready(Ok(john_doe())).boxed());

    let pending = store.dispatch(app::fetch_user(Arc::new(api), 101)).unwrap();
    assert_eq!(recorder.count(), 1);

    queue.run_all();
    block_on(pending.into_future());

    assert_eq!(
        user_states(&recorder),
        vec![
            UserState {
                user: None,
                loading: true,
                error: None,
            },
            UserState {
                user: Some(john_doe()),
                loading: false,
                error: None,
            },
        ]
    );
}

#[test]
fn given_a_failing_api_should_record_the_error_and_keep_the_user() {
    let queue = QueuedSpawner::new();
    let (store, recorder) = given_an_app_store(queue.clone());
    store.dispatch(app::fetch_user_success(john_doe())).unwrap();
    let mut api = MockUserService::new();
    api.expect_fetch_user()
        .times(1)
        .returning(|user_id| future::ready(Err(ApiError::Unavailable { user_id })).boxed());

    let pending = store.dispatch(app::fetch_user(Arc::new(api), 7)).unwrap();
    queue.run_all();
    block_on(pending.into_future());

    let states = user_states(&recorder);
    assert_eq!(states.len(), 3);
    assert!(states[1].loading);
    assert_eq!(states[1].error, None);
    assert_eq!(
        states[2],
        UserState {
            user: Some(john_doe()),
            loading: false,
            error: Some(FETCH_USER_ERROR.to_string()),
        }
    );
}

#[test]
fn given_a_fetch_should_leave_todos_untouched() {
    let queue = QueuedSpawner::new();
    let (store, _recorder) = given_an_app_store(queue.clone());
    store.dispatch(app::add_todo(Todo::new(1, "Learn Redux"))).unwrap();
    let todos_before = app::select_todos(&store.get_state()).unwrap();
    let mut api = MockUserService::new();
    api.expect_fetch_user()
        .returning(|_| future::ready(Ok(john_doe())).boxed());

    let pending = store.dispatch(app::fetch_user(Arc::new(api), 101)).unwrap();
    queue.run_all();
    block_on(pending.into_future());

    let todos_after = app::select_todos(&store.get_state()).unwrap();
    assert!(Arc::ptr_eq(&todos_before, &todos_after));
}

#[test]
fn given_a_delayed_api_should_be_loading_when_dispatch_returns() {
    let (store, recorder) = given_an_app_store(ThreadSpawner);
    let api: Arc<dyn UserApi> = Arc::new(SimulatedUserApi::new(Duration::from_millis(50)));

    let pending = store.dispatch(app::fetch_user(api, 101)).unwrap().into_future();

    let user = app::select_user(&store.get_state()).unwrap();
    assert!(user.loading);
    assert_eq!(recorder.count(), 1);

    block_on(pending);

    let user = app::select_user(&store.get_state()).unwrap();
    assert_eq!(*user, loaded_simulated_user());
}

#[test]
fn given_a_dropped_dispatch_result_should_still_settle_the_user() {
    let queue = QueuedSpawner::new();
    let (store, recorder) = given_an_app_store(queue.clone());
    let mut api = MockUserService::new();
    api.expect_fetch_user()
        .times(1)
        .returning(|_| future::ready(Ok(john_doe())).boxed());

    drop(store.dispatch(app::fetch_user(Arc::new(api), 101)).unwrap());
    queue.run_all();

    let user = app::select_user(&store.get_state()).unwrap();
    assert!(!user.loading);
    assert_eq!(user.user, Some(john_doe()));
    assert_eq!(recorder.count(), 2);
}

#[test]
fn given_a_dropped_dispatch_result_with_a_delayed_api_should_settle_in_the_background() {
    let (store, _recorder) = given_an_app_store(ThreadSpawner);
    let (changed, changes) = flume::unbounded();
    let _ = store.subscribe(move || {
        let _ = changed.send(());
    });
    let api: Arc<dyn UserApi> = Arc::new(SimulatedUserApi::new(Duration::from_millis(10)));

    drop(store.dispatch(app::fetch_user(api, 101)).unwrap());

    while app::select_user(&store.get_state()).unwrap().loading {
        changes
            .recv_timeout(Duration::from_secs(2))
            .expect("the user slice settles without anyone awaiting the thunk");
    }

    let user = app::select_user(&store.get_state()).unwrap();
    assert_eq!(*user, loaded_simulated_user());
}

#[test]
fn given_a_failing_simulated_api_should_end_with_the_failure_message() {
    let (store, _recorder) = given_an_app_store(ThreadSpawner);
    let api: Arc<dyn UserApi> = Arc::new(SimulatedUserApi::new(Duration::from_millis(1)).failing());

    block_on(store.dispatch(app::fetch_user(api, 101)).unwrap().into_future());

    let user = app::select_user(&store.get_state()).unwrap();
    assert!(!user.loading);
    assert_eq!(user.user, None);
    assert_eq!(user.error.as_deref(), Some(FETCH_USER_ERROR));
}

#[test]
fn given_the_scripted_todo_sequence_should_leave_only_the_second_todo() {
    let (store, recorder) = given_an_app_store(QueuedSpawner::new());

    store.dispatch(app::add_todo(Todo::new(1, "Learn Redux"))).unwrap();
    store.dispatch(app::add_todo(Todo::new(2, "Build a project"))).unwrap();
    store.dispatch(app::remove_todo(1)).unwrap();

    let todos = app::select_todos(&store.get_state()).unwrap();
    assert_eq!(todos.todos, vec![Todo::new(2, "Build a project")]);
    assert_eq!(recorder.count(), 3);
}
