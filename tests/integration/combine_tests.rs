use std::sync::Arc;

use oxide_thunk::app::{self, Todo};
use oxide_thunk::{create_test_spawner, CombinedReducer, Reducer, StoreError};
use proptest::prelude::*;

use super::{count_reducer, given_a_plain_store, sets_seen_reducer, TestAction, TestModel, COUNT, SETS_SEEN};

#[test]
fn given_a_duplicate_slice_name_should_be_rejected() {
    let result = CombinedReducer::new()
        .with_slice(COUNT, count_reducer)
        .and_then(|reducer| reducer.with_slice(COUNT, sets_seen_reducer));

    assert!(matches!(result, Err(StoreError::DuplicateSlice(COUNT))));
}

#[test]
fn given_an_action_one_slice_ignores_should_leave_that_slice_identical() {
    let test = given_a_plain_store();
    let before = test.store.get_state().get::<u32>(SETS_SEEN).unwrap();

    test.store.dispatch(TestAction::Increment).unwrap();

    let state = test.store.get_state();
    let after = state.get::<u32>(SETS_SEEN).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(state.get::<TestModel>(COUNT).unwrap().count, 1);
}

#[test]
fn given_an_action_both_slices_handle_should_update_each_independently() {
    let test = given_a_plain_store();

    test.store.dispatch(TestAction::Set(9)).unwrap();
    test.store.dispatch(TestAction::Set(2)).unwrap();

    let state = test.store.get_state();
    assert_eq!(state.get::<TestModel>(COUNT).unwrap().count, 2);
    assert_eq!(*state.get::<u32>(SETS_SEEN).unwrap(), 2);
}

#[test]
fn given_the_wrong_type_should_not_return_a_slice() {
    let state = given_a_plain_store().store.get_state();

    assert!(state.get::<String>(COUNT).is_none());
    assert!(state.get::<TestModel>("missing").is_none());
    assert!(state.contains(COUNT));
    assert_eq!(state.names().collect::<Vec<_>>(), vec![COUNT, SETS_SEEN]);
}

#[test]
fn given_a_state_without_a_newly_added_slice_should_fill_it_in() {
    let small = CombinedReducer::new().with_slice(COUNT, count_reducer).unwrap();
    let large = CombinedReducer::new()
        .with_slice(COUNT, count_reducer)
        .and_then(|reducer| reducer.with_slice(SETS_SEEN, sets_seen_reducer))
        .unwrap();

    let previous = small.reduce(None, Some(&TestAction::Increment));
    let next = large.reduce(Some(&previous), Some(&TestAction::Noop));

    assert!(!Arc::ptr_eq(&previous, &next));
    assert_eq!(next.get::<TestModel>(COUNT).unwrap().count, 1);
    assert_eq!(*next.get::<u32>(SETS_SEEN).unwrap(), 0);
}

proptest! {
    #[test]
    fn todos_keep_dispatch_order_minus_removed(ops in prop::collection::vec((any::<bool>(), 0u64..5), 0..40)) {
        let store = app::build_store(create_test_spawner()).unwrap();
        let mut expected: Vec<Todo> = Vec::new();

        for (n, (is_add, id)) in ops.into_iter().enumerate() {
            if is_add {
                let todo = Todo::new(id, format!("todo {n}"));
                expected.push(todo.clone());
                store.dispatch(app::add_todo(todo)).unwrap();
            } else {
                expected.retain(|todo| todo.id != id);
                store.dispatch(app::remove_todo(id)).unwrap();
            }
        }

        let todos = app::select_todos(&store.get_state()).unwrap();
        prop_assert_eq!(&todos.todos, &expected);
    }
}
