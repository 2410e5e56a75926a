use std::sync::Arc;

use super::AppAction;

/// A single entry of the todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub text: String,
}

impl Todo {
    /// Create a todo.
    ///
    /// # Arguments
    ///
    /// * `id` - Caller-chosen identifier, not required to be unique
    /// * `text` - The description shown to the user
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// The `todos` slice: entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodosState {
    pub todos: Vec<Todo>,
}

pub fn add_todo(todo: Todo) -> AppAction {
    AppAction::AddTodo(todo)
}

pub fn remove_todo(id: u64) -> AppAction {
    AppAction::RemoveTodo(id)
}

/// `ADD_TODO` appends; `REMOVE_TODO` drops every todo with a matching id.
pub fn todos_reducer(state: Option<&Arc<TodosState>>, action: Option<&AppAction>) -> Arc<TodosState> {
    let state = state.cloned().unwrap_or_default();

    match action {
        Some(AppAction::AddTodo(todo)) => {
            let mut todos = Vec::with_capacity(state.todos.len() + 1);
            todos.extend(state.todos.iter().cloned());
            todos.push(todo.clone());
            Arc::new(TodosState { todos })
        }
        Some(AppAction::RemoveTodo(id)) => {
            if !state.todos.iter().any(|todo| todo.id == *id) {
                return state;
            }
            let todos = state
                .todos
                .iter()
                .filter(|todo| todo.id != *id)
                .cloned()
                .collect();
            Arc::new(TodosState { todos })
        }
        _ => state,
    }
}
