//! Container state and the reducer that moves it.
//!
//! Every change to `TodoState` goes through `reduce`, a pure function of the
//! prior state and one `Action`.

use crate::types::TodoItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<TodoItem>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append one item. An item whose id is already present replaces the
    /// existing entry in place, so ids stay unique.
    Add(TodoItem),
    Remove { id: String },
    Update { id: String, title: String },
    /// Replace the whole collection.
    Replace(Vec<TodoItem>),
    ShowLoader,
    HideLoader,
    ShowError(String),
    ClearError,
}

pub fn reduce(mut state: TodoState, action: Action) -> TodoState {
    match action {
        Action::Add(item) => match state.todos.iter_mut().find(|t| t.id == item.id) {
            Some(existing) => *existing = item,
            None => state.todos.push(item),
        },
        Action::Remove { id } => state.todos.retain(|t| t.id != id),
        Action::Update { id, title } => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) {
                todo.title = title;
            }
        }
        Action::Replace(todos) => state.todos = todos,
        Action::ShowLoader => state.loading = true,
        Action::HideLoader => state.loading = false,
        Action::ShowError(message) => state.error = Some(message),
        Action::ClearError => state.error = None,
    }
    state
}
