//! Domain and wire types for the to-do store.
//!
//! # Design
//! `TodoItem` is what the rest of the client works with. The remote store
//! never sends ids inside the values: the collection is an object keyed by
//! id, so the id is attached while flattening the map (see
//! `TodoClient::parse_list_todos`). The wire types below mirror the store's
//! JSON shapes one to one.

use serde::{Deserialize, Serialize};

/// A single to-do item as held by the state container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Request payload for creating a todo, and for patching its title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Response to a create. `name` is the key the store assigned to the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    pub name: String,
}

/// One value of the collection object returned by a list call. Extra fields
/// written by other clients are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTodo {
    pub title: String,
}
