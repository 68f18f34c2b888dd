//! In-memory stand-in for the remote to-do store.
//!
//! Speaks the same JSON-over-REST contract as the hosted store: the whole
//! collection lives at `/todos.json` as an object keyed by generated ids, and
//! single items are addressed as `/todos/{id}.json`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The value stored under each key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct NewTodo {
    pub title: String,
}

/// Response to a create: the key the store assigned.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub name: String,
}

/// Partial update. Fields that are absent are left alone; the response echoes
/// exactly the fields that were written.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PatchTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_seq: u64,
    todos: BTreeMap<String, StoredTodo>,
}

impl Store {
    /// Keys sort in insertion order: a zero-padded sequence number followed by
    /// a random tail so keys are not guessable from each other.
    fn next_key(&mut self) -> String {
        self.next_seq += 1;
        let tail = Uuid::new_v4().simple().to_string();
        format!("-{:010}{}", self.next_seq, &tail[..10])
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos.json", get(list_todos).post(create_todo))
        .route("/todos/{file}", patch(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// `abc.json` -> `abc`. Anything without the suffix is not a store location.
fn todo_key(file: &str) -> Result<&str, StatusCode> {
    match file.strip_suffix(".json") {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_todos(State(db): State<Db>) -> Json<BTreeMap<String, StoredTodo>> {
    let store = db.read().await;
    Json(store.todos.clone())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<NewTodo>) -> Json<Created> {
    let mut store = db.write().await;
    let name = store.next_key();
    store.todos.insert(name.clone(), StoredTodo { title: input.title });
    tracing::info!(key = %name, "created todo");
    Json(Created { name })
}

async fn update_todo(
    State(db): State<Db>,
    Path(file): Path<String>,
    Json(input): Json<PatchTodo>,
) -> Result<Json<PatchTodo>, StatusCode> {
    let key = todo_key(&file)?;
    let mut store = db.write().await;
    let todo = store.todos.get_mut(key).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = &input.title {
        todo.title = title.clone();
    }
    tracing::info!(key, "patched todo");
    Ok(Json(input))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let key = todo_key(&file)?;
    let removed = db.write().await.todos.remove(key);
    tracing::info!(key, existed = removed.is_some(), "deleted todo");
    Ok(Json(serde_json::Value::Null))
}
