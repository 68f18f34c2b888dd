//! Stateless HTTP request builder and response parser for the to-do store.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `RequestClient` joins the two halves around a `Transport`.
//!
//! The store addresses the whole collection as `/todos.json` and one item as
//! `/todos/{id}.json`. Every request carries a JSON content type; bodies are
//! only sent on create and update.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Created, NewTodo, StoredTodo, TodoItem};

/// Characters that may not appear raw inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the to-do store.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    /// Sends `{ "title": ... }` so the new title is persisted remotely.
    pub fn build_update_todo(&self, id: &str, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Patch, self.item_url(id), Some(body)))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    /// Flatten the store's `{ key: { title } }` object into items, keeping the
    /// order the keys arrive in. A `null` body is an empty collection.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response)?;
        let map: Option<serde_json::Map<String, serde_json::Value>> = decode(&response.body)?;
        map.unwrap_or_default()
            .into_iter()
            .map(|(id, value)| {
                let stored: StoredTodo = serde_json::from_value(value)
                    .map_err(|e| ApiError::DeserializationError(format!("todo {id}: {e}")))?;
                Ok(TodoItem {
                    id,
                    title: stored.title,
                })
            })
            .collect()
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Created, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The store echoes whatever fields were written; nothing in it is needed.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> String {
        format!("{}/todos.json", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{}.json", self.base_url, utf8_percent_encode(id, SEGMENT))
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn encode(input: &NewTodo) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
