//! Client core for the to-do store.
//!
//! # Overview
//! Two layers:
//! - the request client: `TodoClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network, a `Transport`
//!   performs the round-trip, and `RequestClient` joins them with typed
//!   `ApiError` results;
//! - the state container: `TodoStore` holds the to-do collection plus the
//!   loading and error flags, and moves them through the pure `reduce`
//!   function in response to the outcome of each request.
//!
//! `TitleEditor` carries the validation rules of the title edit dialog.

pub mod client;
pub mod editor;
pub mod error;
pub mod http;
pub mod request;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use editor::{validate_title, TitleEditor, ValidationError, MAX_TITLE_LEN, MIN_TITLE_LEN};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::RequestClient;
pub use state::{reduce, Action, TodoState};
pub use store::{
    Confirm, Decision, Navigator, RemoveOutcome, StoreError, TodoStore, ADD_FAILED, REQUEST_FAILED,
};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Created, NewTodo, StoredTodo, TodoItem};
