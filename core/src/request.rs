//! The request client: `TodoClient` plus a `Transport`.
//!
//! # Design
//! One method per store operation. Each builds the request, sends it, parses
//! the response and returns the typed result. Failures are logged here and
//! then handed back to the caller unchanged; nothing is swallowed.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewTodo, TodoItem};

#[derive(Debug, Clone)]
pub struct RequestClient<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> RequestClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET the whole collection.
    pub async fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.send("list", self.client.build_list_todos()).await?;
        self.client
            .parse_list_todos(response)
            .inspect_err(|err| failed("list", err))
    }

    /// POST a new item; returns the key the store assigned.
    pub async fn create(&self, title: &str) -> Result<String, ApiError> {
        let request = self
            .client
            .build_create_todo(&NewTodo::new(title))
            .inspect_err(|err| failed("create", err))?;
        let response = self.send("create", request).await?;
        self.client
            .parse_create_todo(response)
            .map(|created| created.name)
            .inspect_err(|err| failed("create", err))
    }

    /// PATCH the title of one item.
    pub async fn update(&self, id: &str, title: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .build_update_todo(id, &NewTodo::new(title))
            .inspect_err(|err| failed("update", err))?;
        let response = self.send("update", request).await?;
        self.client
            .parse_update_todo(response)
            .inspect_err(|err| failed("update", err))
    }

    /// DELETE one item.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send("delete", self.client.build_delete_todo(id)).await?;
        self.client
            .parse_delete_todo(response)
            .inspect_err(|err| failed("delete", err))
    }

    async fn send(&self, operation: &str, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(operation, method = %request.method, path = %request.path, "sending request");
        let response = self
            .transport
            .execute(request)
            .await
            .inspect_err(|err| failed(operation, err))?;
        tracing::debug!(operation, status = response.status, "received response");
        Ok(response)
    }
}

fn failed(operation: &str, err: &ApiError) {
    tracing::warn!(operation, error = %err, "request failed");
}
