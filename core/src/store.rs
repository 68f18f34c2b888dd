//! The to-do state container.
//!
//! # Design
//! `TodoStore` is built once per session and shared by reference. It owns the
//! request client, the container state and the two UI collaborators it
//! drives: a `Navigator` that can close the detail view and a `Confirm`
//! prompt for deletes.
//!
//! Operations take `&self` and may run concurrently. The state lock is held
//! only for one reducer step and never across a request, so overlapping
//! operations interleave and the last dispatch wins.

use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::request::RequestClient;
use crate::state::{reduce, Action, TodoState};
use crate::transport::Transport;
use crate::types::TodoItem;

/// Shown when a create fails.
pub const ADD_FAILED: &str = "Something went wrong...";
/// Shown when a fetch, update or delete fails.
pub const REQUEST_FAILED: &str = "Something went wrong. Please, try again later...";

/// Screen navigation, as far as the container needs it.
pub trait Navigator: Send + Sync {
    /// Leave any open detail view and return to the list.
    fn dismiss_detail(&self);
}

/// The user's answer to a delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Cancel,
    Delete,
}

/// Blocking delete confirmation. Implementations must resolve to one of the
/// two choices; there is no way to dismiss the prompt otherwise.
#[trait_variant::make(Confirm: Send)]
pub trait LocalConfirm {
    async fn confirm_delete(&self, item: &TodoItem) -> Decision;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(TodoItem),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no todo with id {0}")]
    UnknownTodo(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct TodoStore<T, N, C> {
    requests: RequestClient<T>,
    navigator: N,
    confirm: C,
    state: RwLock<TodoState>,
}

impl<T, N, C> TodoStore<T, N, C>
where
    T: Transport,
    N: Navigator,
    C: Confirm,
{
    pub fn new(requests: RequestClient<T>, navigator: N, confirm: C) -> Self {
        Self {
            requests,
            navigator,
            confirm,
            state: RwLock::new(TodoState::default()),
        }
    }

    pub fn requests(&self) -> &RequestClient<T> {
        &self.requests
    }

    /// Snapshot of the whole container state.
    pub async fn state(&self) -> TodoState {
        self.state.read().await.clone()
    }

    pub async fn todos(&self) -> Vec<TodoItem> {
        self.state.read().await.todos.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Create `title` remotely and append it under the id the store assigned.
    pub async fn add_todo(&self, title: &str) -> Result<TodoItem, ApiError> {
        self.dispatch(Action::ClearError).await;

        match self.requests.create(title).await {
            Ok(id) => {
                let item = TodoItem::new(id, title);
                self.dispatch(Action::Add(item.clone())).await;
                Ok(item)
            }
            Err(err) => {
                self.dispatch(Action::ShowError(ADD_FAILED.to_string())).await;
                Err(err)
            }
        }
    }

    /// Ask for confirmation, close the detail view, then delete.
    ///
    /// The navigator is told to dismiss before the DELETE is issued so nothing
    /// on screen refers to the item while the request is in flight. If the
    /// request fails the item is kept.
    pub async fn remove_todo(&self, id: &str) -> Result<RemoveOutcome, StoreError> {
        let item = self
            .state
            .read()
            .await
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownTodo(id.to_string()))?;

        if Confirm::confirm_delete(&self.confirm, &item).await == Decision::Cancel {
            tracing::debug!(id, "delete cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }

        self.dispatch(Action::ClearError).await;
        self.navigator.dismiss_detail();

        match self.requests.delete(id).await {
            Ok(()) => {
                self.dispatch(Action::Remove { id: id.to_string() }).await;
                Ok(RemoveOutcome::Removed(item))
            }
            Err(err) => {
                self.dispatch(Action::ShowError(REQUEST_FAILED.to_string()))
                    .await;
                Err(err.into())
            }
        }
    }

    /// Persist a new title, then apply it locally.
    pub async fn update_todo(&self, id: &str, title: &str) -> Result<(), ApiError> {
        self.dispatch(Action::ClearError).await;

        match self.requests.update(id, title).await {
            Ok(()) => {
                self.dispatch(Action::Update {
                    id: id.to_string(),
                    title: title.to_string(),
                })
                .await;
                Ok(())
            }
            Err(err) => {
                self.dispatch(Action::ShowError(REQUEST_FAILED.to_string()))
                    .await;
                Err(err)
            }
        }
    }

    /// Replace the local collection with the store's. `loading` is set for
    /// the duration of the request and cleared whatever the outcome.
    pub async fn fetch_todos(&self) -> Result<(), ApiError> {
        self.dispatch(Action::ShowLoader).await;
        self.dispatch(Action::ClearError).await;

        let result = match self.requests.list().await {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "fetched todos");
                self.dispatch(Action::Replace(todos)).await;
                Ok(())
            }
            Err(err) => {
                self.dispatch(Action::ShowError(REQUEST_FAILED.to_string()))
                    .await;
                Err(err)
            }
        };

        self.dispatch(Action::HideLoader).await;
        result
    }

    async fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "dispatch");
        let mut state = self.state.write().await;
        *state = reduce(std::mem::take(&mut *state), action);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    type Events = Arc<Mutex<Vec<String>>>;

    type Gate = (Arc<Notify>, Arc<Notify>);

    /// Answers requests from a script and records what was sent. Responses
    /// are taken in the order requests arrive, not the order they complete.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        responses: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
        sent: Arc<Mutex<Vec<HttpRequest>>>,
        events: Events,
        gate: Arc<Mutex<Option<Gate>>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn fail(self, err: ApiError) -> Self {
            self.responses.lock().unwrap().push_back(Err(err));
            self
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }

        /// Hold the next request in flight: `entered` fires once it has
        /// arrived and it completes only after `release` is notified.
        fn hold_next(&self) -> Gate {
            let gate = (Arc::new(Notify::new()), Arc::new(Notify::new()));
            *self.gate.lock().unwrap() = Some(gate.clone());
            gate
        }
    }

    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.events
                .lock()
                .unwrap()
                .push(format!("{} {}", request.method, request.path));
            self.sent.lock().unwrap().push(request);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            let gate = self.gate.lock().unwrap().take();
            if let Some((entered, release)) = gate {
                entered.notify_one();
                release.notified().await;
            }
            response
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        events: Events,
    }

    impl Navigator for RecordingNavigator {
        fn dismiss_detail(&self) {
            self.events.lock().unwrap().push("dismiss".to_string());
        }
    }

    struct ScriptedConfirm {
        decision: Decision,
        asked: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedConfirm {
        fn answering(decision: Decision) -> Self {
            Self {
                decision,
                asked: Arc::default(),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        async fn confirm_delete(&self, item: &TodoItem) -> Decision {
            self.asked.lock().unwrap().push(item.title.clone());
            self.decision
        }
    }

    type TestStore = TodoStore<ScriptedTransport, RecordingNavigator, ScriptedConfirm>;

    const BASE: &str = "https://todos.example.test";

    fn store(transport: ScriptedTransport, decision: Decision) -> TestStore {
        let navigator = RecordingNavigator {
            events: transport.events.clone(),
        };
        TodoStore::new(
            RequestClient::new(BASE, transport),
            navigator,
            ScriptedConfirm::answering(decision),
        )
    }

    /// A store that has already fetched `k1: Buy milk`. The fetch is answered
    /// ahead of anything the caller scripted.
    async fn seeded(transport: ScriptedTransport, decision: Decision) -> TestStore {
        transport
            .responses
            .lock()
            .unwrap()
            .push_front(Ok(HttpResponse::new(200, r#"{"k1":{"title":"Buy milk"}}"#)));
        let store = store(transport, decision);
        store.fetch_todos().await.unwrap();
        store
    }

    #[tokio::test]
    async fn fetch_fills_collection_from_key_map() {
        let transport =
            ScriptedTransport::default().reply(200, r#"{"k1":{"title":"Buy milk"}}"#);
        let store = store(transport, Decision::Cancel);

        store.fetch_todos().await.unwrap();

        let state = store.state().await;
        assert_eq!(state.todos, vec![TodoItem::new("k1", "Buy milk")]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn fetch_shows_loader_while_request_is_in_flight() {
        let transport = ScriptedTransport::default().reply(200, "{}");
        let (entered, release) = transport.hold_next();
        let store = store(transport, Decision::Cancel);
        assert!(!store.loading().await);

        let (result, seen_loading) = tokio::join!(store.fetch_todos(), async {
            entered.notified().await;
            let loading = store.loading().await;
            release.notify_one();
            loading
        });

        result.unwrap();
        assert!(seen_loading);
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn late_fetch_overwrites_update_that_finished_first() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"{"k1":{"title":"Buy milk"}}"#)
            .reply(200, r#"{"title":"Buy bread"}"#);
        let store = seeded(transport.clone(), Decision::Cancel).await;
        let (entered, release) = transport.hold_next();

        let (fetched, during) = tokio::join!(store.fetch_todos(), async {
            entered.notified().await;
            store.update_todo("k1", "Buy bread").await.unwrap();
            let during = store.state().await;
            release.notify_one();
            during
        });

        fetched.unwrap();
        assert_eq!(during.todos, vec![TodoItem::new("k1", "Buy bread")]);
        assert!(during.loading);
        let state = store.state().await;
        assert_eq!(state.todos, vec![TodoItem::new("k1", "Buy milk")]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn overlapping_fetches_end_with_loader_hidden() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"{"a":{"title":"slow"}}"#)
            .reply(200, r#"{"b":{"title":"fast"}}"#);
        let (entered, release) = transport.hold_next();
        let store = store(transport, Decision::Cancel);

        let (slow, (fast, loading_after_fast)) = tokio::join!(store.fetch_todos(), async {
            entered.notified().await;
            let fast = store.fetch_todos().await;
            let loading = store.loading().await;
            release.notify_one();
            (fast, loading)
        });

        slow.unwrap();
        fast.unwrap();
        assert!(!loading_after_fast);
        assert_eq!(store.todos().await, vec![TodoItem::new("a", "slow")]);
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn fetch_twice_yields_the_same_collection() {
        let body = r#"{"a":{"title":"one"},"b":{"title":"two"},"c":{"title":"three"}}"#;
        let transport = ScriptedTransport::default()
            .reply(200, body)
            .reply(200, body);
        let store = store(transport, Decision::Cancel);

        store.fetch_todos().await.unwrap();
        let first = store.todos().await;
        store.fetch_todos().await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(store.todos().await, first);
    }

    #[tokio::test]
    async fn fetch_failure_sets_error_and_clears_loader() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"{"k1":{"title":"Buy milk"}}"#)
            .fail(ApiError::Network("connection refused".to_string()));
        let store = store(transport, Decision::Cancel);
        store.fetch_todos().await.unwrap();

        let err = store.fetch_todos().await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        let state = store.state().await;
        assert_eq!(state.error.as_deref(), Some(REQUEST_FAILED));
        assert!(!state.loading);
        assert_eq!(state.todos, vec![TodoItem::new("k1", "Buy milk")]);
    }

    #[tokio::test]
    async fn fetch_decode_failure_is_reported() {
        let transport = ScriptedTransport::default().reply(200, "<html>");
        let store = store(transport, Decision::Cancel);

        let err = store.fetch_todos().await.unwrap_err();

        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert_eq!(store.error().await.as_deref(), Some(REQUEST_FAILED));
    }

    #[tokio::test]
    async fn add_appends_with_server_assigned_id() {
        let transport = ScriptedTransport::default().reply(200, r#"{"name":"k2"}"#);
        let store = seeded(transport.clone(), Decision::Cancel).await;

        let item = store.add_todo("Walk dog").await.unwrap();

        assert_eq!(item, TodoItem::new("k2", "Walk dog"));
        assert_eq!(
            store.todos().await,
            vec![TodoItem::new("k1", "Buy milk"), TodoItem::new("k2", "Walk dog")]
        );
        let post = &transport.sent()[1];
        assert_eq!(post.method, HttpMethod::Post);
        assert_eq!(post.path, format!("{BASE}/todos.json"));
        assert_eq!(post.body.as_deref(), Some(r#"{"title":"Walk dog"}"#));
    }

    #[tokio::test]
    async fn add_failure_sets_generic_error() {
        let transport = ScriptedTransport::default().reply(500, "boom");
        let store = store(transport, Decision::Cancel);

        let err = store.add_todo("Walk dog").await.unwrap_err();

        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert_eq!(store.error().await.as_deref(), Some(ADD_FAILED));
        assert!(store.todos().await.is_empty());
    }

    #[tokio::test]
    async fn add_clears_previous_error() {
        let transport = ScriptedTransport::default()
            .reply(500, "boom")
            .reply(200, r#"{"name":"k9"}"#);
        let store = store(transport, Decision::Cancel);
        store.add_todo("first").await.unwrap_err();

        store.add_todo("second").await.unwrap();

        assert_eq!(store.error().await, None);
    }

    #[tokio::test]
    async fn update_sends_title_and_applies_it_locally() {
        let transport = ScriptedTransport::default().reply(200, r#"{"title":"Buy bread"}"#);
        let store = seeded(transport.clone(), Decision::Cancel).await;

        store.update_todo("k1", "Buy bread").await.unwrap();

        assert_eq!(store.todos().await, vec![TodoItem::new("k1", "Buy bread")]);
        let patch = &transport.sent()[1];
        assert_eq!(patch.method, HttpMethod::Patch);
        assert_eq!(patch.path, format!("{BASE}/todos/k1.json"));
        assert_eq!(patch.body.as_deref(), Some(r#"{"title":"Buy bread"}"#));
    }

    #[tokio::test]
    async fn update_failure_keeps_old_title() {
        let transport = ScriptedTransport::default().reply(404, "");
        let store = seeded(transport, Decision::Cancel).await;

        let err = store.update_todo("k1", "Buy bread").await.unwrap_err();

        assert_eq!(err, ApiError::NotFound);
        assert_eq!(store.todos().await, vec![TodoItem::new("k1", "Buy milk")]);
        assert_eq!(store.error().await.as_deref(), Some(REQUEST_FAILED));
    }

    #[tokio::test]
    async fn remove_dismisses_detail_before_deleting() {
        let transport = ScriptedTransport::default().reply(200, "null");
        let store = seeded(transport.clone(), Decision::Delete).await;

        let outcome = store.remove_todo("k1").await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Removed(TodoItem::new("k1", "Buy milk")));
        assert!(store.todos().await.is_empty());
        let events = transport.events.lock().unwrap().clone();
        assert_eq!(
            events[1..],
            [
                "dismiss".to_string(),
                format!("DELETE {BASE}/todos/k1.json")
            ]
        );
    }

    #[tokio::test]
    async fn remove_cancelled_touches_nothing() {
        let transport = ScriptedTransport::default();
        let store = seeded(transport.clone(), Decision::Cancel).await;

        let outcome = store.remove_todo("k1").await.unwrap();

        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(store.todos().await.len(), 1);
        assert_eq!(transport.sent().len(), 1);
        assert!(!transport.events.lock().unwrap().contains(&"dismiss".to_string()));
        assert_eq!(*store.confirm.asked.lock().unwrap(), vec!["Buy milk"]);
    }

    #[tokio::test]
    async fn remove_unknown_id_does_not_prompt() {
        let transport = ScriptedTransport::default();
        let store = seeded(transport.clone(), Decision::Delete).await;

        let err = store.remove_todo("ghost").await.unwrap_err();

        assert!(matches!(err, StoreError::UnknownTodo(id) if id == "ghost"));
        assert!(store.confirm.asked.lock().unwrap().is_empty());
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn remove_failure_keeps_item_and_sets_error() {
        let transport = ScriptedTransport::default().reply(503, "unavailable");
        let store = seeded(transport, Decision::Delete).await;

        let err = store.remove_todo("k1").await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::Api(ApiError::HttpError { status: 503, .. })
        ));
        assert_eq!(store.todos().await.len(), 1);
        assert_eq!(store.error().await.as_deref(), Some(REQUEST_FAILED));
    }

    #[tokio::test]
    async fn add_then_remove_issues_one_delete_for_that_id() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"{"name":"k2"}"#)
            .reply(200, "null");
        let store = seeded(transport.clone(), Decision::Delete).await;

        let item = store.add_todo("Walk dog").await.unwrap();
        store.remove_todo(&item.id).await.unwrap();

        assert!(store.todos().await.iter().all(|t| t.id != "k2"));
        let deletes: Vec<String> = transport
            .sent()
            .into_iter()
            .filter(|r| r.method == HttpMethod::Delete)
            .map(|r| r.path)
            .collect();
        assert_eq!(deletes, vec![format!("{BASE}/todos/k2.json")]);
    }
}
