//! Application state provider: the single owner of the UI-facing todo state.
//!
//! # Design
//! `TodoApp` publishes an `AppState` snapshot through a `watch` channel. UI
//! bindings read it with `state()` or follow it with `subscribe()`; only
//! `TodoApp` writes it.
//!
//! Every operation follows the same protocol: mark `loading`, run the use
//! case, resync the whole list from the store on success, or record a fixed
//! user-facing message on failure. `loading` is cleared by a drop guard, so
//! it also clears when the caller drops the operation's future (timeout or
//! cancellation). Deletes remove the todo locally as soon as the store
//! confirms, then resync on a best-effort basis.

use std::fmt::Display;

use serde::Serialize;
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::error::TodoError;
use crate::http::ReqwestTransport;
use crate::repository::{Repository, TodoRepository};
use crate::stats::{calculate_stats, TodoStats};
use crate::types::{Todo, TodoId};
use crate::usecases::TodoUseCases;

/// User-facing failure messages, one per operation kind.
pub mod messages {
    pub const FETCH_FAILED: &str = "Failed to fetch todos.";
    pub const CREATE_FAILED: &str = "Failed to create todo.";
    pub const UPDATE_FAILED: &str = "Failed to update todo.";
    pub const TOGGLE_FAILED: &str = "Failed to toggle todo completion.";
    pub const DELETE_FAILED: &str = "Failed to delete todo.";
    pub const CLEAR_FAILED: &str = "Failed to clear todos.";
    pub const EMPTY_NAME: &str = "Todo name cannot be empty.";
}

/// Snapshot of everything the list screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: TodoStats,
}

struct LoadingGuard<'a> {
    state: &'a watch::Sender<AppState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<AppState>) -> Self {
        state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

pub struct TodoApp<R> {
    use_cases: TodoUseCases<R>,
    state: watch::Sender<AppState>,
}

impl TodoApp<TodoRepository<ReqwestTransport>> {
    /// An app talking to the store described by `config` over HTTP.
    pub fn connect(config: &StoreConfig) -> Result<Self, TodoError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(TodoRepository::new(config, transport)))
    }
}

impl<R: Repository> TodoApp<R> {
    pub fn new(repository: R) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            use_cases: TodoUseCases::new(repository),
            state,
        }
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.clone()
    }

    pub fn stats(&self) -> TodoStats {
        self.state.borrow().stats
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replace the local list with the store's current contents.
    pub async fn refresh(&self) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        match self.resync().await {
            Ok(()) => true,
            Err(e) => {
                self.fail(messages::FETCH_FAILED, &e);
                false
            }
        }
    }

    /// Create a pending todo named `name`. Returns the created entity.
    pub async fn add(&self, name: &str) -> Option<Todo> {
        let _loading = LoadingGuard::start(&self.state);
        let name = name.trim();
        if name.is_empty() {
            self.fail(messages::EMPTY_NAME, &TodoError::EmptyName);
            return None;
        }
        match self.use_cases.add_todo(&Todo::new(name)).await {
            Ok(todo) => {
                self.resync_or_report().await;
                Some(todo)
            }
            Err(e) => {
                self.fail(messages::CREATE_FAILED, &e);
                None
            }
        }
    }

    pub async fn update(&self, id: &TodoId, name: &str, completed: bool) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        let name = name.trim();
        if name.is_empty() {
            self.fail(messages::EMPTY_NAME, &TodoError::EmptyName);
            return false;
        }
        let todo = Todo {
            id: id.clone(),
            name: name.to_string(),
            completed,
        };
        let outcome = self.use_cases.update_todo(&todo).await;
        self.settle(outcome, messages::UPDATE_FAILED).await
    }

    pub async fn toggle(&self, id: &TodoId) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        let outcome = self.use_cases.toggle_todo_complete(id).await;
        self.settle(outcome, messages::TOGGLE_FAILED).await
    }

    pub async fn delete(&self, id: &TodoId) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        match self.use_cases.delete_todo(id).await {
            Ok(true) => {
                let mut todos = self.todos();
                todos.retain(|t| &t.id != id);
                self.set_todos(todos);
                if let Err(e) = self.resync().await {
                    tracing::warn!(%id, error = %e, "resync after delete failed");
                }
                true
            }
            Ok(false) => {
                self.fail(messages::DELETE_FAILED, &"store did not confirm the delete");
                false
            }
            Err(e) => {
                self.fail(messages::DELETE_FAILED, &e);
                false
            }
        }
    }

    /// Delete every todo in the table.
    pub async fn clear_all(&self) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        let cleared = match self.use_cases.clear_todos().await {
            Ok(true) => true,
            Ok(false) => {
                self.fail(messages::CLEAR_FAILED, &"some rows were not deleted");
                false
            }
            Err(e) => {
                self.fail(messages::CLEAR_FAILED, &e);
                false
            }
        };
        if let Err(e) = self.resync().await {
            tracing::warn!(error = %e, "resync after clear failed");
        }
        cleared
    }

    async fn settle(&self, outcome: Result<bool, TodoError>, message: &str) -> bool {
        match outcome {
            Ok(true) => {
                self.resync_or_report().await;
                true
            }
            Ok(false) => {
                self.fail(message, &"store did not confirm the change");
                false
            }
            Err(e) => {
                self.fail(message, &e);
                false
            }
        }
    }

    async fn resync(&self) -> Result<(), TodoError> {
        let todos = self.use_cases.get_todos().await?;
        self.set_todos(todos);
        Ok(())
    }

    async fn resync_or_report(&self) {
        if let Err(e) = self.resync().await {
            self.fail(messages::FETCH_FAILED, &e);
        }
    }

    fn set_todos(&self, todos: Vec<Todo>) {
        let stats = calculate_stats(&todos);
        self.state.send_modify(|s| {
            s.todos = todos;
            s.stats = stats;
        });
    }

    fn fail(&self, message: &str, cause: &dyn Display) {
        tracing::error!(cause = %cause, "{message}");
        self.state.send_modify(|s| s.error = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::testing::{list_body, ScriptedTransport, StalledTransport};

    fn config() -> StoreConfig {
        StoreConfig::with_base_url("http://store.test")
    }

    fn scripted(transport: &Arc<ScriptedTransport>) -> TodoApp<TodoRepository<Arc<ScriptedTransport>>> {
        TodoApp::new(TodoRepository::new(&config(), transport.clone()))
    }

    #[tokio::test]
    async fn refresh_loads_todos_and_stats() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(200, &list_body(&[("r1", "a", "A", true), ("r2", "b", "B", false)])),
        );
        let app = scripted(&transport);
        assert!(app.refresh().await);

        let state = app.state();
        assert_eq!(state.todos.len(), 2);
        assert_eq!(state.stats.completion_rate, 50);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn refresh_failure_sets_fetch_message() {
        let transport = Arc::new(ScriptedTransport::new().respond(500, "boom"));
        let app = scripted(&transport);
        assert!(!app.refresh().await);
        assert_eq!(app.error().as_deref(), Some(messages::FETCH_FAILED));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_io() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = scripted(&transport);
        assert!(app.add("   ").await.is_none());
        assert_eq!(app.error().as_deref(), Some(messages::EMPTY_NAME));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn add_failure_keeps_list_and_reports() {
        let transport = Arc::new(ScriptedTransport::new().respond(500, "nope"));
        let app = scripted(&transport);
        assert!(app.add("Buy milk").await.is_none());
        assert_eq!(app.error().as_deref(), Some(messages::CREATE_FAILED));
        assert!(app.todos().is_empty());
    }

    #[tokio::test]
    async fn add_resyncs_after_create() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, "{}")
                .respond(200, &list_body(&[("r1", "x", "Buy milk", false)])),
        );
        let app = scripted(&transport);
        let created = app.add("  Buy milk ").await.unwrap();
        assert_eq!(created.name, "Buy milk");
        assert!(!created.completed);
        assert_eq!(app.todos().len(), 1);
        assert_eq!(app.stats().pending, 1);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn add_succeeds_even_if_resync_fails() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, "{}"));
        let app = scripted(&transport);
        assert!(app.add("Buy milk").await.is_some());
        assert_eq!(app.error().as_deref(), Some(messages::FETCH_FAILED));
    }

    #[tokio::test]
    async fn update_with_empty_id_reports_without_io() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = scripted(&transport);
        assert!(!app.update(&TodoId::default(), "name", false).await);
        assert_eq!(app.error().as_deref(), Some(messages::UPDATE_FAILED));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn toggle_of_missing_id_reports_failure() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, &list_body(&[("r1", "a", "A", false)])));
        let app = scripted(&transport);
        assert!(!app.toggle(&TodoId::from("zzz")).await);
        assert_eq!(app.error().as_deref(), Some(messages::TOGGLE_FAILED));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn toggle_success_resyncs() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, &list_body(&[("r1", "a", "A", false)]))
                .respond(200, &list_body(&[("r1", "a", "A", false)]))
                .respond(200, "{}")
                .respond(200, &list_body(&[("r1", "a", "A", true)])),
        );
        let app = scripted(&transport);
        assert!(app.toggle(&TodoId::from("a")).await);
        assert!(app.todos()[0].completed);
        assert_eq!(app.stats().completed, 1);
    }

    #[tokio::test]
    async fn delete_removes_locally_even_if_resync_fails() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, &list_body(&[("r1", "a", "A", false), ("r2", "b", "B", true)]))
                .respond(200, &list_body(&[("r1", "a", "A", false), ("r2", "b", "B", true)]))
                .respond(200, "")
                .respond(503, "down"),
        );
        let app = scripted(&transport);
        assert!(app.refresh().await);
        assert!(app.delete(&TodoId::from("b")).await);

        let state = app.state();
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].id.as_str(), "a");
        assert_eq!(state.stats.total, 1);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn delete_failure_keeps_local_state() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, &list_body(&[("r1", "a", "A", false)]))
                .respond(200, &list_body(&[("r1", "a", "A", false)]))
                .respond(500, "boom"),
        );
        let app = scripted(&transport);
        assert!(app.refresh().await);
        assert!(!app.delete(&TodoId::from("a")).await);
        assert_eq!(app.todos().len(), 1);
        assert_eq!(app.error().as_deref(), Some(messages::DELETE_FAILED));
    }

    #[tokio::test]
    async fn new_operation_clears_previous_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(500, "boom")
                .respond(200, &list_body(&[])),
        );
        let app = scripted(&transport);
        assert!(!app.refresh().await);
        assert!(app.error().is_some());
        assert!(app.refresh().await);
        assert_eq!(app.error(), None);
    }

    #[tokio::test]
    async fn subscribers_see_published_state() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, &list_body(&[("r1", "a", "A", false)])));
        let app = scripted(&transport);
        let mut updates = app.subscribe();
        assert!(app.refresh().await);
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().todos.len(), 1);
    }

    #[tokio::test]
    async fn dropping_an_operation_clears_loading() {
        let app = TodoApp::new(TodoRepository::new(&config(), StalledTransport));
        let id = TodoId::from("a");

        let mut toggle = Box::pin(app.toggle(&id));
        let timed_out = tokio::time::timeout(Duration::from_millis(50), toggle.as_mut()).await;
        assert!(timed_out.is_err());
        assert!(app.is_loading());

        drop(toggle);
        assert!(!app.is_loading());
    }
}
