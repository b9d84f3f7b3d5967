//! One entry point per user intent, orchestrating `Repository` calls.

use crate::error::TodoError;
use crate::repository::Repository;
use crate::types::{Todo, TodoId};

#[derive(Debug, Clone)]
pub struct TodoUseCases<R> {
    repository: R,
}

impl<R: Repository> TodoUseCases<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.repository.list().await
    }

    pub async fn add_todo(&self, todo: &Todo) -> Result<Todo, TodoError> {
        self.repository.add(todo).await
    }

    pub async fn update_todo(&self, todo: &Todo) -> Result<bool, TodoError> {
        self.repository.update(todo).await
    }

    /// Read the current list, flip `completed` on the matching todo and write
    /// it back. Not atomic: two toggles racing on the same id can both read
    /// the same value, so one flip is lost.
    pub async fn toggle_todo_complete(&self, id: &TodoId) -> Result<bool, TodoError> {
        let todos = self.repository.list().await?;
        let Some(mut todo) = todos.into_iter().find(|t| &t.id == id) else {
            tracing::debug!(%id, "toggle target not found");
            return Ok(false);
        };
        todo.completed = !todo.completed;
        self.repository.update(&todo).await
    }

    pub async fn delete_todo(&self, id: &TodoId) -> Result<bool, TodoError> {
        self.repository.delete(id).await
    }

    pub async fn clear_todos(&self) -> Result<bool, TodoError> {
        self.repository.delete_all().await
    }
}
