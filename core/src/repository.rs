//! Collection-style CRUD over domain todos.
//!
//! # Design
//! The repository is the logging boundary. Remote failures on update and
//! delete are logged and reported as `Ok(false)`; only the missing-id
//! precondition comes back as `Err`. `add` and `list` return typed errors so
//! the caller decides what the user sees.
//!
//! The store cannot look rows up by domain id, so update and delete first
//! list the whole table to find the row's `entry_id` and then issue the
//! mutating call. Nothing makes that pair atomic: a concurrent writer can
//! move or replace the row in between, and the last write wins.

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::TodoError;
use crate::http::Transport;
use crate::mapper;
use crate::store::RemoteStore;
use crate::types::{Todo, TodoId};

#[async_trait]
pub trait Repository: Send + Sync {
    /// Every todo, in the order the store returned them.
    async fn list(&self) -> Result<Vec<Todo>, TodoError>;

    /// Persist `todo` and hand back the client-side entity.
    async fn add(&self, todo: &Todo) -> Result<Todo, TodoError>;

    async fn update(&self, todo: &Todo) -> Result<bool, TodoError>;

    async fn delete(&self, id: &TodoId) -> Result<bool, TodoError>;

    /// Delete every row in the table. `Ok(true)` only if all deletes succeeded.
    async fn delete_all(&self) -> Result<bool, TodoError>;
}

/// `Repository` backed by the remote record store.
#[derive(Debug, Clone)]
pub struct TodoRepository<T> {
    store: RemoteStore<T>,
}

impl<T: Transport> TodoRepository<T> {
    pub fn new(config: &StoreConfig, transport: T) -> Self {
        Self {
            store: RemoteStore::new(config, transport),
        }
    }

    async fn resolve(&self, id: &TodoId) -> Result<String, TodoError> {
        let records = self.store.list_records().await?;
        mapper::resolve_entry_id(&records, id).ok_or_else(|| TodoError::NotFound { id: id.to_string() })
    }
}

#[async_trait]
impl<T: Transport> Repository for TodoRepository<T> {
    async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let records = self.store.list_records().await.inspect_err(|e| {
            tracing::warn!(error = %e, "listing todos failed");
        })?;
        Ok(records.iter().map(mapper::from_wire_record).collect())
    }

    async fn add(&self, todo: &Todo) -> Result<Todo, TodoError> {
        self.store
            .create_record(&mapper::to_wire_model(todo))
            .await
            .inspect_err(|e| tracing::warn!(id = %todo.id, error = %e, "adding todo failed"))?;
        tracing::debug!(id = %todo.id, "todo added");
        Ok(todo.clone())
    }

    async fn update(&self, todo: &Todo) -> Result<bool, TodoError> {
        if todo.id.is_empty() {
            return Err(TodoError::MissingId);
        }
        let result: Result<(), TodoError> = async {
            let entry_id = self.resolve(&todo.id).await?;
            tracing::debug!(id = %todo.id, %entry_id, "updating todo");
            self.store.update_record(&entry_id, &mapper::to_wire_model(todo)).await
        }
        .await;
        Ok(settle("update", &todo.id, result))
    }

    async fn delete(&self, id: &TodoId) -> Result<bool, TodoError> {
        if id.is_empty() {
            return Err(TodoError::MissingId);
        }
        let result: Result<(), TodoError> = async {
            let entry_id = self.resolve(id).await?;
            tracing::debug!(%id, %entry_id, "deleting todo");
            self.store.delete_record(&entry_id).await
        }
        .await;
        Ok(settle("delete", id, result))
    }

    async fn delete_all(&self) -> Result<bool, TodoError> {
        let records = match self.store.list_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "listing todos for bulk delete failed");
                return Ok(false);
            }
        };
        let mut all_deleted = true;
        for entry_id in records.iter().filter_map(mapper::entry_id) {
            if let Err(e) = self.store.delete_record(&entry_id).await {
                tracing::warn!(%entry_id, error = %e, "bulk delete skipped a row");
                all_deleted = false;
            }
        }
        Ok(all_deleted)
    }
}

fn settle(operation: &str, id: &TodoId, result: Result<(), TodoError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%id, error = %e, "{operation} failed");
            false
        }
    }
}
