//! Domain types for the todo list.
//!
//! # Design
//! `TodoId` is the client-visible identifier. It is generated on the client
//! when a todo is created and stored in the row's `identification_number`
//! field, so it stays stable even though the store assigns its own
//! `entry_id`. The store's row id never appears in these types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-visible todo identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh identifier for a todo created on this client.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// A new, pending todo with a client-generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TodoId::generate(),
            name: name.into(),
            completed: false,
        }
    }
}

/// Field set written into a store row's `data` object.
///
/// `id` and `identification_number` always carry the same value so readers
/// of the row can use either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub id: String,
    pub identification_number: String,
    pub name: String,
    pub completed: bool,
}
