//! Data-access core for a todo list backed by a remote record store.
//!
//! # Overview
//! Layers, leaf to root:
//! - `client` / `store`: build, execute and parse the store's four calls.
//! - `mapper`: store rows to `Todo` and back, including id reconciliation.
//! - `repository`: CRUD over `Todo`, resolving rows by scanning the table.
//! - `usecases`: one method per user intent, including toggle.
//! - `app`: the state provider UI bindings talk to.
//! - `stats`: completion counts derived from the current list.
//!
//! # Design
//! - The store is reached only through the `Transport` trait, so every layer
//!   above it runs against scripted transports in tests.
//! - The client-generated `TodoId` is the identity of a todo; the store's
//!   `entry_id` stays inside the repository.
//! - There is no retry policy; a failed call is final for that invocation.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod repository;
pub mod stats;
pub mod store;
pub mod types;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{AppState, TodoApp};
pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::TodoError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use repository::{Repository, TodoRepository};
pub use stats::{calculate_stats, TodoStats};
pub use store::RemoteStore;
pub use types::{Todo, TodoFields, TodoId};
pub use usecases::TodoUseCases;
