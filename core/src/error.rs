//! Error types for the todo data-access stack.
//!
//! # Design
//! Precondition failures (`MissingId`, `EmptyName`) are detected before any
//! I/O and always reach the caller. Remote failures (`NotFound`, `Status`,
//! `Transport`, `Timeout`, `Decode`) are produced by the store client and
//! turned into plain `false` results at the repository boundary for update
//! and delete. `NotFound` carries the domain id that failed to resolve.

use std::time::Duration;

use thiserror::Error;

/// Errors produced anywhere between the state provider and the transport.
#[derive(Debug, Error)]
pub enum TodoError {
    /// An update or delete was requested with an empty id.
    #[error("todo id is required")]
    MissingId,

    /// A todo was submitted with a blank name.
    #[error("todo name cannot be empty")]
    EmptyName,

    /// No store row matched the id, or the store answered 404.
    #[error("todo {id} not found")]
    NotFound { id: String },

    /// The store returned a status other than 200 or 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request payload could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl TodoError {
    /// True for errors raised before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, TodoError::MissingId | TodoError::EmptyName)
    }
}
