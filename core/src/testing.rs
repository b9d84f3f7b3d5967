//! Test doubles for the `Transport` seam.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::error::TodoError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TodoError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, err: TodoError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TodoError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TodoError::Transport("no scripted reply".to_string())))
    }
}

/// Never answers.
pub(crate) struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TodoError> {
        std::future::pending().await
    }
}

/// A list response body with one row per `(entry_id, identification_number, name, completed)`.
pub(crate) fn list_body(rows: &[(&str, &str, &str, bool)]) -> String {
    let data: Vec<_> = rows
        .iter()
        .map(|(entry_id, id, name, completed)| {
            json!({
                "entry_id": entry_id,
                "data": {"id": id, "identification_number": id, "name": name, "completed": completed}
            })
        })
        .collect();
    json!({ "data": data }).to_string()
}
