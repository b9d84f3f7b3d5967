//! Conversion between store rows and domain todos.
//!
//! A store row looks like `{"entry_id": ..., "data": {...fields}}`. The
//! domain id of a row is `data.identification_number` when present and
//! non-empty, otherwise the row's `entry_id`. Every read goes through
//! `reconciled_id`, and update/delete locate their row with
//! `resolve_entry_id`, which applies the same rule.

use serde_json::Value;

use crate::types::{Todo, TodoFields, TodoId};

/// Build a `Todo` from a raw store row. Never fails: a malformed row yields
/// a todo with a fresh id, an empty name and `completed == false`.
pub fn from_wire_record(record: &Value) -> Todo {
    let data = record.get("data");

    let id = reconciled_id(record).map(TodoId::from).unwrap_or_else(TodoId::generate);
    let name = field(data, "name").and_then(Value::as_str).unwrap_or_default().to_string();
    // Only a literal JSON `true` marks a todo done.
    let completed = matches!(field(data, "completed"), Some(Value::Bool(true)));

    Todo { id, name, completed }
}

/// The field set stored for `todo`.
pub fn to_wire_model(todo: &Todo) -> TodoFields {
    TodoFields {
        id: todo.id.to_string(),
        identification_number: todo.id.to_string(),
        name: todo.name.clone(),
        completed: todo.completed,
    }
}

/// The store's own row id, if the record carries one.
pub fn entry_id(record: &Value) -> Option<String> {
    record.get("entry_id").and_then(id_text)
}

/// `identification_number ?? entry_id`.
pub fn reconciled_id(record: &Value) -> Option<String> {
    record
        .get("data")
        .and_then(|d| d.get("identification_number"))
        .and_then(id_text)
        .or_else(|| entry_id(record))
}

/// Scan `records` for the row whose reconciled id is `id` and return its
/// `entry_id`.
pub fn resolve_entry_id(records: &[Value], id: &TodoId) -> Option<String> {
    records
        .iter()
        .find(|record| reconciled_id(record).as_deref() == Some(id.as_str()))
        .and_then(entry_id)
}

fn field<'a>(data: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    data.and_then(|d| d.get(name))
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
