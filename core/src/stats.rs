//! Completion statistics derived from a todo list.

use serde::Serialize;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed todos, rounded half up. 0 for an empty list.
    pub completion_rate: u32,
}

pub fn calculate_stats(todos: &[Todo]) -> TodoStats {
    let total = todos.len();
    if total == 0 {
        return TodoStats::default();
    }
    let completed = todos.iter().filter(|t| t.completed).count();
    let completion_rate = ((200 * completed + total) / (2 * total)) as u32;
    TodoStats {
        total,
        completed,
        pending: total - completed,
        completion_rate,
    }
}
