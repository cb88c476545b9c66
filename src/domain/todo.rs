use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo entry as served by `/api/todo`.
///
/// Only the `isDone`-less schema is modelled; a backend that still sends the
/// flag has it ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub todo_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(todo_text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            todo_text: todo_text.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, todo_text: impl Into<String>) {
        self.todo_text = todo_text.into();
        self.updated_at = Utc::now();
    }
}

/// Display order: newest `created_at` first. Stable, so equal timestamps keep
/// the order the backend returned.
pub fn sort_newest_first(items: &mut [TodoItem]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Body of `PUT /api/todo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo_text: String,
}

/// Body of `PATCH /api/todo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub id: String,
    pub todo_text: String,
}

/// Body of `DELETE /api/todo`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteTodo {
    pub id: String,
}
