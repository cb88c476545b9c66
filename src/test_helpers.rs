// Test helpers for integration testing

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::domain::tag::{collect_vocabulary, split_tags};
use crate::domain::todo::{CreateTodo, DeleteTodo, UpdateTodo};
use crate::domain::{Announcement, Member, TodoItem};
use crate::repository::transport::{ApiRequest, ApiResponse, FormPart, Method, RequestBody, Transport};
use crate::repository::Repository;
use crate::services::error_handling::BoardError;

/// A stateful stand-in for the REST backend, speaking the same `/api`
/// routes. Calls are recorded; per-route delays and failures can be injected.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

#[derive(Default)]
struct BackendState {
    todos: Vec<TodoItem>,
    announcements: Vec<Announcement>,
    uploads: HashMap<String, Vec<u8>>,
    members: Vec<Member>,
    calls: Vec<RecordedCall>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, Failure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
enum Failure {
    Status(u16),
    Network,
    Garbage,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(self, todos: Vec<TodoItem>) -> Self {
        self.state.lock().todos = todos;
        self
    }

    pub fn with_announcements(self, announcements: Vec<Announcement>) -> Self {
        self.state.lock().announcements = announcements;
        self
    }

    pub fn with_members(self, members: Vec<Member>) -> Self {
        self.state.lock().members = members;
        self
    }

    pub fn with_upload(self, filename: &str, bytes: Vec<u8>) -> Self {
        self.state.lock().uploads.insert(filename.to_string(), bytes);
        self
    }

    /// Delay every call whose path equals `path`.
    pub fn set_delay(&self, path: &str, delay: Duration) {
        self.state.lock().delays.insert(path.to_string(), delay);
    }

    pub fn clear_delay(&self, path: &str) {
        self.state.lock().delays.remove(path);
    }

    pub fn fail_with_status(&self, path: &str, status: u16) {
        self.state
            .lock()
            .failures
            .insert(path.to_string(), Failure::Status(status));
    }

    pub fn fail_with_network_error(&self, path: &str) {
        self.state.lock().failures.insert(path.to_string(), Failure::Network);
    }

    pub fn respond_with_garbage(&self, path: &str) {
        self.state.lock().failures.insert(path.to_string(), Failure::Garbage);
    }

    pub fn clear_failure(&self, path: &str) {
        self.state.lock().failures.remove(path);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    pub fn todos(&self) -> Vec<TodoItem> {
        self.state.lock().todos.clone()
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.state.lock().announcements.clone()
    }

    /// Repository wired to this backend with the given config's timeouts.
    pub fn repository(&self, config: &ClientConfig) -> Repository {
        Repository::new(Arc::new(self.clone()), config)
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
        let mut state = self.state.lock();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["todo"]) => ok(&state.todos),
            (Method::Put, ["todo"]) => match decode::<CreateTodo>(&request.body) {
                Some(body) => {
                    let todo = TodoItem::new(body.todo_text);
                    state.todos.push(todo.clone());
                    ApiResponse::json(201, &json!(todo))
                }
                None => bad_request(),
            },
            (Method::Patch, ["todo"]) => match decode::<UpdateTodo>(&request.body) {
                Some(body) => match state.todos.iter_mut().find(|t| t.id == body.id) {
                    Some(todo) => {
                        todo.rename(body.todo_text);
                        ok(&*todo)
                    }
                    None => not_found(),
                },
                None => bad_request(),
            },
            (Method::Delete, ["todo"]) => match decode::<DeleteTodo>(&request.body) {
                Some(body) => {
                    let before = state.todos.len();
                    state.todos.retain(|t| t.id != body.id);
                    if state.todos.len() == before {
                        not_found()
                    } else {
                        ApiResponse::new(204, Vec::new())
                    }
                }
                None => bad_request(),
            },
            (Method::Get, ["announcements"]) => {
                let tag = request.query_value("tag").filter(|t| !t.is_empty());
                let mut matching: Vec<Announcement> = state
                    .announcements
                    .iter()
                    .filter(|a| tag.map_or(true, |t| a.has_tag(t)))
                    .cloned()
                    .collect();
                matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                ok(&matching)
            }
            (Method::Get, ["announcements", "tags"]) => {
                let vocabulary =
                    collect_vocabulary(state.announcements.iter().map(|a| a.tags.as_slice()));
                ok(&vocabulary)
            }
            (Method::Get, ["announcements", id]) => {
                match state.announcements.iter().find(|a| a.id == *id) {
                    Some(announcement) => ok(announcement),
                    None => not_found(),
                }
            }
            (Method::Post, ["announcements"]) => match &request.body {
                RequestBody::Multipart(parts) => create_announcement(&mut state, parts),
                _ => bad_request(),
            },
            (Method::Get, ["uploads", filename]) => match state.uploads.get(*filename) {
                Some(bytes) => ApiResponse::new(200, bytes.clone()),
                None => not_found(),
            },
            (Method::Get, ["members"]) => ok(&state.members),
            _ => not_found(),
        }
    }
}

#[async_trait]
impl Transport for InMemoryBackend {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, BoardError> {
        let path = request.path();
        let (delay, failure) = {
            let mut state = self.state.lock();
            state.calls.push(RecordedCall {
                method: request.method,
                path: path.clone(),
                query: request.query.clone(),
                body: request.body.clone(),
            });
            (state.delays.get(&path).copied(), state.failures.get(&path).cloned())
        };

        if let Some(delay) = delay {
            sleep(delay).await;
        }

        match failure {
            Some(Failure::Status(status)) => Ok(ApiResponse::new(status, b"injected failure".to_vec())),
            Some(Failure::Network) => Err(BoardError::NetworkFailure {
                endpoint: path,
                message: "connection refused".to_string(),
            }),
            Some(Failure::Garbage) => Ok(ApiResponse::new(200, b"<html>oops</html>".to_vec())),
            None => Ok(self.route(request)),
        }
    }
}

fn create_announcement(state: &mut BackendState, parts: &[FormPart]) -> ApiResponse {
    let mut fields = HashMap::new();
    let mut images = Vec::new();
    for part in parts {
        match part {
            FormPart::Text { name, value } => {
                fields.insert(name.as_str(), value.clone());
            }
            FormPart::File { file, .. } => images.push(file),
        }
    }

    let title = fields.get("title").cloned().unwrap_or_default();
    let content = fields.get("content").cloned().unwrap_or_default();
    if title.is_empty() || content.is_empty() {
        return bad_request();
    }
    let tags = split_tags(fields.get("tags").map(String::as_str).unwrap_or(""));

    let mut announcement = Announcement::new(title, content, tags);
    for image in images {
        let stored = format!("{}-{}", Uuid::new_v4(), image.name);
        state.uploads.insert(stored.clone(), image.bytes.clone());
        announcement.image.push(stored);
    }
    announcement.updated_at = Utc::now();
    state.announcements.push(announcement.clone());

    ApiResponse::json(201, &json!(announcement))
}

fn decode<T: serde::de::DeserializeOwned>(body: &RequestBody) -> Option<T> {
    match body {
        RequestBody::Json(value) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

fn ok<T: Serialize + ?Sized>(value: &T) -> ApiResponse {
    ApiResponse::json(200, &json!(value))
}

fn not_found() -> ApiResponse {
    ApiResponse::json(404, &json!({ "error": "Not found" }))
}

fn bad_request() -> ApiResponse {
    ApiResponse::json(400, &json!({ "error": "Bad request" }))
}

/// Config with short timeouts so timeout paths run quickly in tests.
pub fn fast_config() -> ClientConfig {
    ClientConfig::default().with_timeouts(
        Duration::from_millis(200),
        Duration::from_millis(200),
        Duration::from_millis(200),
    )
}

pub fn sample_member(fullname: &str, nickname: &str, code: &str) -> Member {
    Member {
        id: Uuid::new_v4().to_string(),
        fullname: fullname.to_string(),
        code: code.to_string(),
        nickname: nickname.to_string(),
        image_url: format!("https://example.com/{}.png", code),
    }
}

/// Announcement with `created_at` shifted `minutes_ago` into the past.
pub fn sample_announcement(title: &str, tags: &[&str], minutes_ago: i64) -> Announcement {
    let mut announcement = Announcement::new(
        title,
        format!("{} details", title),
        tags.iter().map(|t| t.to_string()).collect(),
    );
    announcement.created_at = Utc::now() - chrono::Duration::minutes(minutes_ago);
    announcement.updated_at = announcement.created_at;
    announcement
}

/// Todo with `created_at` shifted `minutes_ago` into the past.
pub fn sample_todo(text: &str, minutes_ago: i64) -> TodoItem {
    let mut todo = TodoItem::new(text);
    todo.created_at = Utc::now() - chrono::Duration::minutes(minutes_ago);
    todo.updated_at = todo.created_at;
    todo
}
