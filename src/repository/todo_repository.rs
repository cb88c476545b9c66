use serde_json::json;
use std::time::Duration;
use tracing::instrument;

use super::request_client::RequestClient;
use super::transport::{ApiRequest, Method};
use crate::domain::todo::{sort_newest_first, TodoItem};
use crate::services::error_handling::BoardError;

#[derive(Clone)]
pub struct TodoRepository {
    client: RequestClient,
    list_timeout: Duration,
    mutation_timeout: Duration,
}

impl TodoRepository {
    pub fn new(client: RequestClient, list_timeout: Duration, mutation_timeout: Duration) -> Self {
        Self {
            client,
            list_timeout,
            mutation_timeout,
        }
    }

    /// All todos, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<TodoItem>, BoardError> {
        let mut todos: Vec<TodoItem> = self
            .client
            .fetch_json(&ApiRequest::get(["todo"]), self.list_timeout)
            .await?;
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    #[instrument(skip(self))]
    pub async fn create(&self, todo_text: &str) -> Result<(), BoardError> {
        let request =
            ApiRequest::new(Method::Put, ["todo"]).with_json(json!({ "todoText": todo_text }));
        self.client.execute(&request, self.mutation_timeout).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, todo_text: &str) -> Result<(), BoardError> {
        let request = ApiRequest::new(Method::Patch, ["todo"])
            .with_json(json!({ "id": id, "todoText": todo_text }));
        self.client.execute(&request, self.mutation_timeout).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), BoardError> {
        let request = ApiRequest::new(Method::Delete, ["todo"]).with_json(json!({ "id": id }));
        self.client.execute(&request, self.mutation_timeout).await?;
        Ok(())
    }
}
