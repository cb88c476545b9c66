use std::time::Duration;
use tracing::instrument;

use super::request_client::RequestClient;
use super::transport::ApiRequest;
use crate::domain::Member;
use crate::services::error_handling::BoardError;

#[derive(Clone)]
pub struct MemberRepository {
    client: RequestClient,
    timeout: Duration,
}

impl MemberRepository {
    pub fn new(client: RequestClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Member>, BoardError> {
        self.client
            .fetch_json(&ApiRequest::get(["members"]), self.timeout)
            .await
    }
}
