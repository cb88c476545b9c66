use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::services::error_handling::{BoardError, LogHelper};

/// Every backend call goes through here: one attempt, bounded by a timeout,
/// with non-2xx statuses and undecodable bodies turned into errors.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request` and return the raw response. When `timeout` elapses the
    /// in-flight call is dropped and [`BoardError::Timeout`] is returned.
    #[instrument(skip(self, request), fields(method = ?request.method, endpoint = %request.path()))]
    pub async fn execute(
        &self,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<ApiResponse, BoardError> {
        let endpoint = request.path();
        let started = Instant::now();

        let response = match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    endpoint = %endpoint,
                    timeout_ms = timeout.as_millis() as u64,
                    "Request cancelled after timeout"
                );
                return Err(BoardError::Timeout { endpoint, timeout });
            }
        };

        LogHelper::log_completed_request(&endpoint, response.status, started.elapsed(), timeout / 2);

        if !response.is_success() {
            warn!(endpoint = %endpoint, status = response.status, "Non-success status");
            return Err(BoardError::ServerError {
                endpoint,
                status: response.status,
                body: response.text(),
            });
        }

        Ok(response)
    }

    /// [`execute`](Self::execute) and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<T, BoardError> {
        let response = self.execute(request, timeout).await?;
        serde_json::from_slice(&response.body).map_err(|e| BoardError::MalformedResponse {
            endpoint: request.path(),
            message: e.to_string(),
        })
    }
}
