pub mod announcement_repository;
pub mod member_repository;
pub mod request_client;
pub mod todo_repository;
pub mod transport;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::services::error_handling::BoardError;

pub use request_client::RequestClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

#[derive(Clone)]
pub struct Repository {
    pub client: RequestClient,
    pub todos: todo_repository::TodoRepository,
    pub announcements: announcement_repository::AnnouncementRepository,
    pub members: member_repository::MemberRepository,
}

impl Repository {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        let client = RequestClient::new(transport);
        Self {
            todos: todo_repository::TodoRepository::new(
                client.clone(),
                config.list_timeout,
                config.mutation_timeout,
            ),
            announcements: announcement_repository::AnnouncementRepository::new(
                client.clone(),
                config.list_timeout,
                config.tag_timeout,
                config.mutation_timeout,
            ),
            members: member_repository::MemberRepository::new(client.clone(), config.list_timeout),
            client,
        }
    }

    /// Repository talking HTTP to `config.backend_url`.
    pub fn connect(config: &ClientConfig) -> Result<Self, BoardError> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }
}
