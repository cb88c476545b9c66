use std::time::Duration;
use tracing::{debug, instrument};

use super::request_client::RequestClient;
use super::transport::{ApiRequest, FormPart, Method};
use crate::domain::{Announcement, AnnouncementForm};
use crate::services::error_handling::BoardError;

#[derive(Clone)]
pub struct AnnouncementRepository {
    client: RequestClient,
    list_timeout: Duration,
    tag_timeout: Duration,
    mutation_timeout: Duration,
}

impl AnnouncementRepository {
    pub fn new(
        client: RequestClient,
        list_timeout: Duration,
        tag_timeout: Duration,
        mutation_timeout: Duration,
    ) -> Self {
        Self {
            client,
            list_timeout,
            tag_timeout,
            mutation_timeout,
        }
    }

    /// Announcements, optionally scoped server-side to one tag. An empty tag
    /// means no scoping.
    #[instrument(skip(self))]
    pub async fn list(&self, tag: Option<&str>) -> Result<Vec<Announcement>, BoardError> {
        let mut request = ApiRequest::get(["announcements"]);
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            request = request.with_query("tag", tag);
        }
        self.client.fetch_json(&request, self.list_timeout).await
    }

    /// One announcement; `None` when the backend answers 404.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<Announcement>, BoardError> {
        let request = ApiRequest::get(["announcements", id]);
        match self.client.fetch_json(&request, self.mutation_timeout).await {
            Ok(announcement) => Ok(Some(announcement)),
            Err(e) if e.is_not_found() => {
                debug!(id = %id, "Announcement not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Full tag vocabulary, independent of any selected filter.
    #[instrument(skip(self))]
    pub async fn tags(&self) -> Result<Vec<String>, BoardError> {
        let request = ApiRequest::get(["announcements", "tags"]);
        self.client.fetch_json(&request, self.tag_timeout).await
    }

    #[instrument(skip(self, form), fields(title = %form.title, images = form.images.len()))]
    pub async fn create(&self, form: &AnnouncementForm) -> Result<Announcement, BoardError> {
        let mut parts = vec![
            FormPart::text("title", form.title.clone()),
            FormPart::text("content", form.content.clone()),
            FormPart::text("tags", form.tags.clone()),
        ];
        for (index, file) in form.images.iter().enumerate() {
            parts.push(FormPart::File {
                name: AnnouncementForm::image_field(index),
                file: file.clone(),
            });
        }

        let request = ApiRequest::new(Method::Post, ["announcements"]).with_multipart(parts);
        self.client.fetch_json(&request, self.mutation_timeout).await
    }

    /// Raw bytes of a stored upload.
    #[instrument(skip(self))]
    pub async fn fetch_upload(&self, filename: &str) -> Result<Vec<u8>, BoardError> {
        let request = ApiRequest::get(["uploads", filename]);
        let response = self.client.execute(&request, self.mutation_timeout).await?;
        Ok(response.body)
    }
}
