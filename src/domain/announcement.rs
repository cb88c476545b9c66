use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::ImageFile;

/// How many thumbnails a listing card shows.
pub const PREVIEW_IMAGE_LIMIT: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Stored upload filenames, served from `/api/uploads/<name>`
    #[serde(default)]
    pub image: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            image: Vec::new(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn image_urls(&self) -> Vec<String> {
        self.image.iter().map(|name| upload_path(name)).collect()
    }

    pub fn preview_urls(&self) -> Vec<String> {
        self.image
            .iter()
            .take(PREVIEW_IMAGE_LIMIT)
            .map(|name| upload_path(name))
            .collect()
    }
}

/// Client-side path of a stored upload.
pub fn upload_path(filename: &str) -> String {
    format!("/api/uploads/{}", filename)
}

/// Everything `POST /api/announcements` needs, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementForm {
    pub title: String,
    pub content: String,
    /// Comma-joined, normalised tag list
    pub tags: String,
    pub images: Vec<ImageFile>,
}

impl AnnouncementForm {
    /// Multipart field name of the image at `index`.
    pub fn image_field(index: usize) -> String {
        format!("image{}", index)
    }
}
