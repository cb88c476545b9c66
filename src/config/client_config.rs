use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::services::error_handling::BoardError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin that `/api/*` paths are rewritten to
    pub backend_url: String,

    /// Bound for the primary list fetches (todos, announcements, members)
    pub list_timeout: Duration,

    /// Bound for the auxiliary tag vocabulary fetch
    pub tag_timeout: Duration,

    /// Bound for create/update/delete calls and single-entity reads
    pub mutation_timeout: Duration,

    /// Largest accepted image attachment, inclusive
    pub max_image_bytes: u64,

    pub allowed_image_types: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            list_timeout: Duration::from_secs(10),
            tag_timeout: Duration::from_secs(5),
            mutation_timeout: Duration::from_secs(10),
            max_image_bytes: MAX_IMAGE_BYTES,
            allowed_image_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Unset keys keep their
    /// defaults; unparsable numbers are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("URL_BACKEND").filter(|u| !u.trim().is_empty()) {
            config.backend_url = url.trim().to_string();
        }
        if let Some(ms) = parse_u64(&lookup, "BULLETIN_LIST_TIMEOUT_MS") {
            config.list_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "BULLETIN_TAG_TIMEOUT_MS") {
            config.tag_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "BULLETIN_MUTATION_TIMEOUT_MS") {
            config.mutation_timeout = Duration::from_millis(ms);
        }
        if let Some(bytes) = parse_u64(&lookup, "BULLETIN_MAX_IMAGE_BYTES") {
            config.max_image_bytes = bytes;
        }

        config
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_timeouts(mut self, list: Duration, tag: Duration, mutation: Duration) -> Self {
        self.list_timeout = list;
        self.tag_timeout = tag;
        self.mutation_timeout = mutation;
        self
    }

    /// Rewrite an `/api/<segments>` call onto the backend origin.
    /// Each segment is percent-encoded on its own.
    pub fn resolve(&self, segments: &[String]) -> Result<Url, BoardError> {
        let mut url = Url::parse(&self.backend_url).map_err(|e| BoardError::Configuration {
            message: format!("invalid backend URL '{}': {}", self.backend_url, e),
        })?;

        url.path_segments_mut()
            .map_err(|_| BoardError::Configuration {
                message: format!("backend URL '{}' cannot carry a path", self.backend_url),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub fn is_allowed_image_type(&self, content_type: &str) -> bool {
        self.allowed_image_types.iter().any(|t| t == content_type)
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = %key, value = %raw, "Ignoring invalid numeric setting");
            None
        }
    }
}
