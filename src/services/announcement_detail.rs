use tracing::{info, warn};

use super::error_handling::BoardError;
use super::notifications::Notifier;
use crate::domain::Announcement;
use crate::repository::announcement_repository::AnnouncementRepository;

/// Where the detail view sends the user after a failed load.
pub const LISTING_PATH: &str = "/announcements";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Announcement),
    Missing,
}

/// What the presentation should do after [`AnnouncementDetail::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Show,
    NavigateBack,
}

impl DetailOutcome {
    /// Path to navigate to, if the view should be left.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            DetailOutcome::Show => None,
            DetailOutcome::NavigateBack => Some(LISTING_PATH),
        }
    }
}

pub struct AnnouncementDetail {
    announcements: AnnouncementRepository,
    state: DetailState,
    selected_image: Option<usize>,
    notifier: Notifier,
}

impl AnnouncementDetail {
    pub fn new(announcements: AnnouncementRepository) -> Self {
        Self {
            announcements,
            state: DetailState::Loading,
            selected_image: None,
            notifier: Notifier::new(),
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn announcement(&self) -> Option<&Announcement> {
        match &self.state {
            DetailState::Loaded(announcement) => Some(announcement),
            _ => None,
        }
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn load(&mut self, id: &str) -> DetailOutcome {
        self.state = DetailState::Loading;
        self.selected_image = None;

        if id.trim().is_empty() {
            return self.missing(id);
        }

        match self.announcements.get(id).await {
            Ok(Some(announcement)) => {
                info!(id = %id, images = announcement.image.len(), "Announcement loaded");
                self.state = DetailState::Loaded(announcement);
                DetailOutcome::Show
            }
            Ok(None) => self.missing(id),
            Err(e) => {
                self.notifier
                    .error("fetch announcement", &e, "Failed to fetch announcement");
                self.state = DetailState::Missing;
                DetailOutcome::NavigateBack
            }
        }
    }

    fn missing(&mut self, id: &str) -> DetailOutcome {
        warn!(id = %id, "Announcement not found");
        let error = BoardError::ServerError {
            endpoint: format!("/api/announcements/{}", id),
            status: 404,
            body: String::new(),
        };
        self.notifier
            .error("fetch announcement", &error, "Announcement not found");
        self.state = DetailState::Missing;
        DetailOutcome::NavigateBack
    }

    /// Open the lightbox on the image at `index`. Out-of-range indexes are
    /// ignored.
    pub fn open_image(&mut self, index: usize) -> bool {
        let count = self.announcement().map_or(0, |a| a.image.len());
        if index >= count {
            return false;
        }
        self.selected_image = Some(index);
        true
    }

    pub fn close_image(&mut self) {
        self.selected_image = None;
    }

    /// URL of the image shown in the lightbox.
    pub fn selected_image(&self) -> Option<String> {
        let index = self.selected_image?;
        self.announcement()
            .and_then(|a| a.image_urls().into_iter().nth(index))
    }

    /// Download one of the loaded announcement's images.
    pub async fn fetch_image(&self, index: usize) -> Result<Vec<u8>, BoardError> {
        let filename = self
            .announcement()
            .and_then(|a| a.image.get(index))
            .ok_or_else(|| BoardError::validation("image", format!("No image at index {}", index)))?;
        self.announcements.fetch_upload(filename).await
    }
}
