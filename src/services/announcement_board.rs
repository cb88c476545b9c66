use tracing::{debug, info, warn};

use super::announcement_composer::AnnouncementComposer;
use super::error_handling::BoardError;
use super::list_store::ListStore;
use super::notifications::Notifier;
use super::tag_filter::{QuickFilterBar, TagFilter};
use super::validation::ImagePolicy;
use crate::domain::{Announcement, ImageFile};
use crate::repository::announcement_repository::AnnouncementRepository;

/// Shown when the create request never got an answer.
const CREATE_UNREACHABLE: &str = "An error occurred while creating announcement";

/// The announcements listing: the tag-scoped list, the tag vocabulary, the
/// tag filter and the composer dialog.
pub struct AnnouncementBoard {
    announcements: AnnouncementRepository,
    list: ListStore<Announcement>,
    tags: ListStore<String>,
    filter: TagFilter,
    composer: AnnouncementComposer,
    notifier: Notifier,
}

impl AnnouncementBoard {
    pub fn new(announcements: AnnouncementRepository, policy: ImagePolicy) -> Self {
        Self {
            announcements,
            list: ListStore::new(),
            tags: ListStore::new(),
            filter: TagFilter::new(),
            composer: AnnouncementComposer::new(policy),
            notifier: Notifier::new(),
        }
    }

    pub fn announcements(&self) -> &[Announcement] {
        self.list.items()
    }

    pub fn list_store(&self) -> &ListStore<Announcement> {
        &self.list
    }

    /// Known tag vocabulary.
    pub fn tags(&self) -> &[String] {
        self.tags.items()
    }

    pub fn tag_store(&self) -> &ListStore<String> {
        &self.tags
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn composer(&self) -> &AnnouncementComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut AnnouncementComposer {
        &mut self.composer
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// Fetch the scoped list and the tag vocabulary concurrently. Only a list
    /// failure is reported to the user.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        let repo = &self.announcements;
        let selected = self.filter.selected_tag().map(str::to_string);

        self.list.begin_refresh();
        self.tags.begin_refresh();
        let (list_result, tag_result) =
            futures::join!(repo.list(selected.as_deref()), repo.tags());

        if let Err(e) = self.tags.finish_refresh(tag_result) {
            warn!(error = %e, "Failed to fetch tags");
        }
        self.apply_list(list_result)
    }

    /// Re-fetch only the announcement list for the current selection.
    pub async fn refresh_list(&mut self) -> Result<(), BoardError> {
        let selected = self.filter.selected_tag().map(str::to_string);
        self.list.begin_refresh();
        let result = self.announcements.list(selected.as_deref()).await;
        self.apply_list(result)
    }

    fn apply_list(&mut self, result: Result<Vec<Announcement>, BoardError>) -> Result<(), BoardError> {
        match self.list.finish_refresh(result) {
            Ok(()) => {
                debug!(
                    count = self.list.len(),
                    tag = self.filter.selected_tag().unwrap_or("-"),
                    "Announcements refreshed"
                );
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .error("fetch announcements", &e, "Failed to fetch announcements");
                Err(e)
            }
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.set_search_text(text);
    }

    pub fn focus_search(&mut self) {
        self.filter.focus_search();
    }

    pub fn close_search(&mut self) {
        self.filter.close_dropdown();
    }

    pub fn visible_tags(&self) -> Vec<String> {
        self.filter.visible_tags(self.tags.items())
    }

    pub fn result_summary(&self) -> Option<String> {
        self.filter.result_summary(self.tags.items())
    }

    pub fn quick_filters(&self) -> QuickFilterBar {
        self.filter.quick_filters(self.tags.items())
    }

    pub fn empty_message(&self) -> String {
        self.filter.empty_message()
    }

    /// Select a tag (from a quick filter or the search results). The list is
    /// re-fetched only when the selection actually changed.
    pub async fn select_tag(&mut self, tag: &str) -> Result<(), BoardError> {
        if self.filter.select(tag) {
            info!(tag = %tag, "Tag filter changed");
            return self.refresh_list().await;
        }
        Ok(())
    }

    /// Filter by whatever was typed into the search box.
    pub async fn apply_search_text(&mut self) -> Result<(), BoardError> {
        if self.filter.apply_search_text() {
            return self.refresh_list().await;
        }
        Ok(())
    }

    /// The "All" control.
    pub async fn clear_tag(&mut self) -> Result<(), BoardError> {
        if self.filter.clear_selection() {
            info!("Tag filter cleared");
            return self.refresh_list().await;
        }
        Ok(())
    }

    /// Add files to the composer, posting one notice per rejected file.
    /// Returns how many were accepted.
    pub fn add_images(&mut self, files: Vec<ImageFile>) -> usize {
        let before = self.composer.images().len();
        for rejection in self.composer.add_files(files) {
            let error = BoardError::from(rejection);
            self.notifier.error("attach image", &error, "Invalid image");
        }
        self.composer.images().len() - before
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageFile> {
        self.composer.remove_file(index)
    }

    /// Submit the composer. On success both the list and the tag vocabulary
    /// are re-fetched, since the new announcement may bring new tags.
    pub async fn create_announcement(&mut self) -> Result<Announcement, BoardError> {
        let form = match self.composer.build_form() {
            Ok(form) => form,
            Err(e) => {
                self.notifier.error("create announcement", &e, "Failed to create announcement");
                return Err(e);
            }
        };

        let created = match self.announcements.create(&form).await {
            Ok(created) => created,
            Err(e) => {
                let fallback = match e {
                    BoardError::NetworkFailure { .. } => CREATE_UNREACHABLE,
                    _ => "Failed to create announcement",
                };
                self.notifier.error("create announcement", &e, fallback);
                return Err(e);
            }
        };

        info!(id = %created.id, images = created.image.len(), "Announcement created");
        self.notifier.success("Announcement created successfully");
        self.composer.reset();
        let _ = self.load().await;
        Ok(created)
    }
}
