use tracing::debug;

use super::error_handling::BoardError;
use super::validation::{ImagePolicy, ImageRejection, InputValidator};
use crate::domain::tag::{normalize_tag_input, split_tags};
use crate::domain::{AnnouncementForm, ImageFile};

const MISSING_FIELDS: &str = "Please enter title and content";

/// Form state of the "new announcement" dialog.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementComposer {
    title: String,
    content: String,
    tags: String,
    images: Vec<ImageFile>,
    dialog_open: bool,
    policy: ImagePolicy,
}

impl AnnouncementComposer {
    pub fn new(policy: ImagePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn open(&mut self) {
        self.dialog_open = true;
    }

    /// Hide the dialog. Typed fields and selected images are kept.
    pub fn close(&mut self) {
        self.dialog_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.dialog_open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Tag input as normalised on the last edit.
    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_tags(&mut self, raw: &str) {
        self.tags = normalize_tag_input(raw);
    }

    /// Accept the files that pass the image policy and append them to the
    /// current selection. Rejected files are returned, one entry each.
    pub fn add_files(&mut self, files: Vec<ImageFile>) -> Vec<ImageRejection> {
        let mut rejected = Vec::new();
        for file in files {
            match self.policy.check(&file) {
                Ok(()) => {
                    debug!(name = %file.name, size = file.size(), "Image accepted");
                    self.images.push(file);
                }
                Err(rejection) => rejected.push(rejection),
            }
        }
        rejected
    }

    /// Drop the selected image at `index`, if any.
    pub fn remove_file(&mut self, index: usize) -> Option<ImageFile> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn clear_files(&mut self) {
        self.images.clear();
    }

    pub fn selection_summary(&self) -> Option<String> {
        match self.images.len() {
            0 => None,
            1 => Some("1 image selected".to_string()),
            n => Some(format!("{} images selected", n)),
        }
    }

    /// Validated multipart payload. Title and content are sent trimmed; tags
    /// lose their empty segments.
    pub fn build_form(&self) -> Result<AnnouncementForm, BoardError> {
        let title = InputValidator::require_text("title", &self.title, MISSING_FIELDS)?;
        let content = InputValidator::require_text("content", &self.content, MISSING_FIELDS)?;

        Ok(AnnouncementForm {
            title,
            content,
            tags: split_tags(&self.tags).join(","),
            images: self.images.clone(),
        })
    }

    /// Empty every field and close the dialog.
    pub fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
        self.tags.clear();
        self.images.clear();
        self.dialog_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn png(name: &str, size: usize) -> ImageFile {
        ImageFile::new(name, "image/png", vec![0; size])
    }

    #[test]
    fn test_missing_title_or_content() {
        let mut composer = AnnouncementComposer::default();
        composer.set_content("body");
        let err = composer.build_form().unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);

        composer.set_title("Title");
        composer.set_content("   ");
        assert!(composer.build_form().is_err());
    }

    #[test]
    fn test_tags_normalised_while_typing() {
        let mut composer = AnnouncementComposer::default();
        composer.set_tags("school trip, ");
        assert_eq!(composer.tags(), "schooltrip,");

        composer.set_title(" Trip ");
        composer.set_content("Bring lunch");
        let form = composer.build_form().unwrap();
        assert_eq!(form.title, "Trip");
        assert_eq!(form.tags, "schooltrip");
    }

    #[test]
    fn test_rejected_files_do_not_drop_accepted_ones() {
        let mut composer = AnnouncementComposer::default();
        assert!(composer.add_files(vec![png("first.png", 10)]).is_empty());

        let rejected = composer.add_files(vec![
            png("big.png", 6 * MIB),
            ImageFile::new("notes.txt", "text/plain", vec![1]),
            png("second.png", 20),
        ]);

        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].to_string(), "File big.png is too large (max 5MB)");
        assert_eq!(rejected[1].file_name(), "notes.txt");
        let names: Vec<&str> = composer.images().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first.png", "second.png"]);
        assert_eq!(composer.selection_summary().as_deref(), Some("2 images selected"));
    }

    #[test]
    fn test_remove_and_clear_files() {
        let mut composer = AnnouncementComposer::default();
        composer.add_files(vec![png("a.png", 1), png("b.png", 1)]);

        assert_eq!(composer.remove_file(0).map(|f| f.name), Some("a.png".to_string()));
        assert_eq!(composer.remove_file(5), None);
        assert_eq!(composer.selection_summary().as_deref(), Some("1 image selected"));

        composer.clear_files();
        assert_eq!(composer.selection_summary(), None);
    }

    #[test]
    fn test_reset_closes_dialog() {
        let mut composer = AnnouncementComposer::default();
        composer.open();
        composer.set_title("x");
        composer.add_files(vec![png("a.png", 1)]);

        composer.reset();
        assert!(!composer.is_open());
        assert_eq!(composer.title(), "");
        assert!(composer.images().is_empty());
    }
}
