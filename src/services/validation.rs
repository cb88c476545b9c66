use thiserror::Error;

use super::error_handling::BoardError;
use crate::config::ClientConfig;
use crate::domain::ImageFile;

/// Input validation for user-provided form fields
pub struct InputValidator;

impl InputValidator {
    /// Trimmed `value`, or a validation failure carrying `message` when
    /// nothing but whitespace was entered.
    pub fn require_text(field: &str, value: &str, message: &str) -> Result<String, BoardError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(BoardError::validation(field, message));
        }
        Ok(trimmed.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageRejection {
    #[error("File {name} is too large (max {}MB)", .limit / (1024 * 1024))]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("File {name} is not a supported image type")]
    UnsupportedType { name: String, content_type: String },
}

impl ImageRejection {
    pub fn file_name(&self) -> &str {
        match self {
            ImageRejection::TooLarge { name, .. } | ImageRejection::UnsupportedType { name, .. } => {
                name
            }
        }
    }
}

impl From<ImageRejection> for BoardError {
    fn from(rejection: ImageRejection) -> Self {
        BoardError::validation(rejection.file_name().to_string(), rejection.to_string())
    }
}

/// Size limit and content-type allow-list for attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ImagePolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_bytes: config.max_image_bytes,
            allowed_types: config.allowed_image_types.clone(),
        }
    }

    /// Size is checked before type, so an oversized file of the wrong type
    /// is reported as too large.
    pub fn check(&self, file: &ImageFile) -> Result<(), ImageRejection> {
        if file.size() > self.max_bytes {
            return Err(ImageRejection::TooLarge {
                name: file.name.clone(),
                size: file.size(),
                limit: self.max_bytes,
            });
        }
        if !self.allowed_types.iter().any(|t| *t == file.content_type) {
            return Err(ImageRejection::UnsupportedType {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MIB: usize = 1024 * 1024;

    #[test]
    fn test_require_text() {
        assert_eq!(
            InputValidator::require_text("todoText", "  Buy milk ", "empty").unwrap(),
            "Buy milk"
        );
        let err = InputValidator::require_text("todoText", " \t ", "Todo text cannot be empty")
            .unwrap_err();
        assert_eq!(err.to_string(), "Todo text cannot be empty");
    }

    #[rstest]
    #[case("image/jpeg")]
    #[case("image/jpg")]
    #[case("image/png")]
    #[case("image/gif")]
    #[case("image/webp")]
    fn test_allowed_types(#[case] content_type: &str) {
        let policy = ImagePolicy::default();
        let file = ImageFile::new("a", content_type, vec![0; 10]);
        assert!(policy.check(&file).is_ok());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let policy = ImagePolicy::default();
        let exact = ImageFile::new("exact.png", "image/png", vec![0; 5 * MIB]);
        let over = ImageFile::new("over.png", "image/png", vec![0; 5 * MIB + 1]);

        assert!(policy.check(&exact).is_ok());
        let rejection = policy.check(&over).unwrap_err();
        assert_eq!(rejection.to_string(), "File over.png is too large (max 5MB)");
    }

    #[test]
    fn test_size_checked_before_type() {
        let policy = ImagePolicy::default();
        let file = ImageFile::new("huge.pdf", "application/pdf", vec![0; 6 * MIB]);
        assert!(matches!(
            policy.check(&file),
            Err(ImageRejection::TooLarge { .. })
        ));
    }

    #[test]
    fn test_unsupported_type_becomes_validation_error() {
        let policy = ImagePolicy::default();
        let file = ImageFile::new("vector.svg", "image/svg+xml", vec![1]);
        let rejection = policy.check(&file).unwrap_err();

        let error: BoardError = rejection.into();
        assert_eq!(error.to_string(), "File vector.svg is not a supported image type");
        assert!(matches!(error, BoardError::ValidationFailure { field, .. } if field == "vector.svg"));
    }
}
