use std::collections::VecDeque;
use tracing::info;

use super::error_handling::{BoardError, ErrorKind, LogHelper, UserErrorFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient toast for the presentation layer to show once.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub cause: Option<ErrorKind>,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Per-view queue of notices, drained by whoever renders them.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(message = %message, "Notice");
        self.queue.push_back(Notice {
            level: NoticeLevel::Success,
            message,
            cause: None,
        });
    }

    /// Record a failed `action`. `fallback` is the user text used when the
    /// error has no wording of its own.
    pub fn error(&mut self, action: &str, error: &BoardError, fallback: &str) {
        match error {
            BoardError::ValidationFailure { field, message } => {
                LogHelper::log_validation_failure(field, message)
            }
            _ => LogHelper::log_request_failure(action, error),
        }
        self.queue.push_back(Notice {
            level: NoticeLevel::Error,
            message: UserErrorFormatter::format_for_ui(error, fallback),
            cause: Some(error.kind()),
        });
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }
}
