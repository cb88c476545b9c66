pub mod announcement_board;
pub mod announcement_composer;
pub mod announcement_detail;
pub mod error_handling;
pub mod list_store;
pub mod member_roster;
pub mod notifications;
pub mod tag_filter;
pub mod todo_controller;
pub mod validation;

pub use announcement_board::AnnouncementBoard;
pub use announcement_composer::AnnouncementComposer;
pub use announcement_detail::{AnnouncementDetail, DetailOutcome, DetailState};
pub use error_handling::{BoardError, ErrorKind};
pub use list_store::ListStore;
pub use member_roster::MemberRoster;
pub use notifications::{Notice, NoticeLevel, Notifier};
pub use tag_filter::TagFilter;
pub use todo_controller::{EditMode, EditTarget, TodoController};
pub use validation::{ImagePolicy, ImageRejection};
