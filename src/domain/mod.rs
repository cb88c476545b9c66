pub mod announcement;
pub mod image;
pub mod member;
pub mod tag;
pub mod todo;

pub use announcement::{Announcement, AnnouncementForm};
pub use image::ImageFile;
pub use member::Member;
pub use todo::TodoItem;
