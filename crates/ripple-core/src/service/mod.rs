//! Aggregate services. Each owns one aggregate's operations and receives
//! its dependencies explicitly through its constructor.

mod notify;
mod post;
mod profile;

pub use notify::NotificationService;
pub use post::{CommentAdded, PostService, SEARCH_PAGE_SIZE};
pub use profile::ProfileService;
