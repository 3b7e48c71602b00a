//! Repository ports. These mirror the find-one / find-many / save /
//! delete-by-filter surface of a document store; a save replaces the whole
//! document keyed by its id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{EventLog, Post, Profile, User};
use crate::error::RepoError;

/// Filter for the post search: optional exact-name match and independent
/// date bounds, with limit/skip paging pushed down to the store.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: u64,
    pub skip: u64,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Fetch the subset of `ids` that exist; missing ids are simply absent.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError>;

    /// All posts, most recent first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Insert or replace by id, returning the stored document.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Delete every listed id in one call, returning how many went away.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, RepoError>;

    /// The unique profile owned by `user_id`, if any.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Profile>, RepoError>;

    async fn save(&self, profile: Profile) -> Result<Profile, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// A recipient's log, if one has been created.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<EventLog>, RepoError>;

    async fn save(&self, log: EventLog) -> Result<EventLog, RepoError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn save(&self, user: User) -> Result<User, RepoError>;
}
