//! In-memory document store - the default backend.
//!
//! One `RwLock`ed map per collection, mirroring the find-one / find-many /
//! replace-by-id / delete-by-filter surface of the Mongo adapter.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::domain::{EventLog, Post, Profile, User};
use ripple_core::error::RepoError;
use ripple_core::ports::{
    EventLogRepository, PostQuery, PostRepository, ProfileRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryPostRepository {
    collection: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(post: &Post, query: &PostQuery) -> bool {
    if let Some(name) = &query.name {
        if post.name != *name {
            return false;
        }
    }
    if let Some(start) = query.start_date {
        if post.created_at < start {
            return false;
        }
    }
    if let Some(end) = query.end_date {
        if post.created_at > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let collection = self.collection.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| collection.get(id).cloned())
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let collection = self.collection.read().await;
        let mut posts: Vec<Post> = collection.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let collection = self.collection.read().await;
        let mut posts: Vec<Post> = collection
            .values()
            .filter(|post| matches(post, query))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut collection = self.collection.write().await;
        collection.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut collection = self.collection.write().await;
        collection.remove(&id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        let mut collection = self.collection.write().await;
        let mut deleted = 0;
        for id in ids {
            if collection.remove(id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    collection: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection
            .values()
            .find(|profile| profile.user_id == user_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Profile>, RepoError> {
        let collection = self.collection.read().await;
        let mut profiles: Vec<Profile> = collection.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn save(&self, profile: Profile) -> Result<Profile, RepoError> {
        let mut collection = self.collection.write().await;
        collection.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut collection = self.collection.write().await;
        collection.remove(&id);
        Ok(())
    }
}

/// Event logs are unique per recipient, so the map is keyed by user id.
#[derive(Default)]
pub struct InMemoryEventLogRepository {
    collection: RwLock<HashMap<Uuid, EventLog>>,
}

impl InMemoryEventLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventLogRepository for InMemoryEventLogRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<EventLog>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection.get(&user_id).cloned())
    }

    async fn save(&self, log: EventLog) -> Result<EventLog, RepoError> {
        let mut collection = self.collection.write().await;
        collection.insert(log.user_id, log.clone());
        Ok(log)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    collection: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let collection = self.collection.read().await;
        Ok(collection
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut collection = self.collection.write().await;
        collection.insert(user.id, user.clone());
        Ok(user)
    }
}
