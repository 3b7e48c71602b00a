use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Caller;

/// Post aggregate: a text post with its embedded likes and comments.
///
/// `name` and `avatar` are a snapshot of the author at creation time;
/// they are not kept in sync with later profile changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub name: String,
    pub avatar: String,
    /// Most-recent-first.
    pub likes: Vec<Like>,
    /// Most-recent-first.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: &Caller, text: String, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: author.id,
            text,
            tags,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` has a like on this post.
    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }
}

/// A single like. At most one per (post, user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A comment embedded in a post, with its own author snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &Caller, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            created_at: Utc::now(),
        }
    }
}
