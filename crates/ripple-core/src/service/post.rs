//! Post aggregate service: CRUD over posts and their embedded comments and
//! likes, plus the notification fan-out to the post owner.
//!
//! The post write always lands first; the companion event-log write and the
//! comment publish are best-effort follow-ups. A failure there is logged
//! and the operation still succeeds (no rollback, at-most-once).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Caller, Comment, EventKind, Like, Post};
use crate::error::{DomainError, ValidationReport};
use crate::input::{CommentInput, PostInput, SearchFilter};
use crate::ports::{PostQuery, PostRepository, PubSub, comment_channel};
use crate::service::NotificationService;
use crate::validate;

/// Search returns at most this many posts per page.
pub const SEARCH_PAGE_SIZE: u64 = 10;

/// Payload published on a post's comment channel when a comment lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAdded {
    pub post_id: Uuid,
    pub comment: Comment,
}

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    notifications: NotificationService,
    pubsub: Arc<dyn PubSub>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        notifications: NotificationService,
        pubsub: Arc<dyn PubSub>,
    ) -> Self {
        Self {
            posts,
            notifications,
            pubsub,
        }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.require(post_id).await
    }

    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Post>, DomainError> {
        let page = filter.page_index()?;
        // The skip offset must not overflow for any page the coercion lets
        // through.
        let skip = page.checked_mul(SEARCH_PAGE_SIZE).ok_or_else(|| {
            let mut report = ValidationReport::new();
            report.push("page", "page is out of range");
            DomainError::Validation(report)
        })?;
        let query = PostQuery {
            name: filter.name.clone(),
            start_date: filter.start_date,
            end_date: filter.end_date,
            limit: SEARCH_PAGE_SIZE,
            skip,
        };
        Ok(self.posts.search(&query).await?)
    }

    pub async fn create(&self, input: PostInput, caller: &Caller) -> Result<Post, DomainError> {
        validate::check(&input)?;
        let post = Post::new(caller, input.text, input.tags);
        Ok(self.posts.save(post).await?)
    }

    pub async fn update(
        &self,
        post_id: Uuid,
        input: PostInput,
        caller: &Caller,
    ) -> Result<Post, DomainError> {
        validate::check(&input)?;
        let mut post = self.require(post_id).await?;
        owned_by(&post, caller)?;
        post.text = input.text;
        Ok(self.posts.save(post).await?)
    }

    /// Delete a post, returning the removed snapshot.
    pub async fn delete(&self, post_id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self.require(post_id).await?;
        owned_by(&post, caller)?;
        self.posts.delete(post_id).await?;
        Ok(post)
    }

    /// Bulk delete. Every target must exist and belong to the caller
    /// before any deletion is issued; the delete itself is one batch call.
    pub async fn delete_many(&self, post_ids: &[Uuid], caller: &Caller) -> Result<u64, DomainError> {
        let posts = self.posts.find_by_ids(post_ids).await?;
        for id in post_ids {
            if !posts.iter().any(|p| p.id == *id) {
                return Err(DomainError::not_found("Post", *id));
            }
        }
        for post in &posts {
            owned_by(post, caller)?;
        }
        Ok(self.posts.delete_many(post_ids).await?)
    }

    /// Idempotent like toggle: no like adds one (and notifies the owner),
    /// an existing like removes it (and retracts the pending event).
    pub async fn toggle_like(&self, post_id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self.require(post_id).await?;
        if post.liked_by(caller.id) {
            self.unlike(post, caller).await
        } else {
            self.like(post, caller).await
        }
    }

    /// Explicit like; fails before any bookkeeping if already liked.
    pub async fn add_like(&self, post_id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self.require(post_id).await?;
        if post.liked_by(caller.id) {
            return Err(DomainError::AlreadyLiked);
        }
        self.like(post, caller).await
    }

    /// Explicit unlike; fails if no like exists.
    pub async fn remove_like(&self, post_id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self.require(post_id).await?;
        if !post.liked_by(caller.id) {
            return Err(DomainError::NotLiked);
        }
        self.unlike(post, caller).await
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        input: CommentInput,
        caller: &Caller,
    ) -> Result<Post, DomainError> {
        validate::check(&input)?;
        let mut post = self.require(post_id).await?;
        let comment = Comment::new(caller, input.text);
        post.comments.insert(0, comment.clone());
        let post = self.posts.save(post).await?;

        self.publish_comment(&post, &comment).await;
        if post.user_id != caller.id {
            let description = comment.text.clone();
            self.record_event(post.user_id, post.id, EventKind::Comment, description)
                .await;
        }
        Ok(post)
    }

    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        input: CommentInput,
        caller: &Caller,
    ) -> Result<Post, DomainError> {
        validate::check(&input)?;
        let mut post = self.require(post_id).await?;
        let comment = post
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::CommentNotFound)?;
        // The comment author, not the post owner, may edit.
        if comment.user_id != caller.id {
            return Err(DomainError::Unauthorized);
        }
        comment.text = input.text;
        Ok(self.posts.save(post).await?)
    }

    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        caller: &Caller,
    ) -> Result<Post, DomainError> {
        let mut post = self.require(post_id).await?;
        let index = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(DomainError::CommentNotFound)?;
        if post.comments[index].user_id != caller.id {
            return Err(DomainError::Unauthorized);
        }
        post.comments.remove(index);
        let post = self.posts.save(post).await?;

        if post.user_id != caller.id {
            self.retract_event(post.user_id, post.id, EventKind::Comment)
                .await;
        }
        Ok(post)
    }

    async fn like(&self, mut post: Post, caller: &Caller) -> Result<Post, DomainError> {
        post.likes.insert(0, Like::new(caller.id));
        let post = self.posts.save(post).await?;
        if post.user_id != caller.id {
            self.record_event(post.user_id, post.id, EventKind::Like, String::new())
                .await;
        }
        Ok(post)
    }

    async fn unlike(&self, mut post: Post, caller: &Caller) -> Result<Post, DomainError> {
        post.likes.retain(|like| like.user_id != caller.id);
        let post = self.posts.save(post).await?;
        if post.user_id != caller.id {
            self.retract_event(post.user_id, post.id, EventKind::Like)
                .await;
        }
        Ok(post)
    }

    async fn require(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }

    async fn record_event(&self, recipient: Uuid, post_id: Uuid, kind: EventKind, desc: String) {
        if let Err(error) = self
            .notifications
            .record_if_absent(recipient, post_id, kind, desc)
            .await
        {
            tracing::warn!(%error, %post_id, "event record failed after post write");
        }
    }

    async fn retract_event(&self, recipient: Uuid, post_id: Uuid, kind: EventKind) {
        if let Err(error) = self.notifications.retract(recipient, post_id, kind).await {
            tracing::warn!(%error, %post_id, "event retract failed after post write");
        }
    }

    async fn publish_comment(&self, post: &Post, comment: &Comment) {
        let payload = CommentAdded {
            post_id: post.id,
            comment: comment.clone(),
        };
        let json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "could not encode comment payload");
                return;
            }
        };
        if let Err(error) = self.pubsub.publish(&comment_channel(post.id), &json).await {
            tracing::warn!(%error, post_id = %post.id, "comment publish failed");
        }
    }
}

fn owned_by(post: &Post, caller: &Caller) -> Result<(), DomainError> {
    if post.user_id != caller.id {
        return Err(DomainError::Unauthorized);
    }
    Ok(())
}
