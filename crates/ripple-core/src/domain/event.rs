use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of activity a notification entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Like,
    Comment,
}

/// Per-user notification log. One document per recipient, lazily created
/// on the first notification; entries are prepended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Most-recent-first.
    pub events: Vec<EventEntry>,
    pub created_at: DateTime<Utc>,
}

impl EventLog {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether an unread entry for (post, kind) exists. An unread entry
    /// suppresses further notifications for the same activity.
    pub fn has_unread(&self, post_id: Uuid, kind: EventKind) -> bool {
        self.events
            .iter()
            .any(|e| e.post_id == post_id && e.kind == kind && !e.is_read)
    }
}

/// A single notification entry referencing the post it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    pub post_id: Uuid,
    pub kind: EventKind,
    pub description: String,
    pub is_read: bool,
    pub date: DateTime<Utc>,
}

impl EventEntry {
    pub fn new(post_id: Uuid, kind: EventKind, description: String) -> Self {
        Self {
            post_id,
            kind,
            description,
            is_read: false,
            date: Utc::now(),
        }
    }
}
