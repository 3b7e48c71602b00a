//! Notification event bookkeeping: one event log per recipient, with a
//! dedup window keyed by (post, kind) while an entry stays unread.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{EventEntry, EventKind, EventLog};
use crate::error::DomainError;
use crate::ports::EventLogRepository;

#[derive(Clone)]
pub struct NotificationService {
    logs: Arc<dyn EventLogRepository>,
}

impl NotificationService {
    pub fn new(logs: Arc<dyn EventLogRepository>) -> Self {
        Self { logs }
    }

    /// Prepend an unread entry for (recipient, post, kind) unless one is
    /// already pending unread. Lazily creates the recipient's log.
    pub async fn record_if_absent(
        &self,
        recipient: Uuid,
        post_id: Uuid,
        kind: EventKind,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        let mut log = self
            .logs
            .find_by_user(recipient)
            .await?
            .unwrap_or_else(|| EventLog::new(recipient));

        if log.has_unread(post_id, kind) {
            tracing::debug!(%recipient, %post_id, ?kind, "unread entry pending, skipping");
            return Ok(());
        }

        log.events
            .insert(0, EventEntry::new(post_id, kind, description.into()));
        self.logs.save(log).await?;
        Ok(())
    }

    /// Best-effort removal of the first (post, kind) entry. A miss is not
    /// an error: the entry may have been read away or never recorded.
    pub async fn retract(
        &self,
        recipient: Uuid,
        post_id: Uuid,
        kind: EventKind,
    ) -> Result<(), DomainError> {
        let Some(mut log) = self.logs.find_by_user(recipient).await? else {
            return Ok(());
        };

        if let Some(index) = log
            .events
            .iter()
            .position(|e| e.post_id == post_id && e.kind == kind)
        {
            log.events.remove(index);
            self.logs.save(log).await?;
        }
        Ok(())
    }

    /// Mark every (post, kind) entry read, closing the dedup window.
    pub async fn mark_read(
        &self,
        recipient: Uuid,
        post_id: Uuid,
        kind: EventKind,
    ) -> Result<(), DomainError> {
        let Some(mut log) = self.logs.find_by_user(recipient).await? else {
            return Ok(());
        };

        let mut changed = false;
        for entry in log
            .events
            .iter_mut()
            .filter(|e| e.post_id == post_id && e.kind == kind && !e.is_read)
        {
            entry.is_read = true;
            changed = true;
        }
        if changed {
            self.logs.save(log).await?;
        }
        Ok(())
    }

    /// The recipient's log, if any notifications have ever been recorded.
    pub async fn events_for(&self, user_id: Uuid) -> Result<Option<EventLog>, DomainError> {
        Ok(self.logs.find_by_user(user_id).await?)
    }
}
