//! Pub/Sub port - abstraction over pub/sub backends.
//!
//! Delivery is best-effort fan-out: no replay, no persistence for
//! disconnected subscribers.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// Channel carrying new comments for a post. Subscribers interested in one
/// post subscribe to its channel.
pub fn comment_channel(post_id: Uuid) -> String {
    format!("posts:{post_id}:comments")
}

/// Message received from a channel.
#[derive(Debug, Clone)]
pub struct PubSubMessage {
    pub channel: String,
    pub payload: String,
}

/// Handler for incoming messages. Returns whether the subscription should
/// stay alive; `false` tears the listener down. Boxed so the trait stays
/// object-safe and services can hold `Arc<dyn PubSub>`.
pub type MessageHandler =
    Box<dyn Fn(PubSubMessage) -> Pin<Box<dyn Future<Output = bool> + Send>> + Send + Sync>;

/// Pub/Sub trait - abstraction over pub/sub backends.
#[async_trait]
pub trait PubSub: Send + Sync {
    /// Publish a message to a channel.
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), PubSubError>;

    /// Subscribe to a channel with a handler.
    async fn subscribe(&self, channel: &str, handler: MessageHandler) -> Result<(), PubSubError>;

    /// Unsubscribe from a channel.
    async fn unsubscribe(&self, channel: &str) -> Result<(), PubSubError>;
}

/// Pub/Sub errors.
#[derive(Debug, thiserror::Error)]
pub enum PubSubError {
    #[error("Failed to publish: {0}")]
    Publish(String),

    #[error("Failed to subscribe: {0}")]
    Subscribe(String),

    #[error("Connection error: {0}")]
    Connection(String),
}
