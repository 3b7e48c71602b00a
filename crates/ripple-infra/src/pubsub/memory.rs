//! In-process pub/sub over tokio broadcast channels.
//!
//! Best-effort fan-out within a single process: no replay, and lagging
//! subscribers drop messages.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use ripple_core::ports::{MessageHandler, PubSub, PubSubError, PubSubMessage};

pub struct InMemoryPubSub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
    buffer_size: usize,
}

impl InMemoryPubSub {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size,
        }
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl PubSub for InMemoryPubSub {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), PubSubError> {
        let stale = {
            let channels = self.channels.read().await;
            match channels.get(channel) {
                Some(sender) => {
                    // A send error means every subscriber is gone.
                    let stale = sender.send(payload.to_string()).is_err();
                    tracing::debug!(channel = %channel, "Message published");
                    stale
                }
                None => {
                    tracing::debug!(channel = %channel, "No subscribers for channel");
                    false
                }
            }
        };

        if stale {
            let mut channels = self.channels.write().await;
            if channels
                .get(channel)
                .is_some_and(|sender| sender.receiver_count() == 0)
            {
                channels.remove(channel);
                tracing::debug!(channel = %channel, "Pruned channel without subscribers");
            }
        }

        Ok(())
    }

    async fn subscribe(&self, channel: &str, handler: MessageHandler) -> Result<(), PubSubError> {
        let mut channels = self.channels.write().await;

        // Create channel if it doesn't exist
        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);

        let mut receiver = sender.subscribe();
        let channel_name = channel.to_string();

        tokio::spawn(async move {
            tracing::info!(channel = %channel_name, "Subscribed to channel");

            loop {
                match receiver.recv().await {
                    Ok(payload) => {
                        let msg = PubSubMessage {
                            channel: channel_name.clone(),
                            payload,
                        };
                        if !handler(msg).await {
                            tracing::debug!(
                                channel = %channel_name,
                                "Handler closed the subscription"
                            );
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(
                            channel = %channel_name,
                            lagged = count,
                            "Subscriber lagged behind"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!(channel = %channel_name, "Channel closed");
                        break;
                    }
                }
            }
        });

        Ok(())
    }

    async fn unsubscribe(&self, channel: &str) -> Result<(), PubSubError> {
        let mut channels = self.channels.write().await;
        channels.remove(channel);
        tracing::info!(channel = %channel, "Unsubscribed from channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn subscriber_receives_published_payload() {
        let pubsub = InMemoryPubSub::default();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        pubsub
            .subscribe(
                "test",
                Box::new(move |msg| {
                    let counter = counter.clone();
                    Box::pin(async move {
                        assert_eq!(msg.payload, "hello");
                        counter.fetch_add(1, Ordering::SeqCst);
                        true
                    })
                }),
            )
            .await
            .unwrap();

        pubsub.publish("test", "hello").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let pubsub = InMemoryPubSub::default();
        assert!(pubsub.publish("empty", "ignored").await.is_ok());
    }

    #[tokio::test]
    async fn handler_returning_false_ends_the_subscription() {
        let pubsub = InMemoryPubSub::default();
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        pubsub
            .subscribe(
                "once",
                Box::new(move |_| {
                    let counter = counter.clone();
                    Box::pin(async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        false
                    })
                }),
            )
            .await
            .unwrap();

        pubsub.publish("once", "first").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        pubsub.publish("once", "second").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The listener broke out after the first delivery.
        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn channel_without_subscribers_is_pruned_on_publish() {
        let pubsub = InMemoryPubSub::default();

        pubsub
            .subscribe("gone", Box::new(|_| Box::pin(async { false })))
            .await
            .unwrap();

        // First publish delivers and the handler tears the listener down.
        pubsub.publish("gone", "first").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Second publish finds no receivers and drops the channel entry.
        pubsub.publish("gone", "second").await.unwrap();
        assert!(!pubsub.channels.read().await.contains_key("gone"));
    }
}
