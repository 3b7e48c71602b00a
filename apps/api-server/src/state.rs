//! Application state - shared across all handlers.

use std::sync::Arc;

use ripple_core::ports::{
    EventLogRepository, PostRepository, ProfileRepository, PubSub, UserRepository,
};
use ripple_core::service::{NotificationService, PostService, ProfileService};
use ripple_infra::{
    InMemoryEventLogRepository, InMemoryPostRepository, InMemoryProfileRepository,
    InMemoryPubSub, InMemoryUserRepository,
};

use crate::config::AppConfig;

type Repos = (
    Arc<dyn PostRepository>,
    Arc<dyn ProfileRepository>,
    Arc<dyn EventLogRepository>,
    Arc<dyn UserRepository>,
);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub profiles: Arc<ProfileService>,
    pub notifications: NotificationService,
    pub users: Arc<dyn UserRepository>,
    pub pubsub: Arc<dyn PubSub>,
}

impl AppState {
    /// Build the application state with the configured store backend.
    pub async fn new(config: &AppConfig) -> Self {
        let pubsub: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::default());
        let (post_repo, profile_repo, log_repo, user_repo) = Self::build_repos(config).await;

        let notifications = NotificationService::new(log_repo);
        let posts = Arc::new(PostService::new(
            post_repo,
            notifications.clone(),
            pubsub.clone(),
        ));
        let profiles = Arc::new(ProfileService::new(profile_repo));

        tracing::info!("Application state initialized");

        Self {
            posts,
            profiles,
            notifications,
            users: user_repo,
            pubsub,
        }
    }

    #[cfg(feature = "mongo")]
    async fn build_repos(config: &AppConfig) -> Repos {
        use ripple_infra::MongoStore;

        if let Some(url) = &config.mongo_url {
            match MongoStore::connect(url, &config.mongo_db).await {
                Ok(store) => {
                    tracing::info!(db = %config.mongo_db, "Connected to MongoDB");
                    return (
                        Arc::new(store.posts()),
                        Arc::new(store.profiles()),
                        Arc::new(store.event_logs()),
                        Arc::new(store.users()),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to MongoDB: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("MONGO_URL not set. Running on the in-memory store.");
        }
        Self::memory_repos()
    }

    #[cfg(not(feature = "mongo"))]
    async fn build_repos(_config: &AppConfig) -> Repos {
        tracing::info!("Running without mongo feature - using the in-memory store");
        Self::memory_repos()
    }

    fn memory_repos() -> Repos {
        (
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryEventLogRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
