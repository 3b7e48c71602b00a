//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod pubsub;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use pubsub::{MessageHandler, PubSub, PubSubError, PubSubMessage, comment_channel};
pub use repository::{
    EventLogRepository, PostQuery, PostRepository, ProfileRepository, UserRepository,
};
