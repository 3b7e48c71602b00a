//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - JWT + Argon2 authentication services
//! - `mongo` - MongoDB document store adapter
//! - `minimal` - In-memory store and pub/sub only

pub mod pubsub;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use pubsub::InMemoryPubSub;
pub use store::{
    InMemoryEventLogRepository, InMemoryPostRepository, InMemoryProfileRepository,
    InMemoryUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "mongo")]
pub use store::MongoStore;
