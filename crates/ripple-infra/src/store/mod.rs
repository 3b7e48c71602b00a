//! Document store adapters.

mod memory;

#[cfg(feature = "mongo")]
mod mongo;

pub use memory::{
    InMemoryEventLogRepository, InMemoryPostRepository, InMemoryProfileRepository,
    InMemoryUserRepository,
};

#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
