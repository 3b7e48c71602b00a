//! Pub/Sub adapters.

mod memory;

pub use memory::InMemoryPubSub;
