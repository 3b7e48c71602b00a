//! Domain entities - the core business objects.

mod event;
mod post;
mod profile;
mod user;

pub use event::{EventEntry, EventKind, EventLog};
pub use post::{Comment, Like, Post};
pub use profile::{Education, Experience, Profile, Social};
pub use user::{Caller, User};
