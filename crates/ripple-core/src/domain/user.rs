use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity. Owned by the auth subsystem; the aggregate services only
/// ever see users through the [`Caller`] snapshot on a request.
///
/// The hash serializes with the rest of the document; the API surface
/// exposes users through DTOs that leave it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let avatar = Self::placeholder_avatar(&email);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            avatar,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deterministic placeholder avatar derived from the email, so two
    /// registrations with the same address render the same image.
    fn placeholder_avatar(email: &str) -> String {
        let seed: u64 = email
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        format!("https://avatars.example.com/identicon/{seed:016x}?s=200")
    }
}

/// The authenticated identity attached to every mutating request.
/// Carries the display fields the post service snapshots into new
/// posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_deterministic_per_email() {
        let a = User::new("a".into(), "same@example.com".into(), "h".into());
        let b = User::new("b".into(), "same@example.com".into(), "h".into());
        let c = User::new("c".into(), "other@example.com".into(), "h".into());

        assert_eq!(a.avatar, b.avatar);
        assert_ne!(a.avatar, c.avatar);
    }
}
