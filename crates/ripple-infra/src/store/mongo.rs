//! MongoDB document store adapter.
//!
//! Documents are the domain types as serde sees them: uuids and timestamps
//! land as strings. The date-range filter compares RFC 3339 strings, which
//! orders correctly at whole-second granularity.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, to_bson};
use mongodb::{Client, Collection, Database};
use uuid::Uuid;

use ripple_core::domain::{EventLog, Post, Profile, User};
use ripple_core::error::RepoError;
use ripple_core::ports::{
    EventLogRepository, PostQuery, PostRepository, ProfileRepository, UserRepository,
};

fn query_err(e: mongodb::error::Error) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Handle to one Mongo database, opened once at startup.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, RepoError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    pub fn posts(&self) -> MongoPostRepository {
        MongoPostRepository {
            collection: self.db.collection("posts"),
        }
    }

    pub fn profiles(&self) -> MongoProfileRepository {
        MongoProfileRepository {
            collection: self.db.collection("profiles"),
        }
    }

    pub fn event_logs(&self) -> MongoEventLogRepository {
        MongoEventLogRepository {
            collection: self.db.collection("events"),
        }
    }

    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository {
            collection: self.db.collection("users"),
        }
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "id": id.to_string() }
}

fn ids_filter(ids: &[Uuid]) -> Document {
    let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    doc! { "id": { "$in": ids } }
}

pub struct MongoPostRepository {
    collection: Collection<Post>,
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(query_err)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(ids_filter(ids))
            .await
            .map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut filter = doc! {};
        if let Some(name) = &query.name {
            filter.insert("name", name);
        }
        let mut range = doc! {};
        if let Some(start) = query.start_date {
            range.insert("$gte", date_bson(&start)?);
        }
        if let Some(end) = query.end_date {
            range.insert("$lte", date_bson(&end)?);
        }
        if !range.is_empty() {
            filter.insert("created_at", range);
        }

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(query.skip)
            .limit(query.limit as i64)
            .await
            .map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.collection
            .replace_one(id_filter(post.id), &post)
            .upsert(true)
            .await
            .map_err(query_err)?;
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.collection
            .delete_one(id_filter(id))
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_many(ids_filter(ids))
            .await
            .map_err(query_err)?;
        Ok(result.deleted_count)
    }
}

/// Serialize a timestamp exactly as the document field is serialized, so
/// range filters compare like with like.
fn date_bson(date: &chrono::DateTime<chrono::Utc>) -> Result<Bson, RepoError> {
    to_bson(date).map_err(|e| RepoError::Serialization(e.to_string()))
}

pub struct MongoProfileRepository {
    collection: Collection<Profile>,
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, RepoError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(query_err)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        self.collection
            .find_one(doc! { "user_id": user_id.to_string() })
            .await
            .map_err(query_err)
    }

    async fn find_all(&self) -> Result<Vec<Profile>, RepoError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    async fn save(&self, profile: Profile) -> Result<Profile, RepoError> {
        self.collection
            .replace_one(id_filter(profile.id), &profile)
            .upsert(true)
            .await
            .map_err(query_err)?;
        Ok(profile)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.collection
            .delete_one(id_filter(id))
            .await
            .map_err(query_err)?;
        Ok(())
    }
}

pub struct MongoEventLogRepository {
    collection: Collection<EventLog>,
}

#[async_trait]
impl EventLogRepository for MongoEventLogRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<EventLog>, RepoError> {
        self.collection
            .find_one(doc! { "user_id": user_id.to_string() })
            .await
            .map_err(query_err)
    }

    async fn save(&self, log: EventLog) -> Result<EventLog, RepoError> {
        // Logs are unique per recipient; upsert keyed by user keeps it so.
        self.collection
            .replace_one(doc! { "user_id": log.user_id.to_string() }, &log)
            .upsert(true)
            .await
            .map_err(query_err)?;
        Ok(log)
    }
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(query_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(query_err)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.collection
            .replace_one(id_filter(user.id), &user)
            .upsert(true)
            .await
            .map_err(query_err)?;
        Ok(user)
    }
}
