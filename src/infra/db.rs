//! Database connection and index management.

use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client, Collection, IndexModel,
};

use crate::config::Config;
use crate::errors::AppResult;

/// Collection names
pub const USERS: &str = "users";
pub const EVENTS: &str = "events";
pub const REGISTRATIONS: &str = "registrations";
pub const FEEDBACKS: &str = "feedbacks";
pub const NOTIFICATIONS: &str = "notifications";

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB and ensure the indexes the write paths rely on.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.mongodb_url).await?;
        let db = client.database(&config.database_name);

        let database = Self { db };
        database.ensure_indexes().await?;

        tracing::info!(
            database = %config.database_name,
            "Database connected and indexes ensured"
        );

        Ok(database)
    }

    /// Get a typed collection handle.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Create the indexes backing lookups and uniqueness guarantees.
    ///
    /// The unique compound indexes on registrations and feedbacks are what
    /// make "one per user per event" hold under concurrent requests; the
    /// application-level duplicate checks are only a fast path.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.unique_index(USERS, doc! { "id": 1 }).await?;
        self.unique_index(USERS, doc! { "email": 1 }).await?;

        self.unique_index(EVENTS, doc! { "id": 1 }).await?;
        self.index(EVENTS, doc! { "organizer_id": 1 }).await?;

        self.unique_index(REGISTRATIONS, doc! { "id": 1 }).await?;
        self.unique_index(REGISTRATIONS, doc! { "event_id": 1, "user_id": 1 })
            .await?;
        self.index(REGISTRATIONS, doc! { "user_id": 1 }).await?;

        self.unique_index(FEEDBACKS, doc! { "id": 1 }).await?;
        self.unique_index(FEEDBACKS, doc! { "event_id": 1, "user_id": 1 })
            .await?;

        self.unique_index(NOTIFICATIONS, doc! { "id": 1 }).await?;
        self.index(NOTIFICATIONS, doc! { "user_id": 1 }).await?;

        Ok(())
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn unique_index(&self, collection: &str, keys: Document) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<Document>(collection)
            .create_index(model)
            .await?;
        Ok(())
    }

    async fn index(&self, collection: &str, keys: Document) -> AppResult<()> {
        let model = IndexModel::builder().keys(keys).build();
        self.db
            .collection::<Document>(collection)
            .create_index(model)
            .await?;
        Ok(())
    }
}
