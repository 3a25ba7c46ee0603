//! Notification repository backed by the `notifications` collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};
use uuid::Uuid;

use crate::config::MAX_NOTIFICATIONS_RETURNED;
use crate::domain::Notification;
use crate::errors::AppResult;
use crate::infra::db::{Database, NOTIFICATIONS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification to a user's feed
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// List a user's notifications, newest first, capped
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Mark one of the user's notifications as read.
    ///
    /// Scoped to the owner, so one user cannot touch another's feed.
    /// Returns false when no such notification exists.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of NotificationRepository
pub struct NotificationStore {
    collection: Collection<Notification>,
}

impl NotificationStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(NOTIFICATIONS),
        }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        self.collection.insert_one(notification).await?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let notifications = self
            .collection
            .find(doc! { "user_id": user_id.to_string() })
            .sort(doc! { "created_at": -1 })
            .limit(MAX_NOTIFICATIONS_RETURNED)
            .await?
            .try_collect()
            .await?;
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id.to_string(), "user_id": user_id.to_string() },
                doc! { "$set": { "read": true } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }
}
