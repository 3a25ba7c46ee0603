//! Feedback repository backed by the `feedbacks` collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};
use uuid::Uuid;

use super::is_duplicate_key;
use crate::domain::Feedback;
use crate::errors::{AppError, AppResult};
use crate::infra::db::{Database, FEEDBACKS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Feedback repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert new feedback. The unique (event_id, user_id) index keeps it
    /// to one entry per attendee; that surfaces as a conflict.
    async fn insert(&self, feedback: &Feedback) -> AppResult<()>;

    /// Find a user's feedback for an event
    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Feedback>>;

    /// List feedback for an event, newest first
    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>>;

    /// Count feedback entries for an event
    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64>;

    /// Count feedback entries a user has written
    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of FeedbackRepository
pub struct FeedbackStore {
    collection: Collection<Feedback>,
}

impl FeedbackStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(FEEDBACKS),
        }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn insert(&self, feedback: &Feedback) -> AppResult<()> {
        self.collection.insert_one(feedback).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::conflict("Feedback already submitted")
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Feedback>> {
        let result = self
            .collection
            .find_one(doc! {
                "event_id": event_id.to_string(),
                "user_id": user_id.to_string(),
            })
            .await?;
        Ok(result)
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>> {
        let feedbacks = self
            .collection
            .find(doc! { "event_id": event_id.to_string() })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(feedbacks)
    }

    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "event_id": event_id.to_string() })
            .await?)
    }

    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "user_id": user_id.to_string() })
            .await?)
    }
}
