//! Registration repository backed by the `registrations` collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};
use uuid::Uuid;

use super::is_duplicate_key;
use crate::domain::Registration;
use crate::errors::{AppError, AppResult};
use crate::infra::db::{Database, REGISTRATIONS};
use crate::types::time;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Registration repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a new registration.
    ///
    /// The unique (event_id, user_id) index rejects a second registration
    /// for the same seat; that surfaces as a conflict.
    async fn insert(&self, registration: &Registration) -> AppResult<()>;

    /// Find registration by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>>;

    /// Find a user's registration for an event
    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Registration>>;

    /// List a user's registrations
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>>;

    /// List all registrations for an event
    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>>;

    /// Flip the check-in flag exactly once.
    ///
    /// Conditioned on `checked_in: false`, so a concurrent double scan
    /// mutates the document a single time; returns false for the loser.
    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool>;

    /// Whether the user attended (registered and checked in) an event
    async fn has_checked_in(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Count all registrations
    async fn count(&self) -> AppResult<u64>;

    /// Count registrations for an event
    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64>;

    /// Count checked-in registrations for an event
    async fn count_checked_in_by_event(&self, event_id: Uuid) -> AppResult<u64>;

    /// Count a user's registrations
    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Count events a user has checked in to
    async fn count_checked_in_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of RegistrationRepository
pub struct RegistrationStore {
    collection: Collection<Registration>,
}

impl RegistrationStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(REGISTRATIONS),
        }
    }
}

#[async_trait]
impl RegistrationRepository for RegistrationStore {
    async fn insert(&self, registration: &Registration) -> AppResult<()> {
        self.collection.insert_one(registration).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::conflict("Already registered")
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>> {
        let result = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(result)
    }

    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Registration>> {
        let result = self
            .collection
            .find_one(doc! {
                "event_id": event_id.to_string(),
                "user_id": user_id.to_string(),
            })
            .await?;
        Ok(result)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>> {
        let registrations = self
            .collection
            .find(doc! { "user_id": user_id.to_string() })
            .await?
            .try_collect()
            .await?;
        Ok(registrations)
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>> {
        let registrations = self
            .collection
            .find(doc! { "event_id": event_id.to_string() })
            .await?
            .try_collect()
            .await?;
        Ok(registrations)
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id.to_string(), "checked_in": false },
                doc! { "$set": {
                    "checked_in": true,
                    "checked_in_at": time::format(&at),
                } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn has_checked_in(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = self
            .collection
            .find_one(doc! {
                "event_id": event_id.to_string(),
                "user_id": user_id.to_string(),
                "checked_in": true,
            })
            .await?;
        Ok(result.is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "event_id": event_id.to_string() })
            .await?)
    }

    async fn count_checked_in_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "event_id": event_id.to_string(), "checked_in": true })
            .await?)
    }

    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "user_id": user_id.to_string() })
            .await?)
    }

    async fn count_checked_in_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "user_id": user_id.to_string(), "checked_in": true })
            .await?)
    }
}
