//! Store facade over the per-collection repositories.

use async_trait::async_trait;
use std::sync::Arc;

use super::db::Database;
use super::repositories::{
    EventRepository, EventStore, FeedbackRepository, FeedbackStore, NotificationRepository,
    NotificationStore, RegistrationRepository, RegistrationStore, UserRepository, UserStore,
};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage access trait for dependency injection.
///
/// Hands out one repository per collection, plus a connectivity probe for
/// the health endpoint. Cross-collection consistency comes from unique
/// indexes and single-document conditional updates, not transactions.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;

    /// Get registration repository
    fn registrations(&self) -> Arc<dyn RegistrationRepository>;

    /// Get feedback repository
    fn feedbacks(&self) -> Arc<dyn FeedbackRepository>;

    /// Get notification repository
    fn notifications(&self) -> Arc<dyn NotificationRepository>;

    /// Check backing database connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of Store
pub struct Persistence {
    database: Database,
    users: Arc<UserStore>,
    events: Arc<EventStore>,
    registrations: Arc<RegistrationStore>,
    feedbacks: Arc<FeedbackStore>,
    notifications: Arc<NotificationStore>,
}

impl Persistence {
    /// Create repositories over an established connection
    pub fn new(database: Database) -> Self {
        Self {
            users: Arc::new(UserStore::new(&database)),
            events: Arc::new(EventStore::new(&database)),
            registrations: Arc::new(RegistrationStore::new(&database)),
            feedbacks: Arc::new(FeedbackStore::new(&database)),
            notifications: Arc::new(NotificationStore::new(&database)),
            database,
        }
    }
}

#[async_trait]
impl Store for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.events.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationRepository> {
        self.registrations.clone()
    }

    fn feedbacks(&self) -> Arc<dyn FeedbackRepository> {
        self.feedbacks.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.ping().await
    }
}
