//! Notification service - per-user notification feed.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::auth_service::CurrentUser;
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::infra::Store;

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// List the caller's notifications, newest first
    async fn list(&self, actor: &CurrentUser) -> AppResult<Vec<Notification>>;

    /// Mark one of the caller's notifications as read
    async fn mark_read(&self, id: Uuid, actor: &CurrentUser) -> AppResult<()>;
}

/// Concrete implementation of NotificationService
pub struct NotificationManager<S: Store> {
    store: Arc<S>,
}

impl<S: Store> NotificationManager<S> {
    /// Create new notification service instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store> NotificationService for NotificationManager<S> {
    async fn list(&self, actor: &CurrentUser) -> AppResult<Vec<Notification>> {
        self.store.notifications().list_by_user(actor.id).await
    }

    async fn mark_read(&self, id: Uuid, actor: &CurrentUser) -> AppResult<()> {
        // The update is scoped to the owner, so another user's notification
        // id behaves exactly like a missing one.
        if !self.store.notifications().mark_read(id, actor.id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
