//! Event service - catalog browsing and organizer event management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::auth_service::CurrentUser;
use crate::domain::{CreateEvent, Event, EventFilter, EventPatch, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Publish a new event (organizer or admin)
    async fn create(&self, input: CreateEvent, actor: &CurrentUser) -> AppResult<Event>;

    /// Browse the public catalog, soonest first
    async fn list(&self, filter: EventFilter) -> AppResult<Vec<Event>>;

    /// Get one event
    async fn get(&self, id: Uuid) -> AppResult<Event>;

    /// Patch an event (owner or admin)
    async fn update(&self, id: Uuid, patch: EventPatch, actor: &CurrentUser) -> AppResult<Event>;

    /// Delete an event (owner or admin)
    async fn delete(&self, id: Uuid, actor: &CurrentUser) -> AppResult<()>;

    /// List the actor's own events, newest first; admins see every event
    async fn list_mine(&self, actor: &CurrentUser) -> AppResult<Vec<Event>>;
}

/// Concrete implementation of EventService
pub struct EventManager<S: Store> {
    store: Arc<S>,
}

impl<S: Store> EventManager<S> {
    /// Create new event service instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store> EventService for EventManager<S> {
    async fn create(&self, input: CreateEvent, actor: &CurrentUser) -> AppResult<Event> {
        if !actor.can_manage_events() {
            return Err(AppError::Forbidden);
        }
        if input.end_date < input.start_date {
            return Err(AppError::validation("End date must not be before start date"));
        }

        let event = Event::new(input, actor.id, actor.name.clone());
        self.store.events().insert(&event).await?;

        tracing::info!(event_id = %event.id, organizer_id = %actor.id, "Event created");
        Ok(event)
    }

    async fn list(&self, filter: EventFilter) -> AppResult<Vec<Event>> {
        self.store.events().list(&filter).await
    }

    async fn get(&self, id: Uuid) -> AppResult<Event> {
        self.store.events().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update(&self, id: Uuid, patch: EventPatch, actor: &CurrentUser) -> AppResult<Event> {
        let event = self.store.events().find_by_id(id).await?.ok_or_not_found()?;
        if event.organizer_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        if patch.is_empty() {
            return Ok(event);
        }

        // Dates stay ordered even when only one end moves
        let start = patch.start_date.unwrap_or(event.start_date);
        let end = patch.end_date.unwrap_or(event.end_date);
        if end < start {
            return Err(AppError::validation("End date must not be before start date"));
        }

        self.store.events().update(id, &patch).await?.ok_or_not_found()
    }

    async fn delete(&self, id: Uuid, actor: &CurrentUser) -> AppResult<()> {
        let event = self.store.events().find_by_id(id).await?.ok_or_not_found()?;
        if event.organizer_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        if !self.store.events().delete(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(event_id = %id, actor_id = %actor.id, "Event deleted");
        Ok(())
    }

    async fn list_mine(&self, actor: &CurrentUser) -> AppResult<Vec<Event>> {
        match actor.role {
            UserRole::Admin => self.store.events().list_all().await,
            UserRole::Organizer => self.store.events().list_by_organizer(actor.id).await,
            UserRole::Student => Err(AppError::Forbidden),
        }
    }
}
