//! Registration service - seat reservation, ticketing, and check-in.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::auth_service::CurrentUser;
use crate::domain::{Notification, Registration, TicketCode, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register the caller for an event (students only)
    async fn register(&self, event_id: Uuid, actor: &CurrentUser) -> AppResult<Registration>;

    /// List the caller's registrations
    async fn list_mine(&self, actor: &CurrentUser) -> AppResult<Vec<Registration>>;

    /// List an event's registrations (owner or admin)
    async fn list_for_event(
        &self,
        event_id: Uuid,
        actor: &CurrentUser,
    ) -> AppResult<Vec<Registration>>;

    /// Mark a registration attended (owner or admin)
    async fn check_in(&self, registration_id: Uuid, actor: &CurrentUser) -> AppResult<()>;
}

/// Concrete implementation of RegistrationService
pub struct Registrar<S: Store> {
    store: Arc<S>,
}

impl<S: Store> Registrar<S> {
    /// Create new registration service instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store> RegistrationService for Registrar<S> {
    async fn register(&self, event_id: Uuid, actor: &CurrentUser) -> AppResult<Registration> {
        if actor.role != UserRole::Student {
            return Err(AppError::Forbidden);
        }

        let event = self
            .store
            .events()
            .find_by_id(event_id)
            .await?
            .ok_or_not_found()?;

        // Fast-path rejections; the reserve_seat filter and the unique
        // (event_id, user_id) index are what actually hold under load.
        if event.is_full() {
            return Err(AppError::conflict("Event is full"));
        }
        if self
            .store
            .registrations()
            .find_by_event_and_user(event_id, actor.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Already registered"));
        }

        let ticket = TicketCode::new(event_id, actor.id);
        let qr_code = ticket.to_png_base64()?;

        if !self.store.events().reserve_seat(event_id).await? {
            return Err(AppError::conflict("Event is full"));
        }

        let registration = Registration::new(
            event_id,
            actor.id,
            actor.name.clone(),
            actor.email.clone(),
            Some(qr_code),
        );
        if let Err(err) = self.store.registrations().insert(&registration).await {
            // Lost the insert race or the store failed; the seat goes back.
            if let Err(release_err) = self.store.events().release_seat(event_id).await {
                tracing::error!(
                    event_id = %event_id,
                    error = %release_err,
                    "Failed to release seat after registration failure"
                );
            }
            return Err(err);
        }

        self.store
            .notifications()
            .insert(&Notification::registration_success(actor.id, &event.title))
            .await?;

        tracing::info!(
            registration_id = %registration.id,
            event_id = %event_id,
            user_id = %actor.id,
            "Registration recorded"
        );
        Ok(registration)
    }

    async fn list_mine(&self, actor: &CurrentUser) -> AppResult<Vec<Registration>> {
        self.store.registrations().list_by_user(actor.id).await
    }

    async fn list_for_event(
        &self,
        event_id: Uuid,
        actor: &CurrentUser,
    ) -> AppResult<Vec<Registration>> {
        let event = self
            .store
            .events()
            .find_by_id(event_id)
            .await?
            .ok_or_not_found()?;
        if event.organizer_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.store.registrations().list_by_event(event_id).await
    }

    async fn check_in(&self, registration_id: Uuid, actor: &CurrentUser) -> AppResult<()> {
        let registration = self
            .store
            .registrations()
            .find_by_id(registration_id)
            .await?
            .ok_or_not_found()?;
        let event = self
            .store
            .events()
            .find_by_id(registration.event_id)
            .await?
            .ok_or_not_found()?;
        if event.organizer_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        if registration.checked_in {
            return Err(AppError::conflict("Already checked in"));
        }
        // Conditional update; the loser of a double scan lands here too.
        if !self
            .store
            .registrations()
            .mark_checked_in(registration_id, Utc::now())
            .await?
        {
            return Err(AppError::conflict("Already checked in"));
        }

        self.store
            .notifications()
            .insert(&Notification::check_in_success(
                registration.user_id,
                &event.title,
            ))
            .await?;

        tracing::info!(
            registration_id = %registration_id,
            event_id = %event.id,
            "Attendee checked in"
        );
        Ok(())
    }
}
