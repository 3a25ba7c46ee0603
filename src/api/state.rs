//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the store.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Store;
use crate::services::{
    AnalyticsService, AuthService, EventService, FeedbackService, NotificationService,
    RegistrationService, ServiceContainer, Services,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Event service
    pub event_service: Arc<dyn EventService>,
    /// Registration service
    pub registration_service: Arc<dyn RegistrationService>,
    /// Feedback service
    pub feedback_service: Arc<dyn FeedbackService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// Analytics service
    pub analytics_service: Arc<dyn AnalyticsService>,
    /// Store handle, kept for health checks
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Create application state with all services wired over a store.
    ///
    /// Any `Store` implementation works here, which is how the API tests
    /// run the full router against an in-memory store.
    pub fn from_store<S: Store + 'static>(store: Arc<S>, config: Config) -> Self {
        let container = Services::from_store(store.clone(), config);

        Self {
            auth_service: container.auth(),
            event_service: container.events(),
            registration_service: container.registrations(),
            feedback_service: container.feedbacks(),
            notification_service: container.notifications(),
            analytics_service: container.analytics(),
            store,
        }
    }

    /// Create application state with manually injected services.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        event_service: Arc<dyn EventService>,
        registration_service: Arc<dyn RegistrationService>,
        feedback_service: Arc<dyn FeedbackService>,
        notification_service: Arc<dyn NotificationService>,
        analytics_service: Arc<dyn AnalyticsService>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            auth_service,
            event_service,
            registration_service,
            feedback_service,
            notification_service,
            analytics_service,
            store,
        }
    }
}
