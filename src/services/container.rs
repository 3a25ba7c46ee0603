//! Service container - centralized service access with parallel execution
//! support.
//!
//! Holds one `Arc` per service trait so handlers can share services across
//! requests, plus small combinators for running independent store reads
//! concurrently.

use std::future::Future;
use std::sync::Arc;

use super::{
    AnalyticsService, AuthService, EventService, FeedbackService, NotificationService,
    RegistrationService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Store;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;

    /// Get registration service
    fn registrations(&self) -> Arc<dyn RegistrationService>;

    /// Get feedback service
    fn feedbacks(&self) -> Arc<dyn FeedbackService>;

    /// Get notification service
    fn notifications(&self) -> Arc<dyn NotificationService>;

    /// Get analytics service
    fn analytics(&self) -> Arc<dyn AnalyticsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    event_service: Arc<dyn EventService>,
    registration_service: Arc<dyn RegistrationService>,
    feedback_service: Arc<dyn FeedbackService>,
    notification_service: Arc<dyn NotificationService>,
    analytics_service: Arc<dyn AnalyticsService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        event_service: Arc<dyn EventService>,
        registration_service: Arc<dyn RegistrationService>,
        feedback_service: Arc<dyn FeedbackService>,
        notification_service: Arc<dyn NotificationService>,
        analytics_service: Arc<dyn AnalyticsService>,
    ) -> Self {
        Self {
            auth_service,
            event_service,
            registration_service,
            feedback_service,
            notification_service,
            analytics_service,
        }
    }

    /// Create a service container over any store implementation
    pub fn from_store<S: Store + 'static>(store: Arc<S>, config: Config) -> Self {
        use super::{
            AnalyticsManager, Authenticator, EventManager, FeedbackManager, NotificationManager,
            Registrar,
        };

        Self {
            auth_service: Arc::new(Authenticator::new(store.clone(), config)),
            event_service: Arc::new(EventManager::new(store.clone())),
            registration_service: Arc::new(Registrar::new(store.clone())),
            feedback_service: Arc::new(FeedbackManager::new(store.clone())),
            notification_service: Arc::new(NotificationManager::new(store.clone())),
            analytics_service: Arc::new(AnalyticsManager::new(store)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }

    fn feedbacks(&self) -> Arc<dyn FeedbackService> {
        self.feedback_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn analytics(&self) -> Arc<dyn AnalyticsService> {
        self.analytics_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
///
/// The analytics paths fan several counts out against the store at once;
/// these wrappers keep the call sites uniform.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when both
    /// complete. If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute a collection of homogeneous async operations in parallel.
    ///
    /// All operations must return the same type. Results are returned in
    /// the same order as the input futures.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}
