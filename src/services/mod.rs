//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach storage through the `Store` facade.

mod analytics_service;
mod auth_service;
pub mod container;
mod event_service;
mod feedback_service;
mod notification_service;
mod registration_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use analytics_service::{
    AnalyticsManager, AnalyticsService, DashboardStats, EventStats, UserStats,
};
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims, CurrentUser};
pub use event_service::{EventManager, EventService};
pub use feedback_service::{FeedbackManager, FeedbackService};
pub use notification_service::{NotificationManager, NotificationService};
pub use registration_service::{Registrar, RegistrationService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
