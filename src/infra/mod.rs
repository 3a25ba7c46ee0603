//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and index management
//! - Per-collection repositories
//! - Store facade for dependency injection

pub mod db;
pub mod repositories;
pub mod store;

pub use db::Database;
pub use repositories::{
    EventRepository, EventStore, FeedbackRepository, FeedbackStore, NotificationRepository,
    NotificationStore, RegistrationRepository, RegistrationStore, UserRepository, UserStore,
};
pub use store::{Persistence, Store};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockEventRepository, MockFeedbackRepository, MockNotificationRepository,
    MockRegistrationRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use store::MockStore;
