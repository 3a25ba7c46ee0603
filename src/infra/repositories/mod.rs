//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over MongoDB collections,
//! following the Repository pattern for clean separation of concerns.

mod event_repository;
mod feedback_repository;
mod notification_repository;
mod registration_repository;
mod user_repository;

pub use event_repository::{EventRepository, EventStore};
pub use feedback_repository::{FeedbackRepository, FeedbackStore};
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use registration_repository::{RegistrationRepository, RegistrationStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use registration_repository::MockRegistrationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use mongodb::error::{Error, ErrorKind, WriteFailure};

/// True when a write was rejected by a unique index.
pub(crate) fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000
    )
}
