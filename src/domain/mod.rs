//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent campus
//! event concepts independent of infrastructure concerns.

pub mod event;
pub mod feedback;
pub mod notification;
pub mod password;
pub mod registration;
pub mod ticket;
pub mod user;

pub use event::{CreateEvent, Event, EventCategory, EventFilter, EventPatch, EventStatus};
pub use feedback::{CreateFeedback, Feedback};
pub use notification::Notification;
pub use password::Password;
pub use registration::Registration;
pub use ticket::TicketCode;
pub use user::{ProfileUpdate, User, UserProfile, UserRole};
