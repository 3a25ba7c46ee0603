//! Notification domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// In-app notification delivered to a single user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Registration Successful")]
    pub title: String,
    pub message: String,
    pub read: bool,
    #[serde(with = "crate::types::time")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Notification sent right after a successful registration.
    pub fn registration_success(user_id: Uuid, event_title: &str) -> Self {
        Self::new(
            user_id,
            "Registration Successful",
            format!("You have successfully registered for {}", event_title),
        )
    }

    /// Notification sent when a ticket is scanned at the venue.
    pub fn check_in_success(user_id: Uuid, event_title: &str) -> Self {
        Self::new(
            user_id,
            "Check-in Successful",
            format!("You have been checked in to {}", event_title),
        )
    }
}
