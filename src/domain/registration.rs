//! Registration domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A student's seat at an event.
///
/// Registrations are permanent records: check-in flips flags on the same
/// document rather than creating a new one, and nothing ever deletes them.
/// Attendee name and email are denormalized in so organizer listings do
/// not fan out to the users collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    /// QR ticket as a base64-encoded PNG
    pub qr_code: Option<String>,
    #[serde(with = "crate::types::time")]
    pub registered_at: DateTime<Utc>,
    pub checked_in: bool,
    #[serde(default, with = "crate::types::time::option")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl Registration {
    pub fn new(
        event_id: Uuid,
        user_id: Uuid,
        user_name: String,
        user_email: String,
        qr_code: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            user_name,
            user_email,
            qr_code,
            registered_at: Utc::now(),
            checked_in: false,
            checked_in_at: None,
        }
    }
}
