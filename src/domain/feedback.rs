//! Feedback domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Post-attendance rating left by a checked-in attendee, one per user
/// per event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    /// Star rating from 1 to 5
    #[schema(example = 4)]
    pub rating: u8,
    pub comment: String,
    #[serde(with = "crate::types::time")]
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        event_id: Uuid,
        user_id: Uuid,
        user_name: String,
        rating: u8,
        comment: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            user_name,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}

/// Feedback submission payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeedback {
    pub event_id: Uuid,
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: u8,
    pub comment: String,
}
