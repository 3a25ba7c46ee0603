//! Event domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::types::patch::double_option;

/// Event categories recognized by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Technical,
    Cultural,
    Sports,
    Workshop,
    Seminar,
    Fest,
    Other,
}

impl EventCategory {
    /// Every category, in display order. Dashboard aggregation reports a
    /// count for each of these even when it is zero.
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Technical,
        EventCategory::Cultural,
        EventCategory::Sports,
        EventCategory::Workshop,
        EventCategory::Seminar,
        EventCategory::Fest,
        EventCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Technical => "technical",
            EventCategory::Cultural => "cultural",
            EventCategory::Sports => "sports",
            EventCategory::Workshop => "workshop",
            EventCategory::Seminar => "seminar",
            EventCategory::Fest => "fest",
            EventCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Published event, stored as a flat document.
///
/// `registered_count` is the seat counter the registration flow increments
/// atomically; it never exceeds `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Intro to Rust Workshop")]
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    #[serde(with = "crate::types::time")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::types::time")]
    pub end_date: DateTime<Utc>,
    #[schema(example = "Main Auditorium")]
    pub venue: String,
    pub capacity: u32,
    pub registered_count: u32,
    pub cost: f64,
    pub image_url: Option<String>,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub status: EventStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "crate::types::time")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event from a creation payload.
    pub fn new(input: CreateEvent, organizer_id: Uuid, organizer_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            start_date: input.start_date,
            end_date: input.end_date,
            venue: input.venue,
            capacity: input.capacity,
            registered_count: 0,
            cost: input.cost,
            image_url: input.image_url,
            organizer_id,
            organizer_name,
            // Events are always born upcoming; status changes only through updates
            status: EventStatus::Upcoming,
            tags: input.tags,
            created_at: Utc::now(),
        }
    }

    /// Check if every seat is taken
    pub fn is_full(&self) -> bool {
        self.registered_count >= self.capacity
    }
}

/// Event creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Intro to Rust Workshop")]
    pub title: String,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    pub category: EventCategory,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "Venue cannot be empty"))]
    #[schema(example = "Main Auditorium")]
    pub venue: String,
    /// Maximum number of attendees
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    #[schema(example = 120)]
    pub capacity: u32,
    /// Entry cost, zero for free events
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: f64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Event update payload.
///
/// Absent fields are left untouched; `image_url` accepts an explicit null
/// to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct EventPatch {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Venue cannot be empty"))]
    pub venue: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<u32>,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    pub status: Option<EventStatus>,
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// True when no field is set, in which case there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.venue.is_none()
            && self.capacity.is_none()
            && self.cost.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }
}

/// Catalog listing filters, taken from query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// Keep only events in this category
    pub category: Option<EventCategory>,
    /// Keep only events with this status
    pub status: Option<EventStatus>,
    /// Case-insensitive substring match on title and description
    pub search: Option<String>,
}
