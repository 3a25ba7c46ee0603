//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    analytics_handler, auth_handler, event_handler, feedback_handler, notification_handler,
    registration_handler, user_handler,
};
use crate::domain::{
    CreateEvent, CreateFeedback, Event, EventCategory, EventPatch, EventStatus, Feedback,
    Notification, ProfileUpdate, Registration, UserProfile, UserRole,
};
use crate::services::{AuthResponse, DashboardStats, EventStats, UserStats};
use crate::types::MessageResponse;

/// OpenAPI documentation for the Campus Pulse API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Pulse API",
        version = "0.1.0",
        description = "Campus event management: catalog, registrations with QR tickets, \
                       check-in, feedback, notifications, and analytics",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // User endpoints
        user_handler::update_profile,
        user_handler::user_stats,
        // Event endpoints
        event_handler::create_event,
        event_handler::list_events,
        event_handler::get_event,
        event_handler::update_event,
        event_handler::delete_event,
        event_handler::my_events,
        // Registration endpoints
        registration_handler::register_for_event,
        registration_handler::my_registrations,
        registration_handler::event_registrations,
        registration_handler::check_in,
        // Feedback endpoints
        feedback_handler::create_feedback,
        feedback_handler::event_feedbacks,
        // Notification endpoints
        notification_handler::list_notifications,
        notification_handler::mark_read,
        // Analytics endpoints
        analytics_handler::event_stats,
        analytics_handler::dashboard,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserProfile,
            ProfileUpdate,
            EventCategory,
            EventStatus,
            Event,
            CreateEvent,
            EventPatch,
            Registration,
            Feedback,
            CreateFeedback,
            Notification,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            AuthResponse,
            // Analytics types
            EventStats,
            DashboardStats,
            UserStats,
            // Shared responses
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and identity"),
        (name = "Users", description = "Profile management and personal statistics"),
        (name = "Events", description = "Event catalog and organizer management"),
        (name = "Registrations", description = "Seat reservation, tickets, and check-in"),
        (name = "Feedback", description = "Post-attendance ratings"),
        (name = "Notifications", description = "Per-user notification feed"),
        (name = "Analytics", description = "Event and campus-wide statistics")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
