//! HTTP request handlers.

pub mod analytics_handler;
pub mod auth_handler;
pub mod event_handler;
pub mod feedback_handler;
pub mod notification_handler;
pub mod registration_handler;
pub mod user_handler;

pub use analytics_handler::analytics_routes;
pub use auth_handler::auth_routes;
pub use event_handler::event_routes;
pub use feedback_handler::feedback_routes;
pub use notification_handler::notification_routes;
pub use registration_handler::registration_routes;
pub use user_handler::user_routes;
