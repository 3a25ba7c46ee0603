//! Analytics handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{CurrentUser, DashboardStats, EventStats};

/// Create analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/event/:event_id", get(event_stats))
        .route("/analytics/dashboard", get(dashboard))
}

/// Attendance and feedback statistics for one event
#[utoipa::path(
    get,
    path = "/api/analytics/event/{event_id}",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event statistics", body = EventStats),
        (status = 403, description = "Not the organizer or an admin"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn event_stats(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<EventStats>> {
    let stats = state.analytics_service.event_stats(event_id, &user).await?;

    Ok(Json(stats))
}

/// Campus-wide dashboard totals
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Campus-wide totals", body = DashboardStats),
        (status = 403, description = "Admin only")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.analytics_service.dashboard(&user).await?;

    Ok(Json(stats))
}
