//! Notification handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::Notification;
use crate::errors::AppResult;
use crate::services::CurrentUser;
use crate::types::MessageResponse;

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", put(mark_read))
}

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications, newest first", body = [Notification]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.notification_service.list(&user).await?;

    Ok(Json(notifications))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "No such notification for this caller")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.notification_service.mark_read(id, &user).await?;

    Ok(Json(MessageResponse::new("Notification marked as read")))
}
