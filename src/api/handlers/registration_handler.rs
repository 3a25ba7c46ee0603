//! Registration and check-in handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::Registration;
use crate::errors::AppResult;
use crate::services::CurrentUser;
use crate::types::MessageResponse;

/// Create registration routes
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/registrations/my-registrations", get(my_registrations))
        .route("/registrations/event/:event_id", get(event_registrations))
        .route("/registrations/checkin/:registration_id", post(check_in))
        .route("/registrations/:event_id", post(register_for_event))
}

/// Register the caller for an event
#[utoipa::path(
    post,
    path = "/api/registrations/{event_id}",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registration with QR ticket", body = Registration),
        (status = 400, description = "Event full or already registered"),
        (status = 403, description = "Only students can register"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn register_for_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Registration>> {
    let registration = state.registration_service.register(event_id, &user).await?;

    Ok(Json(registration))
}

/// List the caller's registrations
#[utoipa::path(
    get,
    path = "/api/registrations/my-registrations",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's registrations", body = [Registration]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn my_registrations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Registration>>> {
    let registrations = state.registration_service.list_mine(&user).await?;

    Ok(Json(registrations))
}

/// List an event's registrations
#[utoipa::path(
    get,
    path = "/api/registrations/event/{event_id}",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registrations for the event", body = [Registration]),
        (status = 403, description = "Not the organizer or an admin"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn event_registrations(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<Registration>>> {
    let registrations = state
        .registration_service
        .list_for_event(event_id, &user)
        .await?;

    Ok(Json(registrations))
}

/// Check an attendee in
#[utoipa::path(
    post,
    path = "/api/registrations/checkin/{registration_id}",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("registration_id" = Uuid, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Checked in", body = MessageResponse),
        (status = 400, description = "Already checked in"),
        (status = 403, description = "Not the organizer or an admin"),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(registration_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state
        .registration_service
        .check_in(registration_id, &user)
        .await?;

    Ok(Json(MessageResponse::new("Check-in successful")))
}
