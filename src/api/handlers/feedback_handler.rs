//! Feedback handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateFeedback, Feedback};
use crate::errors::AppResult;
use crate::services::CurrentUser;

/// Create feedback routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedbacks", post(create_feedback))
        .route("/feedbacks/event/:event_id", get(event_feedbacks))
}

/// Submit feedback for an attended event
#[utoipa::path(
    post,
    path = "/api/feedbacks",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    request_body = CreateFeedback,
    responses(
        (status = 200, description = "Stored feedback", body = Feedback),
        (status = 400, description = "Validation error or feedback already submitted"),
        (status = 403, description = "Caller never checked in to the event")
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateFeedback>,
) -> AppResult<Json<Feedback>> {
    let feedback = state.feedback_service.create(payload, &user).await?;

    Ok(Json(feedback))
}

/// List an event's feedback
#[utoipa::path(
    get,
    path = "/api/feedbacks/event/{event_id}",
    tag = "Feedback",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Feedback, newest first", body = [Feedback])
    )
)]
pub async fn event_feedbacks(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<Feedback>>> {
    let feedbacks = state.feedback_service.list_for_event(event_id).await?;

    Ok(Json(feedbacks))
}
