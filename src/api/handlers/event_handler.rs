//! Event catalog handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateEvent, Event, EventFilter, EventPatch};
use crate::errors::AppResult;
use crate::services::CurrentUser;
use crate::types::MessageResponse;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/organizer/my-events", get(my_events))
}

/// Publish a new event
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    security(("bearer_auth" = [])),
    request_body = CreateEvent,
    responses(
        (status = 200, description = "Event created", body = Event),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Students cannot create events")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateEvent>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.create(payload, &user).await?;

    Ok(Json(event))
}

/// Browse the event catalog
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    params(EventFilter),
    responses(
        (status = 200, description = "Events ordered by start date", body = [Event])
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.event_service.list(filter).await?;

    Ok(Json(events))
}

/// Get one event
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "The event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.get(id).await?;

    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the organizer or an admin"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EventPatch>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.update(id, payload, &user).await?;

    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 403, description = "Not the organizer or an admin"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.event_service.delete(id, &user).await?;

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// List the caller's own events
#[utoipa::path(
    get,
    path = "/api/events/organizer/my-events",
    tag = "Events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Events the caller organizes", body = [Event]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Students have no organized events")
    )
)]
pub async fn my_events(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.event_service.list_mine(&user).await?;

    Ok(Json(events))
}
