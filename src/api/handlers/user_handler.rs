//! User profile and personal statistics handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ProfileUpdate, UserProfile};
use crate::errors::AppResult;
use crate::services::{CurrentUser, UserStats};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", put(update_profile))
        .route("/users/stats", get(user_stats))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ProfileUpdate>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.auth_service.update_profile(user.id, payload).await?;

    Ok(Json(profile))
}

/// Get the caller's personal statistics, shaped by role
#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role-shaped statistics", body = UserStats),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn user_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<UserStats>> {
    let stats = state.analytics_service.user_stats(&user).await?;

    Ok(Json(stats))
}
