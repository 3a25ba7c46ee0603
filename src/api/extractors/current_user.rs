//! Authenticated user extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use crate::services::CurrentUser;

/// Handlers that take a [`CurrentUser`] parameter require a valid bearer
/// token; routes without one stay public. The token is resolved against
/// the store on every request, so a deleted account stops authenticating
/// even while its token is still unexpired.
///
/// Role and ownership checks live in the services; this extractor only
/// establishes who is calling.
#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix(BEARER_TOKEN_PREFIX)
            .ok_or(AppError::Unauthorized)?;

        state.auth_service.authenticate(token).await
    }
}
