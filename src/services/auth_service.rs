//! Authentication service - registration, login, profiles and token handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Password, ProfileUpdate, User, UserProfile, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated caller, resolved from a bearer token.
///
/// Carries the account fields request handling needs so downstream code
/// never re-reads the users collection for the caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn can_manage_events(&self) -> bool {
        self.role.can_manage_events()
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Token plus profile returned after successful register or login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Signed JWT the client sends back as a Bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserProfile,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and sign it in
    async fn register(
        &self,
        email: String,
        name: String,
        password: String,
        role: UserRole,
    ) -> AppResult<AuthResponse>;

    /// Login and return a fresh token
    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Verify a JWT and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a token to the live account it belongs to
    async fn authenticate(&self, token: &str) -> AppResult<CurrentUser>;

    /// Get a user's own profile
    async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile>;

    /// Apply a profile patch and return the updated profile
    async fn update_profile(&self, user_id: Uuid, patch: ProfileUpdate) -> AppResult<UserProfile>;
}

/// Sign a token carrying the user's identity claims
fn generate_token(user: &User, secret: &[u8], expiration_hours: i64) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Decode and validate a token, distinguishing expiry from other failures
fn decode_claims(token: &str, secret: &[u8]) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::Jwt(e),
    })
}

/// Concrete implementation of AuthService
pub struct Authenticator<S: Store> {
    store: Arc<S>,
    config: Config,
}

impl<S: Store> Authenticator<S> {
    /// Create new auth service instance
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self { store, config }
    }

    fn sign_token(&self, user: &User) -> AppResult<String> {
        generate_token(
            user,
            self.config.jwt_secret_bytes(),
            self.config.jwt_expiration_hours,
        )
    }
}

#[async_trait]
impl<S: Store> AuthService for Authenticator<S> {
    async fn register(
        &self,
        email: String,
        name: String,
        password: String,
        role: UserRole,
    ) -> AppResult<AuthResponse> {
        // Fast-path duplicate check; the unique email index has the final
        // say under concurrent signups
        if self.store.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = User::new(email, name, password_hash, role);
        self.store.users().insert(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        let token = self.sign_token(&user)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let user = self.store.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the account does
        // not exist, so response timing cannot enumerate valid emails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";
        let stored = Password::from_hash(
            user.as_ref()
                .map(|u| u.password_hash.clone())
                .unwrap_or_else(|| dummy_hash.to_string()),
        );
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                let token = self.sign_token(&user)?;
                Ok(AuthResponse {
                    token,
                    user: user.into(),
                })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode_claims(token, self.config.jwt_secret_bytes())
    }

    async fn authenticate(&self, token: &str) -> AppResult<CurrentUser> {
        let claims = self.verify_token(token)?;

        // The account may have disappeared since the token was issued
        let user = self
            .store
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(user.into())
    }

    async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self
            .store
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found()?;
        Ok(user.into())
    }

    async fn update_profile(&self, user_id: Uuid, patch: ProfileUpdate) -> AppResult<UserProfile> {
        if patch.is_empty() {
            return self.profile(user_id).await;
        }

        let user = self
            .store
            .users()
            .update_profile(user_id, &patch)
            .await?
            .ok_or_not_found()?;
        Ok(user.into())
    }
}
