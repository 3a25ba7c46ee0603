//! Integration tests for API endpoints.
//!
//! These tests run the full router against an in-memory store, so no
//! MongoDB instance is required. The fakes mirror the real repositories'
//! contracts: unique-key inserts reject duplicates with a conflict and
//! seat reservation is a checked increment.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use campus_pulse::api::{create_router, AppState};
use campus_pulse::config::Config;
use campus_pulse::domain::{
    Event, EventCategory, EventFilter, EventPatch, Feedback, Notification, ProfileUpdate,
    Registration, User, UserRole,
};
use campus_pulse::errors::{AppError, AppResult};
use campus_pulse::infra::{
    EventRepository, FeedbackRepository, NotificationRepository, RegistrationRepository, Store,
    UserRepository,
};

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct MemUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email already registered"));
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfileUpdate) -> AppResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(avatar) = &patch.avatar {
            user.avatar = avatar.clone();
        }
        if let Some(bio) = &patch.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(phone) = &patch.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(department) = &patch.department {
            user.department = Some(department.clone());
        }
        if let Some(year) = &patch.year {
            user.year = *year;
        }
        if let Some(interests) = &patch.interests {
            user.interests = interests.clone();
        }
        Ok(Some(user.clone()))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .count() as u64)
    }
}

#[derive(Default)]
struct MemEvents {
    rows: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventRepository for MemEvents {
    async fn insert(&self, event: &Event) -> AppResult<()> {
        self.rows.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.category.map_or(true, |c| e.category == c))
            .filter(|e| filter.status.map_or(true, |s| e.status == s))
            .filter(|e| {
                filter.search.as_deref().map_or(true, |term| {
                    let term = term.to_lowercase();
                    e.title.to_lowercase().contains(&term)
                        || e.description.to_lowercase().contains(&term)
                })
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_date);
        Ok(events)
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.organizer_id == organizer_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(events)
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self.rows.lock().unwrap().clone();
        events.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(events)
    }

    async fn update(&self, id: Uuid, patch: &EventPatch) -> AppResult<Option<Event>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(event) = rows.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            event.title = title.clone();
        }
        if let Some(description) = &patch.description {
            event.description = description.clone();
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(start_date) = patch.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            event.end_date = end_date;
        }
        if let Some(venue) = &patch.venue {
            event.venue = venue.clone();
        }
        if let Some(capacity) = patch.capacity {
            event.capacity = capacity;
        }
        if let Some(cost) = patch.cost {
            event.cost = cost;
        }
        if let Some(image_url) = &patch.image_url {
            event.image_url = image_url.clone();
        }
        if let Some(status) = patch.status {
            event.status = status;
        }
        if let Some(tags) = &patch.tags {
            event.tags = tags.clone();
        }
        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok(rows.len() < before)
    }

    async fn reserve_seat(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|e| e.id == id) {
            Some(event) if event.registered_count < event.capacity => {
                event.registered_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_seat(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(event) = rows.iter_mut().find(|e| e.id == id) {
            event.registered_count = event.registered_count.saturating_sub(1);
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn count_by_category(&self, category: EventCategory) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.category == category)
            .count() as u64)
    }
}

#[derive(Default)]
struct MemRegistrations {
    rows: Mutex<Vec<Registration>>,
}

#[async_trait]
impl RegistrationRepository for MemRegistrations {
    async fn insert(&self, registration: &Registration) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.event_id == registration.event_id && r.user_id == registration.user_id)
        {
            return Err(AppError::conflict("Already registered"));
        }
        rows.push(registration.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Registration>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Registration>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Registration>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Registration>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id && !r.checked_in) {
            Some(registration) => {
                registration.checked_in = true;
                registration.checked_in_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn has_checked_in(&self, event_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.event_id == event_id && r.user_id == user_id && r.checked_in))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id)
            .count() as u64)
    }

    async fn count_checked_in_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id && r.checked_in)
            .count() as u64)
    }

    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count() as u64)
    }

    async fn count_checked_in_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.checked_in)
            .count() as u64)
    }
}

#[derive(Default)]
struct MemFeedbacks {
    rows: Mutex<Vec<Feedback>>,
}

#[async_trait]
impl FeedbackRepository for MemFeedbacks {
    async fn insert(&self, feedback: &Feedback) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|f| f.event_id == feedback.event_id && f.user_id == feedback.user_id)
        {
            return Err(AppError::conflict("Feedback already submitted"));
        }
        rows.push(feedback.clone());
        Ok(())
    }

    async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Feedback>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.event_id == event_id && f.user_id == user_id)
            .cloned())
    }

    async fn list_by_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>> {
        let mut feedbacks: Vec<Feedback> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.event_id == event_id)
            .cloned()
            .collect();
        feedbacks.sort_by_key(|f| std::cmp::Reverse(f.created_at));
        Ok(feedbacks)
    }

    async fn count_by_event(&self, event_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.event_id == event_id)
            .count() as u64)
    }

    async fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .count() as u64)
    }
}

#[derive(Default)]
struct MemNotifications {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for MemNotifications {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        self.rows.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|n| n.id == id && n.user_id == user_id) {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
struct MemStore {
    users: Arc<MemUsers>,
    events: Arc<MemEvents>,
    registrations: Arc<MemRegistrations>,
    feedbacks: Arc<MemFeedbacks>,
    notifications: Arc<MemNotifications>,
}

#[async_trait]
impl Store for MemStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.events.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationRepository> {
        self.registrations.clone()
    }

    fn feedbacks(&self) -> Arc<dyn FeedbackRepository> {
        self.feedbacks.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Test helpers
// =============================================================================

/// Build the full application router over a fresh in-memory store.
fn app() -> Router {
    let store = Arc::new(MemStore::default());
    let state = AppState::from_store(store, Config::from_env());
    create_router(state)
}

/// Fire one request and decode the JSON body (null when empty).
async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::GET, uri, token, None).await
}

async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, token, Some(body)).await
}

async fn put(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    request(app, Method::PUT, uri, token, Some(body)).await
}

/// Register a user through the API and return their token.
async fn register(app: &Router, email: &str, name: &str, role: &str) -> String {
    let (status, body) = post(
        app,
        "/api/auth/register",
        None,
        json!({
            "email": email,
            "name": name,
            "password": "plausible-password",
            "role": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

fn event_payload(title: &str, category: &str, capacity: u32) -> Value {
    let start = Utc::now() + Duration::days(7);
    let end = start + Duration::hours(2);
    json!({
        "title": title,
        "description": format!("{title} for everyone on campus"),
        "category": category,
        "start_date": start.to_rfc3339(),
        "end_date": end.to_rfc3339(),
        "venue": "Main Auditorium",
        "capacity": capacity,
    })
}

/// Create an event as the given organizer and return its id.
async fn create_event(app: &Router, token: &str, title: &str, capacity: u32) -> String {
    let (status, body) = post(
        app,
        "/api/events",
        Some(token),
        event_payload(title, "technical", capacity),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "event creation failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or("")
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or("")
}

// =============================================================================
// Root and health
// =============================================================================

#[tokio::test]
async fn test_root_returns_banner() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Campus Pulse API");
}

#[tokio::test]
async fn test_health_reports_database_status() {
    let app = app();
    let (status, body) = get(&app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({
            "email": "maya@campus.edu",
            "name": "Maya Iyer",
            "password": "plausible-password",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "maya@campus.edu");
    assert_eq!(body["user"]["role"], "student");
    // The profile never exposes credentials
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "maya@campus.edu", "password": "plausible-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = app();
    register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({
            "email": "maya@campus.edu",
            "name": "Someone Else",
            "password": "plausible-password",
            "role": "student",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "CONFLICT");
    assert_eq!(error_message(&body), "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({
            "email": "maya@campus.edu",
            "name": "Maya Iyer",
            "password": "short",
            "role": "student",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = app();
    register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "maya@campus.edu", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid credentials");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = app();

    let (status, _) = get(&app, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let (status, body) = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "maya@campus.edu");
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_unset_profile_fields_are_null() {
    let app = app();
    let token = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["bio"].is_null());
    assert!(body["phone"].is_null());
    assert!(body["department"].is_null());
    assert!(body["avatar"].is_null());
    assert!(body["year"].is_null());
    assert_eq!(body["interests"], json!([]));
}

#[tokio::test]
async fn test_profile_update_distinguishes_absent_from_null() {
    let app = app();
    let token = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = put(
        &app,
        "/api/users/profile",
        Some(&token),
        json!({ "department": "Computer Science", "year": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Computer Science");
    assert_eq!(body["year"], 3);

    // Absent year stays, explicit null clears it
    let (status, body) = put(
        &app,
        "/api/users/profile",
        Some(&token),
        json!({ "bio": "Rustacean" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 3);

    let (status, body) = put(
        &app,
        "/api/users/profile",
        Some(&token),
        json!({ "year": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["year"].is_null());
    assert_eq!(body["department"], "Computer Science");
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn test_students_cannot_create_events() {
    let app = app();
    let token = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = post(
        &app,
        "/api/events",
        Some(&token),
        event_payload("Robotics Demo", "technical", 50),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");
}

#[tokio::test]
async fn test_created_events_start_upcoming() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;

    // A client-supplied status is dropped, never honored
    let mut payload = event_payload("Robotics Demo", "technical", 50);
    payload["status"] = json!("completed");

    let (status, body) = post(&app, "/api/events", Some(&organizer), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "upcoming");

    let id = body["id"].as_str().unwrap();
    let (_, body) = get(&app, &format!("/api/events/{id}"), None).await;
    assert_eq!(body["status"], "upcoming");
}

#[tokio::test]
async fn test_event_catalog_is_public() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    create_event(&app, &organizer, "Robotics Demo", 50).await;

    let (status, body) = get(&app, "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Robotics Demo");
    assert_eq!(events[0]["registered_count"], 0);
    assert_eq!(events[0]["organizer_name"], "Robotics Club");
}

#[tokio::test]
async fn test_event_catalog_filters() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;

    let (status, _) = post(
        &app,
        "/api/events",
        Some(&organizer),
        event_payload("Rust Workshop", "workshop", 30),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(
        &app,
        "/api/events",
        Some(&organizer),
        event_payload("Spring Fest", "cultural", 500),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/events?category=workshop", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/api/events?search=rust", None).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Rust Workshop");

    let (_, body) = get(&app, "/api/events?search=pottery", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_event_update_enforces_ownership() {
    let app = app();
    let owner = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let other = register(&app, "rival@campus.edu", "Rival Club", "organizer").await;
    let admin = register(&app, "dean@campus.edu", "The Dean", "admin").await;
    let event_id = create_event(&app, &owner, "Robotics Demo", 50).await;

    let (status, _) = put(
        &app,
        &format!("/api/events/{event_id}"),
        Some(&other),
        json!({ "title": "Hijacked" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = put(
        &app,
        &format!("/api/events/{event_id}"),
        Some(&owner),
        json!({ "title": "Robotics Demo 2.0" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Robotics Demo 2.0");

    // Admins can touch any event
    let (status, body) = put(
        &app,
        &format!("/api/events/{event_id}"),
        Some(&admin),
        json!({ "venue": "Great Hall" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue"], "Great Hall");
}

#[tokio::test]
async fn test_event_delete() {
    let app = app();
    let owner = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let event_id = create_event(&app, &owner, "Robotics Demo", 50).await;

    let (status, body) = request(
        &app,
        Method::DELETE,
        &format!("/api/events/{event_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event deleted successfully");

    let (status, _) = get(&app, &format!("/api/events/{event_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_events_is_scoped_to_the_organizer() {
    let app = app();
    let owner = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let other = register(&app, "rival@campus.edu", "Rival Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    create_event(&app, &owner, "Robotics Demo", 50).await;
    create_event(&app, &other, "Drone Race", 20).await;

    let (status, body) = get(&app, "/api/events/organizer/my-events", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Robotics Demo");

    let (status, _) = get(&app, "/api/events/organizer/my-events", Some(&student)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Registrations
// =============================================================================

#[tokio::test]
async fn test_registration_issues_qr_ticket() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;

    let (status, body) = post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event_id"], event_id);
    assert_eq!(body["user_name"], "Maya Iyer");
    assert_eq!(body["checked_in"], false);
    // base64 of a PNG always opens with the encoded magic bytes
    assert!(body["qr_code"].as_str().unwrap().starts_with("iVBOR"));

    let (_, event) = get(&app, &format!("/api/events/{event_id}"), None).await;
    assert_eq!(event["registered_count"], 1);

    let (status, body) = get(&app, "/api/registrations/my-registrations", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_registration_rejects_duplicates_and_non_students() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;
    let uri = format!("/api/registrations/{event_id}");

    let (status, _) = post(&app, &uri, Some(&student), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, &uri, Some(&student), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Already registered");

    let (status, _) = post(&app, &uri, Some(&organizer), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_registration_closes_at_capacity() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let first = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let second = register(&app, "ethan@campus.edu", "Ethan Cole", "student").await;
    let event_id = create_event(&app, &organizer, "Tiny Seminar", 1).await;
    let uri = format!("/api/registrations/{event_id}");

    let (status, _) = post(&app, &uri, Some(&first), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, &uri, Some(&second), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Event is full");

    let (_, event) = get(&app, &format!("/api/events/{event_id}"), None).await;
    assert_eq!(event["registered_count"], 1);
}

#[tokio::test]
async fn test_attendee_list_is_organizer_only() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;
    post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;

    let (status, body) = get(
        &app,
        &format!("/api/registrations/event/{event_id}"),
        Some(&organizer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = get(
        &app,
        &format!("/api/registrations/event/{event_id}"),
        Some(&student),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_check_in_happens_once() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let rival = register(&app, "rival@campus.edu", "Rival Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;

    let (_, registration) = post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;
    let registration_id = registration["id"].as_str().unwrap();
    let uri = format!("/api/registrations/checkin/{registration_id}");

    // Only the event's organizer (or an admin) may scan tickets
    let (status, _) = post(&app, &uri, Some(&rival), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = post(&app, &uri, Some(&organizer), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Check-in successful");

    let (status, body) = post(&app, &uri, Some(&organizer), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Already checked in");
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn test_feedback_requires_attendance() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;

    let feedback = json!({
        "event_id": event_id,
        "rating": 5,
        "comment": "Loved the line-following bots",
    });

    // Registered but never scanned in
    let (_, registration) = post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;
    let (status, _) = post(&app, "/api/feedbacks", Some(&student), feedback.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let registration_id = registration["id"].as_str().unwrap();
    post(
        &app,
        &format!("/api/registrations/checkin/{registration_id}"),
        Some(&organizer),
        json!({}),
    )
    .await;

    let (status, body) = post(&app, "/api/feedbacks", Some(&student), feedback.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 5);
    assert_eq!(body["user_name"], "Maya Iyer");

    let (status, body) = post(&app, "/api/feedbacks", Some(&student), feedback).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Feedback already submitted");

    // The feedback wall is public
    let (status, body) = get(&app, &format!("/api/feedbacks/event/{event_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_feedback_rating_bounds() {
    let app = app();
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;

    let (status, body) = post(
        &app,
        "/api/feedbacks",
        Some(&student),
        json!({ "event_id": Uuid::new_v4(), "rating": 6, "comment": "off the scale" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn test_registration_notifies_the_student() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let intruder = register(&app, "ethan@campus.edu", "Ethan Cole", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;

    post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;

    let (status, body) = get(&app, "/api/notifications", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["title"], "Registration Successful");
    assert_eq!(notifications[0]["read"], false);
    let notification_id = notifications[0]["id"].as_str().unwrap().to_string();

    // Someone else's notification looks like it does not exist
    let (status, _) = put(
        &app,
        &format!("/api/notifications/{notification_id}/read"),
        Some(&intruder),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = put(
        &app,
        &format!("/api/notifications/{notification_id}/read"),
        Some(&student),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notification marked as read");

    let (_, body) = get(&app, "/api/notifications", Some(&student)).await;
    assert_eq!(body.as_array().unwrap()[0]["read"], true);
}

// =============================================================================
// Analytics
// =============================================================================

#[tokio::test]
async fn test_event_stats_after_a_small_event() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let maya = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let ethan = register(&app, "ethan@campus.edu", "Ethan Cole", "student").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;

    let (_, registration) = post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&maya),
        json!({}),
    )
    .await;
    post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&ethan),
        json!({}),
    )
    .await;

    let registration_id = registration["id"].as_str().unwrap();
    post(
        &app,
        &format!("/api/registrations/checkin/{registration_id}"),
        Some(&organizer),
        json!({}),
    )
    .await;
    post(
        &app,
        "/api/feedbacks",
        Some(&maya),
        json!({ "event_id": event_id, "rating": 4, "comment": "Great bots" }),
    )
    .await;

    let (status, body) = get(
        &app,
        &format!("/api/analytics/event/{event_id}"),
        Some(&organizer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_registrations"], 2);
    assert_eq!(body["checked_in"], 1);
    assert_eq!(body["attendance_rate"], 50.0);
    assert_eq!(body["feedback_count"], 1);
    assert_eq!(body["average_rating"], 4.0);

    // Students get no peek at the numbers
    let (status, _) = get(
        &app,
        &format!("/api/analytics/event/{event_id}"),
        Some(&maya),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_is_admin_only() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let admin = register(&app, "dean@campus.edu", "The Dean", "admin").await;
    create_event(&app, &organizer, "Robotics Demo", 50).await;

    let (status, _) = get(&app, "/api/analytics/dashboard", Some(&organizer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&app, "/api/analytics/dashboard", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 2);
    assert_eq!(body["total_events"], 1);
    assert_eq!(body["organizers"], 1);
    let by_category = body["events_by_category"].as_object().unwrap();
    assert_eq!(by_category.len(), 7);
    assert_eq!(by_category["technical"], 1);
    assert_eq!(by_category["sports"], 0);
}

#[tokio::test]
async fn test_user_stats_match_each_role() {
    let app = app();
    let organizer = register(&app, "club@campus.edu", "Robotics Club", "organizer").await;
    let student = register(&app, "maya@campus.edu", "Maya Iyer", "student").await;
    let admin = register(&app, "dean@campus.edu", "The Dean", "admin").await;
    let event_id = create_event(&app, &organizer, "Robotics Demo", 50).await;
    post(
        &app,
        &format!("/api/registrations/{event_id}"),
        Some(&student),
        json!({}),
    )
    .await;

    let (status, body) = get(&app, "/api/users/stats", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registrations"], 1);
    assert_eq!(body["attended"], 0);
    assert_eq!(body["feedbacks"], 0);

    let (status, body) = get(&app, "/api/users/stats", Some(&organizer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events_created"], 1);
    assert_eq!(body["total_registrations"], 1);

    let (status, body) = get(&app, "/api/users/stats", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 3);
    assert_eq!(body["total_events"], 1);
    assert_eq!(body["total_registrations"], 1);
}
