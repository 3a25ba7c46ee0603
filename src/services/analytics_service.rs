//! Analytics service - per-event, per-user, and campus-wide statistics.
//!
//! Everything here is computed on read from counts and small scans; no
//! aggregates are materialized.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth_service::CurrentUser;
use super::container::parallel;
use crate::domain::{EventCategory, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Store;

/// Round to two decimal places for display
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Attendance and feedback numbers for a single event
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventStats {
    pub total_registrations: u64,
    pub checked_in: u64,
    /// Checked-in share of registrations, as a percentage
    pub attendance_rate: f64,
    pub feedback_count: u64,
    /// Mean rating rounded to two decimals, 0.0 when there is no feedback
    pub average_rating: f64,
}

/// Campus-wide totals for the admin dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_events: u64,
    pub total_registrations: u64,
    pub students: u64,
    pub organizers: u64,
    /// Event count per category, zero-filled for empty categories
    pub events_by_category: BTreeMap<String, u64>,
}

/// Personal statistics, shaped by the caller's role
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UserStats {
    Student {
        registrations: u64,
        attended: u64,
        feedbacks: u64,
    },
    Organizer {
        events_created: u64,
        total_registrations: u64,
    },
    Admin {
        total_users: u64,
        total_events: u64,
        total_registrations: u64,
    },
}

/// Analytics service trait for dependency injection.
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Statistics for one event (owner or admin)
    async fn event_stats(&self, event_id: Uuid, actor: &CurrentUser) -> AppResult<EventStats>;

    /// Campus-wide dashboard (admin only)
    async fn dashboard(&self, actor: &CurrentUser) -> AppResult<DashboardStats>;

    /// The caller's own numbers
    async fn user_stats(&self, actor: &CurrentUser) -> AppResult<UserStats>;
}

/// Concrete implementation of AnalyticsService
pub struct AnalyticsManager<S: Store> {
    store: Arc<S>,
}

impl<S: Store> AnalyticsManager<S> {
    /// Create new analytics service instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store> AnalyticsService for AnalyticsManager<S> {
    async fn event_stats(&self, event_id: Uuid, actor: &CurrentUser) -> AppResult<EventStats> {
        let event = self
            .store
            .events()
            .find_by_id(event_id)
            .await?
            .ok_or_not_found()?;
        if event.organizer_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let registrations = self.store.registrations();
        let (total_registrations, checked_in, feedbacks) = parallel::join3(
            registrations.count_by_event(event_id),
            registrations.count_checked_in_by_event(event_id),
            self.store.feedbacks().list_by_event(event_id),
        )
        .await?;

        let attendance_rate = if total_registrations > 0 {
            checked_in as f64 / total_registrations as f64 * 100.0
        } else {
            0.0
        };
        let average_rating = if feedbacks.is_empty() {
            0.0
        } else {
            let sum: u64 = feedbacks.iter().map(|f| u64::from(f.rating)).sum();
            round2(sum as f64 / feedbacks.len() as f64)
        };

        Ok(EventStats {
            total_registrations,
            checked_in,
            attendance_rate,
            feedback_count: feedbacks.len() as u64,
            average_rating,
        })
    }

    async fn dashboard(&self, actor: &CurrentUser) -> AppResult<DashboardStats> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let users = self.store.users();
        let (total_users, total_events, total_registrations) = parallel::join3(
            users.count(),
            self.store.events().count(),
            self.store.registrations().count(),
        )
        .await?;
        let (students, organizers) = parallel::join2(
            users.count_by_role(UserRole::Student),
            users.count_by_role(UserRole::Organizer),
        )
        .await?;

        let events = self.store.events();
        let futures: Vec<_> = EventCategory::ALL
            .iter()
            .map(|&category| {
                let events = events.clone();
                async move {
                    let count = events.count_by_category(category).await?;
                    Ok((category.to_string(), count))
                }
            })
            .collect();
        let events_by_category = parallel::join_all(futures).await?.into_iter().collect();

        Ok(DashboardStats {
            total_users,
            total_events,
            total_registrations,
            students,
            organizers,
            events_by_category,
        })
    }

    async fn user_stats(&self, actor: &CurrentUser) -> AppResult<UserStats> {
        match actor.role {
            UserRole::Student => {
                let registrations = self.store.registrations();
                let (registered, attended, feedbacks) = parallel::join3(
                    registrations.count_by_user(actor.id),
                    registrations.count_checked_in_by_user(actor.id),
                    self.store.feedbacks().count_by_user(actor.id),
                )
                .await?;
                Ok(UserStats::Student {
                    registrations: registered,
                    attended,
                    feedbacks,
                })
            }
            UserRole::Organizer => {
                // One scan gives both the event count and the seat totals.
                let events = self.store.events().list_by_organizer(actor.id).await?;
                let total_registrations =
                    events.iter().map(|e| u64::from(e.registered_count)).sum();
                Ok(UserStats::Organizer {
                    events_created: events.len() as u64,
                    total_registrations,
                })
            }
            UserRole::Admin => {
                let (total_users, total_events, total_registrations) = parallel::join3(
                    self.store.users().count(),
                    self.store.events().count(),
                    self.store.registrations().count(),
                )
                .await?;
                Ok(UserStats::Admin {
                    total_users,
                    total_events,
                    total_registrations,
                })
            }
        }
    }
}
