//! Feedback service - post-attendance ratings.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::auth_service::CurrentUser;
use crate::domain::{CreateFeedback, Feedback};
use crate::errors::{AppError, AppResult};
use crate::infra::Store;

/// Feedback service trait for dependency injection.
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Submit feedback for an attended event
    async fn create(&self, input: CreateFeedback, actor: &CurrentUser) -> AppResult<Feedback>;

    /// List an event's feedback, newest first. Public.
    async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>>;
}

/// Concrete implementation of FeedbackService
pub struct FeedbackManager<S: Store> {
    store: Arc<S>,
}

impl<S: Store> FeedbackManager<S> {
    /// Create new feedback service instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store> FeedbackService for FeedbackManager<S> {
    async fn create(&self, input: CreateFeedback, actor: &CurrentUser) -> AppResult<Feedback> {
        // Attendance gate: a registration that was actually scanned in.
        if !self
            .store
            .registrations()
            .has_checked_in(input.event_id, actor.id)
            .await?
        {
            return Err(AppError::Forbidden);
        }

        if self
            .store
            .feedbacks()
            .find_by_event_and_user(input.event_id, actor.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Feedback already submitted"));
        }

        let feedback = Feedback::new(
            input.event_id,
            actor.id,
            actor.name.clone(),
            input.rating,
            input.comment,
        );
        self.store.feedbacks().insert(&feedback).await?;

        tracing::info!(
            feedback_id = %feedback.id,
            event_id = %feedback.event_id,
            rating = feedback.rating,
            "Feedback recorded"
        );
        Ok(feedback)
    }

    async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<Feedback>> {
        self.store.feedbacks().list_by_event(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infra::{MockFeedbackRepository, MockRegistrationRepository, MockStore};

    fn student() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "student@campus.edu".to_string(),
            name: "Student".to_string(),
            role: UserRole::Student,
        }
    }

    fn store(
        registrations: MockRegistrationRepository,
        feedbacks: MockFeedbackRepository,
    ) -> Arc<MockStore> {
        let registrations = Arc::new(registrations);
        let feedbacks = Arc::new(feedbacks);
        let mut store = MockStore::new();
        store
            .expect_registrations()
            .returning(move || registrations.clone());
        store.expect_feedbacks().returning(move || feedbacks.clone());
        Arc::new(store)
    }

    fn input() -> CreateFeedback {
        CreateFeedback {
            event_id: Uuid::new_v4(),
            rating: 4,
            comment: "Great talks".to_string(),
        }
    }

    #[tokio::test]
    async fn test_feedback_requires_check_in() {
        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_has_checked_in()
            .returning(|_, _| Ok(false));

        let service = FeedbackManager::new(store(registrations, MockFeedbackRepository::new()));
        let err = service.create(input(), &student()).await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_feedback_rejects_duplicate() {
        let actor = student();
        let actor_id = actor.id;

        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_has_checked_in()
            .returning(|_, _| Ok(true));
        let mut feedbacks = MockFeedbackRepository::new();
        feedbacks
            .expect_find_by_event_and_user()
            .returning(move |event_id, _| {
                Ok(Some(Feedback::new(
                    event_id,
                    actor_id,
                    "Student".to_string(),
                    5,
                    "Loved it".to_string(),
                )))
            });

        let service = FeedbackManager::new(store(registrations, feedbacks));
        let err = service.create(input(), &actor).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg == "Feedback already submitted"));
    }

    #[tokio::test]
    async fn test_feedback_happy_path() {
        let actor = student();

        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_has_checked_in()
            .returning(|_, _| Ok(true));
        let mut feedbacks = MockFeedbackRepository::new();
        feedbacks
            .expect_find_by_event_and_user()
            .returning(|_, _| Ok(None));
        feedbacks
            .expect_insert()
            .withf(|f: &Feedback| f.rating == 4 && f.user_name == "Student")
            .times(1)
            .returning(|_| Ok(()));

        let service = FeedbackManager::new(store(registrations, feedbacks));
        let feedback = service.create(input(), &actor).await.unwrap();

        assert_eq!(feedback.user_id, actor.id);
        assert_eq!(feedback.comment, "Great talks");
    }
}
