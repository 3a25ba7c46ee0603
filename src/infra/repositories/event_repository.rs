//! Event repository backed by the `events` collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document, Regex},
    options::ReturnDocument,
    Collection,
};
use uuid::Uuid;

use crate::domain::{Event, EventCategory, EventFilter, EventPatch};
use crate::errors::AppResult;
use crate::infra::db::{Database, EVENTS};
use crate::types::time;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event
    async fn insert(&self, event: &Event) -> AppResult<()>;

    /// Find event by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// List events matching the catalog filters, soonest first
    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<Event>>;

    /// List events published by one organizer, newest first
    async fn list_by_organizer(&self, organizer_id: Uuid) -> AppResult<Vec<Event>>;

    /// List every event, newest first
    async fn list_all(&self) -> AppResult<Vec<Event>>;

    /// Apply a patch and return the updated event
    async fn update(&self, id: Uuid, patch: &EventPatch) -> AppResult<Option<Event>>;

    /// Delete an event. Returns false when it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Atomically claim one seat.
    ///
    /// The increment only happens while `registered_count` is below
    /// `capacity`; returns false when the event is already full (or gone).
    async fn reserve_seat(&self, id: Uuid) -> AppResult<bool>;

    /// Give back a seat claimed by a registration that failed to insert
    async fn release_seat(&self, id: Uuid) -> AppResult<()>;

    /// Count all events
    async fn count(&self) -> AppResult<u64>;

    /// Count events in a category
    async fn count_by_category(&self, category: EventCategory) -> AppResult<u64>;
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    collection: Collection<Event>,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EVENTS),
        }
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn insert(&self, event: &Event) -> AppResult<()> {
        self.collection.insert_one(event).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let result = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(result)
    }

    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        let mut query = Document::new();

        if let Some(category) = filter.category {
            query.insert("category", category.as_str());
        }
        if let Some(status) = filter.status {
            query.insert("status", status.as_str());
        }
        if let Some(search) = &filter.search {
            // Escaped so search terms are matched literally
            let regex = Regex {
                pattern: regex::escape(search),
                options: "i".to_string(),
            };
            query.insert(
                "$or",
                vec![
                    doc! { "title": Bson::RegularExpression(regex.clone()) },
                    doc! { "description": Bson::RegularExpression(regex) },
                ],
            );
        }

        let events = self
            .collection
            .find(query)
            .sort(doc! { "start_date": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(events)
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> AppResult<Vec<Event>> {
        let events = self
            .collection
            .find(doc! { "organizer_id": organizer_id.to_string() })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(events)
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        let events = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(events)
    }

    async fn update(&self, id: Uuid, patch: &EventPatch) -> AppResult<Option<Event>> {
        let mut set = Document::new();

        if let Some(title) = &patch.title {
            set.insert("title", title);
        }
        if let Some(description) = &patch.description {
            set.insert("description", description);
        }
        if let Some(category) = patch.category {
            set.insert("category", category.as_str());
        }
        if let Some(start_date) = patch.start_date {
            set.insert("start_date", time::format(&start_date));
        }
        if let Some(end_date) = patch.end_date {
            set.insert("end_date", time::format(&end_date));
        }
        if let Some(venue) = &patch.venue {
            set.insert("venue", venue);
        }
        if let Some(capacity) = patch.capacity {
            set.insert("capacity", i64::from(capacity));
        }
        if let Some(cost) = patch.cost {
            set.insert("cost", cost);
        }
        match &patch.image_url {
            Some(Some(url)) => {
                set.insert("image_url", url);
            }
            Some(None) => {
                set.insert("image_url", Bson::Null);
            }
            None => {}
        }
        if let Some(status) = patch.status {
            set.insert("status", status.as_str());
        }
        if let Some(tags) = &patch.tags {
            set.insert("tags", tags.clone());
        }

        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "id": id.to_string() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn reserve_seat(&self, id: Uuid) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "id": id.to_string(),
                    "$expr": { "$lt": ["$registered_count", "$capacity"] },
                },
                doc! { "$inc": { "registered_count": 1 } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn release_seat(&self, id: Uuid) -> AppResult<()> {
        // The floor guard keeps a misdirected release from going negative
        self.collection
            .update_one(
                doc! { "id": id.to_string(), "registered_count": { "$gt": 0 } },
                doc! { "$inc": { "registered_count": -1 } },
            )
            .await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn count_by_category(&self, category: EventCategory) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "category": category.as_str() })
            .await?)
    }
}
