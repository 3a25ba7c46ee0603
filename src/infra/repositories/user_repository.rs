//! User repository backed by the `users` collection.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    options::ReturnDocument,
    Collection,
};
use uuid::Uuid;

use super::is_duplicate_key;
use crate::domain::{ProfileUpdate, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::db::{Database, USERS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a conflict when the email is taken.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Apply a profile patch and return the updated user
    async fn update_profile(&self, id: Uuid, patch: &ProfileUpdate) -> AppResult<Option<User>>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;

    /// Count users holding a given role
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = self.collection.find_one(doc! { "email": email }).await?;
        Ok(result)
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        self.collection.insert_one(user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::conflict("Email already registered")
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfileUpdate) -> AppResult<Option<User>> {
        let mut set = Document::new();

        if let Some(name) = &patch.name {
            set.insert("name", name);
        }
        match &patch.avatar {
            Some(Some(url)) => {
                set.insert("avatar", url);
            }
            Some(None) => {
                set.insert("avatar", Bson::Null);
            }
            None => {}
        }
        if let Some(bio) = &patch.bio {
            set.insert("bio", bio);
        }
        if let Some(phone) = &patch.phone {
            set.insert("phone", phone);
        }
        if let Some(department) = &patch.department {
            set.insert("department", department);
        }
        match patch.year {
            Some(Some(year)) => {
                set.insert("year", year);
            }
            Some(None) => {
                set.insert("year", Bson::Null);
            }
            None => {}
        }
        if let Some(interests) = &patch.interests {
            set.insert("interests", interests.clone());
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

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "role": role.as_str() })
            .await?)
    }
}
