//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::types::patch::double_option;

/// Campus roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Organizer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Organizer => "organizer",
            UserRole::Admin => "admin",
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role can publish and manage events
    pub fn can_manage_events(&self) -> bool {
        matches!(self, UserRole::Organizer | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account, stored as a flat document.
///
/// The password hash travels with the document and must never reach a
/// client; handlers convert to [`UserProfile`] before responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(with = "crate::types::time")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty profile.
    pub fn new(email: String, name: String, password_hash: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role,
            avatar: None,
            bio: None,
            phone: None,
            department: None,
            year: None,
            interests: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Profile update payload.
///
/// Absent fields are left untouched. `avatar` and `year` additionally
/// accept an explicit null to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProfileUpdate {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Maya Iyer")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "https://cdn.campus.edu/avatars/maya.png")]
    pub avatar: Option<Option<String>>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "Computer Science")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, example = 3)]
    pub year: Option<Option<i32>>,
    pub interests: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// True when no field is set, in which case there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar.is_none()
            && self.bio.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.year.is_none()
            && self.interests.is_none()
    }
}

/// Public profile (safe to return to clients)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "maya@campus.edu")]
    pub email: String,
    #[schema(example = "Maya Iyer")]
    pub name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub interests: Vec<String>,
    #[serde(with = "crate::types::time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            avatar: user.avatar,
            bio: user.bio,
            phone: user.phone,
            department: user.department,
            year: user.year,
            interests: user.interests,
            created_at: user.created_at,
        }
    }
}
