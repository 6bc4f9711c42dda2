//! System user account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::role::UserType;

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// May sign in.
    #[default]
    Active,
    /// Sign-in refused.
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A user that can sign in through the HTTP login endpoints.
///
/// Persisted as one JSON array under the `systemUsers` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    /// Unique identifier.
    pub id: Uuid,
    /// Login email (compared case-insensitively).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub user_type: UserType,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Account status.
    #[serde(default)]
    pub status: UserStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl SystemUser {
    /// Whether `email` identifies this user.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    /// Whether the account may sign in.
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// The public part of the account, without the password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            user_type: self.user_type,
        }
    }
}

/// What login responses and the CLI show about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub user_type: UserType,
}
