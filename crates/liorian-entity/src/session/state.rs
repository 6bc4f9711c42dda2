//! Derived session state and the status summary shown in the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserType;

/// Whether the current window is signed in, and as whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    /// Nobody is signed in.
    Anonymous,
    /// A role is signed in.
    Authenticated {
        /// The signed-in role.
        role: UserType,
        /// When the session record was last refreshed.
        issued_at: DateTime<Utc>,
        /// Last recorded activity.
        last_seen_at: DateTime<Utc>,
    },
}

impl SessionState {
    /// Whether a role is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The signed-in role, if any.
    pub fn role(&self) -> Option<UserType> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { role, .. } => Some(*role),
        }
    }
}

/// Session summary for "expires in N minutes" banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// Whether the window is signed in.
    pub is_authenticated: bool,
    /// The signed-in role, if any.
    pub user_type: Option<UserType>,
    /// Milliseconds left before the absolute timeout.
    pub time_remaining: i64,
    /// Last recorded activity (epoch milliseconds), if any.
    pub last_activity: Option<i64>,
}

impl SessionStatus {
    /// Status of a window nobody is signed in to.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user_type: None,
            time_remaining: 0,
            last_activity: None,
        }
    }

    /// Whole minutes left, for display.
    pub fn minutes_remaining(&self) -> i64 {
        self.time_remaining / 60_000
    }
}
