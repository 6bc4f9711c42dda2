//! Session record model.

use serde::{Deserialize, Serialize};

use crate::user::UserType;

/// Session metadata persisted next to the role token.
///
/// Written twice (primary + backup copy) and rewritten on every activity
/// event. All times are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// When the record was last refreshed; the absolute timeout runs from here.
    pub timestamp: i64,
    /// Last user activity; the idle timeout runs from here.
    pub last_activity: i64,
    /// Role that owns the session.
    pub user_type: UserType,
    /// Route the user was last seen on.
    #[serde(default)]
    pub current_path: String,
    /// Device session id stamped at login.
    #[serde(default)]
    pub session_id: String,
}

impl SessionRecord {
    /// Create a fresh record at `now_ms`.
    pub fn new(user_type: UserType, session_id: String, current_path: String, now_ms: i64) -> Self {
        Self {
            timestamp: now_ms,
            last_activity: now_ms,
            user_type,
            current_path,
            session_id,
        }
    }

    /// Milliseconds since the record was last refreshed.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.timestamp).max(0)
    }

    /// Milliseconds since the last recorded activity.
    pub fn idle_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.last_activity).max(0)
    }

    /// Whether both thresholds still hold at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64, absolute_ms: i64, idle_ms: i64) -> bool {
        self.age_ms(now_ms) < absolute_ms && self.idle_ms(now_ms) < idle_ms
    }

    /// Mark activity at `now_ms`, resetting both clocks.
    pub fn touch(&mut self, now_ms: i64) {
        self.timestamp = now_ms;
        self.last_activity = now_ms;
    }
}
