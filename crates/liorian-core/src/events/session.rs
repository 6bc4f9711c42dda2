//! Client session events.

use serde::{Deserialize, Serialize};

/// Events produced by the client session manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A role logged in on this window.
    LoggedIn {
        /// Role name.
        user_type: String,
        /// Device session id stamped at login.
        device_session_id: String,
    },
    /// The session was ended explicitly or by the validation task.
    LoggedOut {
        /// Why the session ended.
        reason: String,
    },
    /// A token was missing but the session record was fresh enough.
    Recovered {
        /// Role recorded in the session record.
        user_type: String,
    },
    /// The window marker did not match the stored device session id.
    DeviceMismatch,
    /// The absolute or idle threshold was exceeded.
    Expired {
        /// `"absolute"` or `"idle"`.
        threshold: String,
    },
}
