//! Key names for every entry the platform keeps in a key-value store.
//!
//! Centralising them prevents typos and makes it easy to find every key
//! the client and server read or write.

// ── Session manager ────────────────────────────────────────

/// Primary copy of the session record (shared store).
pub const SESSION_DATA: &str = "liorian_session_data";

/// Backup copy of the session record (per-window store).
pub const SESSION_BACKUP: &str = "liorian_session_backup";

/// Device session id stamped at login (shared store).
pub const DEVICE_SESSION_ID: &str = "deviceSessionId";

/// Copy of the device session id owned by one window (per-window store).
pub const WINDOW_SESSION_MARKER: &str = "window_session_marker";

/// `"true"` while single-device enforcement is on (shared store).
pub const SINGLE_DEVICE_MODE: &str = "singleDeviceMode";

/// Role of the signed-in user (shared store).
pub const USER_TYPE: &str = "userType";

// ── Lightweight auth ───────────────────────────────────────

/// JSON of the signed-in user.
pub const CURRENT_USER: &str = "currentUser";

/// Token written by the lightweight auth helper.
pub const AUTH_TOKEN: &str = "authToken";

/// Login time (epoch milliseconds) written by the lightweight auth helper.
pub const LOGIN_TIME: &str = "loginTime";

// ── Server-side records ────────────────────────────────────

/// JSON array of system users allowed to sign in.
pub const SYSTEM_USERS: &str = "systemUsers";

/// JSON array of training module definitions.
pub const TRAINING_MODULES: &str = "trainingModules";

/// JSON array of newsletter subscribers.
pub const NEWSLETTER_SUBSCRIBERS: &str = "newsletterSubscribers";

/// JSON array of sent newsletter campaigns.
pub const NEWSLETTER_CAMPAIGNS: &str = "newsletterCampaigns";

/// JSON array of job applications.
pub const APPLICATIONS: &str = "applications";
