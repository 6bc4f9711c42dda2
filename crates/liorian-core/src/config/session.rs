//! Client session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Thresholds and timers for the client session manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours, measured from the last refresh.
    #[serde(default = "default_absolute_timeout")]
    pub absolute_timeout_hours: u64,
    /// Idle timeout in minutes since the last recorded activity.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
    /// Interval of the periodic auto-save of the session record.
    #[serde(default = "default_auto_save_interval")]
    pub auto_save_interval_seconds: u64,
    /// Interval of the periodic validation pass.
    #[serde(default = "default_validation_interval")]
    pub validation_interval_seconds: u64,
    /// Whether a login pins the session to the window that performed it.
    #[serde(default = "default_true")]
    pub single_device: bool,
    /// Route the client is sent to after logout.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Delay before the logout redirect fires, in milliseconds.
    #[serde(default = "default_redirect_delay")]
    pub logout_redirect_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            absolute_timeout_hours: default_absolute_timeout(),
            idle_timeout_minutes: default_idle_timeout(),
            auto_save_interval_seconds: default_auto_save_interval(),
            validation_interval_seconds: default_validation_interval(),
            single_device: true,
            login_route: default_login_route(),
            logout_redirect_delay_ms: default_redirect_delay(),
        }
    }
}

impl SessionConfig {
    /// Absolute timeout in milliseconds.
    pub fn absolute_timeout_ms(&self) -> i64 {
        (self.absolute_timeout_hours * 60 * 60 * 1000) as i64
    }

    /// Idle timeout in milliseconds.
    pub fn idle_timeout_ms(&self) -> i64 {
        (self.idle_timeout_minutes * 60 * 1000) as i64
    }

    /// Auto-save period.
    pub fn auto_save_interval(&self) -> Duration {
        Duration::from_secs(self.auto_save_interval_seconds.max(1))
    }

    /// Validation period.
    pub fn validation_interval(&self) -> Duration {
        Duration::from_secs(self.validation_interval_seconds.max(1))
    }
}

fn default_absolute_timeout() -> u64 {
    8
}

fn default_idle_timeout() -> u64 {
    120
}

fn default_auto_save_interval() -> u64 {
    300
}

fn default_validation_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_redirect_delay() -> u64 {
    100
}
