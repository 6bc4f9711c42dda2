//! Authentication configuration for the HTTP login endpoints.

use serde::{Deserialize, Serialize};

/// Login and bearer-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Length of the opaque tokens issued on login.
    #[serde(default = "default_token_length")]
    pub token_length: usize,
    /// Minimum password length for system users.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_token_length() -> usize {
    48
}

fn default_password_min() -> usize {
    8
}
