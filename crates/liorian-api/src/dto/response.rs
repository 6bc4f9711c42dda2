//! Response DTOs.

use serde::{Deserialize, Serialize};

use liorian_entity::user::{UserProfile, UserType};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
    /// Object store backing training data.
    pub storage: String,
}

/// Object store connectivity probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealthResponse {
    /// `"connected"` when the probe round-trip succeeded.
    pub status: String,
    /// Object store provider.
    pub provider: String,
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
    /// Role of the user.
    pub user_type: UserType,
    /// Dashboard the client should open.
    pub redirect_to: String,
}

/// Result of a newsletter send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterResponse {
    /// Campaign identifier.
    pub campaign_id: uuid::Uuid,
    /// Number of subscribers addressed.
    pub recipients: usize,
}

/// Result of a training cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    /// Objects deleted.
    pub deleted: usize,
    /// Age threshold applied.
    pub days_old: u32,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}
