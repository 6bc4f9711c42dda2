//! Newsletter subscribers, campaigns, and job applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A newsletter subscriber. Emails are stored lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    /// Subscriber email.
    pub email: String,
    /// Optional name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Subscription time.
    pub subscribed_at: DateTime<Utc>,
    /// Page or form the subscription came from.
    #[serde(default)]
    pub source: String,
}

/// A newsletter sent by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterCampaign {
    /// Campaign identifier.
    pub id: Uuid,
    /// Subject line.
    pub subject: String,
    /// Body.
    pub content: String,
    /// Number of subscribers at send time.
    pub recipients: usize,
    /// Send time.
    pub sent_at: DateTime<Utc>,
}

/// A job application submitted through the careers form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Application identifier.
    pub id: Uuid,
    /// Applicant name.
    pub name: String,
    /// Applicant email.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Position or program applied for.
    #[serde(default)]
    pub position: String,
    /// Cover message.
    #[serde(default)]
    pub message: String,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}
