//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body, shared by candidate and staff logins.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Job application form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    /// Applicant name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Applicant email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Position or program applied for.
    #[serde(default)]
    pub position: Option<String>,
    /// Cover message.
    #[serde(default)]
    #[validate(length(max = 5000, message = "Message is too long"))]
    pub message: Option<String>,
}

/// Newsletter subscription form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    /// Subscriber email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Optional name.
    #[serde(default)]
    pub name: Option<String>,
    /// Page or form the subscription came from.
    #[serde(default)]
    pub source: Option<String>,
}

/// Newsletter to send to every subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendNewsletterRequest {
    /// Subject line.
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,
    /// Body.
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// `?courseId=` filter for progress lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    /// Restrict to one course.
    pub course_id: Option<String>,
}

/// `?courseId=&moduleId=` filter for quiz lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    /// Restrict to one course.
    pub course_id: Option<String>,
    /// Restrict to one module of that course.
    pub module_id: Option<String>,
}

/// `?daysOld=` for training cleanup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupQuery {
    /// Age threshold in days; the configured retention when absent.
    pub days_old: Option<u32>,
}
